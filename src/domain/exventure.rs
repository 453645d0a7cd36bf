// ExVenture game server dashboard (player count, logins, sessions)
use super::dashboard::{Dashboard, Panel, Row, Target};

pub const TITLE: &str = "ExVenture";
pub const UID: &str = "exventure";
pub const DATA_SOURCE: &str = "Prometheus";

pub fn dashboard() -> Dashboard {
    Dashboard::new(TITLE, rows()).with_uid(UID)
}

pub fn rows() -> Vec<Row> {
    vec![Row::new(vec![player_count(), logins(), sessions()])]
}

fn player_count() -> Panel {
    Panel::graph(
        "Player Count",
        DATA_SOURCE,
        vec![Target::new("exventure_player_count").with_legend_format("{{role}}")],
    )
}

fn logins() -> Panel {
    Panel::graph(
        "Logins",
        DATA_SOURCE,
        vec![
            Target::new("exventure_login_total"),
            Target::new("exventure_login_failure_total"),
        ],
    )
}

fn sessions() -> Panel {
    Panel::graph(
        "Sessions",
        DATA_SOURCE,
        vec![
            Target::new("exventure_session_total").with_legend_format("Sessions"),
            Target::new("exventure_session_recovery_total").with_legend_format("Session Recoveries"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exventure_layout() {
        let dashboard = dashboard();
        assert_eq!(dashboard.title, "ExVenture");
        assert_eq!(dashboard.rows.len(), 1);

        let target_counts: Vec<usize> = dashboard.panels().map(|p| p.targets.len()).collect();
        assert_eq!(target_counts, vec![1, 2, 2]);
        assert!(dashboard
            .panels()
            .all(|p| p.data_source.as_deref() == Some("Prometheus")));
    }
}
