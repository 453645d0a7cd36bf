// Application state for HTTP handlers
use crate::application::catalog::DashboardCatalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: DashboardCatalog,
}
