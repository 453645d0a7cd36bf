// ExVenture dashboards - Declared Grafana dashboards for the ExVenture game server
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
