// Application layer - Building, cataloguing and publishing dashboards
pub mod catalog;
pub mod dashboard_builder;
pub mod dashboard_sink;
pub mod provisioning_service;
