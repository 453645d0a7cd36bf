// Infrastructure layer - Grafana document format, configuration and sinks
pub mod config;
pub mod file_sink;
pub mod grafana_api;
pub mod grafana_mapper;
pub mod grafana_model;
