// Infrastructure layer - Config, data file and rendering adapters
pub mod config;
pub mod csv_source;
pub mod html_response;
pub mod svg_chart;
