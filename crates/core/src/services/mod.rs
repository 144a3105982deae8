pub mod chart_service;
pub mod format_service;
pub mod render_service;
pub mod request_builder;
pub mod table_service;
