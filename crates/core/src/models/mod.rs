pub mod chart;
pub mod rendered;
pub mod request;
pub mod result;
pub mod settings;
