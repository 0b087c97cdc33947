pub mod app;
pub mod config;
pub mod csv_loader;
pub mod exporters;
pub mod logging;
pub mod platform;
pub mod render;
pub mod session;
pub mod utils;
