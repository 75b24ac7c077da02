pub mod answer;
pub mod app;
pub mod config;
pub mod import;
pub mod process;
pub mod store;
