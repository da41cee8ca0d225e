pub mod config;
pub mod sport;

pub use config::{SportCatalog, SportConfig, SportConfigError};
pub use sport::Sport;
