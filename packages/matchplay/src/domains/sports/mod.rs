pub mod models;

pub use models::{Sport, SportCatalog, SportConfig, SportConfigError};
