pub mod config;
pub mod error;

pub use config::{CommuneConfig, DatabaseConfig, Environment};
pub use error::{CommuneError, Result};
