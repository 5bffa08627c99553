pub mod config;
pub mod logging;
pub mod middleware;
pub mod server;

pub use config::{Config, ConfigError};
pub use server::{build_app, run_server};
