// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used by the calculator service

// Server Configuration
pub const CALCULATOR_PORT: &str = "CALCULATOR_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const CALCULATOR_HOST: &str = "CALCULATOR_HOST";

// CORS Configuration
pub const CALCULATOR_CORS_ORIGIN: &str = "CALCULATOR_CORS_ORIGIN";

// Database Configuration
pub const CALCULATOR_DATABASE_PATH: &str = "CALCULATOR_DATABASE_PATH";
pub const CALCULATOR_DB_MAX_CONNECTIONS: &str = "CALCULATOR_DB_MAX_CONNECTIONS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_PORT: u16 = 4001;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_FILTER: &str = "warn,calculator=info,tower_http=info";
