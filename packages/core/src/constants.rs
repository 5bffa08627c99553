use std::env;
use std::path::PathBuf;

/// File name of the SQLite database inside the calculator directory
pub const DATABASE_FILE_NAME: &str = "calculator.db";

/// Get the path to the calculator data directory (~/.calculator)
pub fn calculator_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".calculator")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".calculator")
    }
}

/// Get the default database path (~/.calculator/calculator.db)
pub fn default_database_path() -> PathBuf {
    calculator_dir().join(DATABASE_FILE_NAME)
}
