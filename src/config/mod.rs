/// Database configuration and connection management
pub mod database;

/// Category seed configuration from config.toml
pub mod categories;
