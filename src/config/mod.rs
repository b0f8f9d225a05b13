/// Database configuration, connection management and schema creation
pub mod database;

/// Reference data loading from seed.toml
pub mod seed;
