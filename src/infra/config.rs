//! Centralized configuration (environment variables + defaults).

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Address the API server binds to.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}

/// Maximum number of connections held by the Postgres pool.
pub fn db_max_connections() -> u32 {
    match std::env::var("DB_MAX_CONNECTIONS") {
        Ok(v) => v
            .parse::<u32>()
            .expect("DB_MAX_CONNECTIONS must be a valid u32")
            .max(1),
        Err(_) => 5,
    }
}
