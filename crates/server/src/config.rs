use utils::env::{parse_or, var_or};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://page_studio.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `DATABASE_URL`; call after loading `.env`.
    pub fn from_env() -> Self {
        Self {
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 3001),
            database_url: var_or("DATABASE_URL", DEFAULT_DATABASE_URL),
        }
    }
}
