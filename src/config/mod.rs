use std::env;
use std::io;

pub const API_PREFIX: &str = "/api";
pub const PUBLIC_UPLOADS_PREFIX: &str = "/uploads";
pub const UPLOADS_DIR: &str = "uploads";
pub const UPLOAD_FIELD: &str = "file";

/// 5 MiB
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("PORT must be a number, got {:?}", raw))
            })?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "DATABASE_URL must be set"))?;

        Ok(Config { port, database_url })
    }

    pub fn bind_address(&self) -> (&'static str, u16) {
        ("0.0.0.0", self.port)
    }
}
