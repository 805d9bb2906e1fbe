use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub default_country: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("FESTGELD_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FESTGELD_HOST: {e}"))?;

        let port: u16 = env_or("FESTGELD_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FESTGELD_PORT: {e}"))?;

        let max_body_size: usize = env_or("FESTGELD_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid FESTGELD_MAX_BODY_SIZE: {e}"))?;

        let cors_origins: Vec<String> = env_or("FESTGELD_CORS_ORIGINS", "")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let log_level = env_or("FESTGELD_LOG_LEVEL", "info");
        let default_country = env_or("FESTGELD_DEFAULT_COUNTRY", "Deutschland");

        if jwt_secret.len() < 16 {
            return Err("JWT_SECRET must be at least 16 characters".to_string());
        }

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            max_body_size,
            cors_origins,
            log_level,
            default_country,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
