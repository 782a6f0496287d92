use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;

/// Production frontend origins allowed by default when ALLOWED_ORIGINS is unset.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://main.d1sj7cd70hlter.amplifyapp.com",
    "https://expense-tracker-app-three-beryl.vercel.app",
    "http://localhost:3000",
    "http://localhost:3001",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid SERVER_PORT".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::MissingEnvVar("DATABASE_URL".to_string()))?;
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid DB_MAX_CONNECTIONS".to_string()))?;
        let db_min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid DB_MIN_CONNECTIONS".to_string()))?;
        let db_acquire_timeout = env::var("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                AppError::Configuration("Invalid DB_ACQUIRE_TIMEOUT_SECONDS".to_string())
            })?;

        // Authentication config
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::MissingEnvVar("JWT_SECRET".to_string()))?;
        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| AppError::Configuration("Invalid JWT_EXPIRATION_HOURS".to_string()))?;

        // CORS config; the compiled-in default is the set of frontend origins
        // the deployed app is served from
        let allowed_origins: Vec<String> = match env::var("ALLOWED_ORIGINS") {
            Ok(s) if s.trim() == "*" => vec!["*".to_string()],
            Ok(s) => s.split(',').map(|s| s.trim().to_string()).collect(),
            Err(_) => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let config = Config {
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: db_max_connections,
                min_connections: db_min_connections,
                acquire_timeout_seconds: db_acquire_timeout,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiration_hours,
            },
            cors: CorsConfig { allowed_origins },
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        // Validate database settings
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::Configuration(
                "DB_MIN_CONNECTIONS cannot be greater than DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        if self.database.acquire_timeout_seconds == 0 {
            return Err(AppError::Configuration(
                "DB_ACQUIRE_TIMEOUT_SECONDS must be greater than 0".to_string(),
            ));
        }

        // Validate JWT settings
        if self.auth.jwt_secret.len() < 32 {
            return Err(AppError::Configuration(
                "JWT_SECRET must be at least 32 characters for security".to_string(),
            ));
        }

        if self.auth.jwt_expiration_hours < 1 {
            return Err(AppError::Configuration(
                "JWT_EXPIRATION_HOURS must be at least 1".to_string(),
            ));
        }

        // Validate CORS settings
        if self.cors.allowed_origins.is_empty() {
            return Err(AppError::Configuration(
                "ALLOWED_ORIGINS must contain at least one origin".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/expensio".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            auth: AuthConfig {
                jwt_secret: "a_test_secret_that_is_long_enough_0000".to_string(),
                jwt_expiration_hours: 24,
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }

    #[test]
    fn test_config_creation() {
        let config = test_config();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_pool_bounds() {
        let mut config = test_config();
        config.database.min_connections = 20;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.auth.jwt_secret = "short".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_origins() {
        let mut config = test_config();
        config.cors.allowed_origins.clear();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_origins_are_well_formed() {
        assert!(!DEFAULT_ALLOWED_ORIGINS.is_empty());
        for origin in DEFAULT_ALLOWED_ORIGINS {
            assert!(origin.starts_with("http://") || origin.starts_with("https://"));
        }
    }
}
