use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageBackend {
    /// One JSON file per entity type, rewritten on every mutation
    File,
    /// Process-local, lost on restart
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub items_file: String,
    pub users_file: String,
}

// bcrypt rejects costs outside this range
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,
    pub token_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_cors: bool,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

impl StorageConfig {
    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(&self.items_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        // Server overrides
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Storage overrides
        if let Some(v) = var("STORAGE_BACKEND") {
            self.storage.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                _ => self.storage.backend,
            };
        }
        if let Some(v) = var("DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Some(v) = var("ITEMS_FILE") {
            self.storage.items_file = v;
        }
        if let Some(v) = var("USERS_FILE") {
            self.storage.users_file = v;
        }

        // Security overrides
        if let Some(v) = var("BCRYPT_COST") {
            self.security.bcrypt_cost = v
                .parse()
                .ok()
                .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
                .unwrap_or(self.security.bcrypt_cost);
        }
        if let Some(v) = var("TOKEN_BYTES") {
            self.security.token_bytes = v
                .parse()
                .ok()
                .filter(|n| *n >= 16)
                .unwrap_or(self.security.token_bytes);
        }

        // API overrides
        if let Some(v) = var("API_ENABLE_CORS") {
            self.api.enable_cors = v.parse().unwrap_or(self.api.enable_cors);
        }
        if let Some(v) = var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Some(v) = var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            security: SecurityConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
                token_bytes: 32,
            },
            api: ApiConfig {
                enable_cors: true,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            security: SecurityConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
                token_bytes: 32,
            },
            api: ApiConfig {
                enable_cors: true,
                enable_request_logging: true,
                max_request_size_bytes: 256 * 1024,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            security: SecurityConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
                token_bytes: 32,
            },
            api: ApiConfig {
                enable_cors: false,
                enable_request_logging: false,
                max_request_size_bytes: 64 * 1024,
            },
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("."),
            items_file: "items.json".to_string(),
            users_file: "users.json".to_string(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
