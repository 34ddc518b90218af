use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

/// Which persistence collaborator backs the plant store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Flat JSON file, whole-document replace.
    File,
    /// MongoDB document store, atomic per-field/per-array-element updates.
    Mongo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default)]
    pub mongo_uri: String,
    #[serde(default = "default_mongo_database")]
    pub mongo_database: String,
    #[serde(default = "default_plants_file")]
    pub plants_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            mongo_uri: String::new(),
            mongo_database: default_mongo_database(),
            plants_file: default_plants_file(),
        }
    }
}

fn default_backend() -> StorageBackend { StorageBackend::File }
fn default_mongo_database() -> String { "plantario".to_string() }
fn default_plants_file() -> String { "data/plants.json".to_string() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` when present (a missing file falls back to
    /// defaults, a malformed one is an error), apply env-var overrides,
    /// then validate. Read once at process start.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.validate()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    /// Env vars win over the file: `SERVER_HOST`, then `PORT` or `SERVER_PORT`.
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        let port_var = std::env::var("PORT").or_else(|_| std::env::var("SERVER_PORT"));
        if let Some(port) = port_var.ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(0) = self.worker_threads {
            return Err(anyhow!("server.worker_threads must be >= 1 when set"));
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Fill unset values from the environment: `STORAGE_BACKEND`,
    /// `MONGO_URI`, `PLANTS_FILE`. Setting `MONGO_URI` alone selects the
    /// mongo backend, matching how the original deployment was switched.
    pub fn normalize_from_env(&mut self) {
        if let Ok(backend) = std::env::var("STORAGE_BACKEND") {
            match backend.to_ascii_lowercase().as_str() {
                "file" => self.backend = StorageBackend::File,
                "mongo" | "mongodb" => self.backend = StorageBackend::Mongo,
                _ => {}
            }
        } else if std::env::var("MONGO_URI").is_ok() {
            self.backend = StorageBackend::Mongo;
        }
        if self.mongo_uri.trim().is_empty() {
            if let Ok(uri) = std::env::var("MONGO_URI") {
                self.mongo_uri = uri;
            }
        }
        if let Ok(path) = std::env::var("PLANTS_FILE") {
            if !path.trim().is_empty() {
                self.plants_file = path;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StorageBackend::Mongo => {
                if self.mongo_uri.trim().is_empty() {
                    return Err(anyhow!(
                        "storage.mongo_uri is empty; provide it in config.toml or the MONGO_URI env var"
                    ));
                }
                let lower = self.mongo_uri.to_lowercase();
                if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
                    return Err(anyhow!(
                        "storage.mongo_uri must start with mongodb:// or mongodb+srv://"
                    ));
                }
                if self.mongo_database.trim().is_empty() {
                    return Err(anyhow!("storage.mongo_database must not be empty"));
                }
            }
            StorageBackend::File => {
                if self.plants_file.trim().is_empty() {
                    return Err(anyhow!("storage.plants_file must not be empty"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.storage.backend, StorageBackend::File);
        assert_eq!(cfg.storage.plants_file, "data/plants.json");
    }

    #[test]
    fn backend_names_are_lowercase() {
        let cfg: AppConfig = toml::from_str(
            "[storage]\nbackend = \"mongo\"\nmongo_uri = \"mongodb://localhost:27017\"\n",
        )
        .expect("parse mongo config");
        assert_eq!(cfg.storage.backend, StorageBackend::Mongo);
        assert!(cfg.storage.validate().is_ok());
    }

    #[test]
    fn mongo_backend_requires_uri() {
        let mut cfg = StorageConfig::default();
        cfg.backend = StorageBackend::Mongo;
        assert!(cfg.validate().is_err());

        cfg.mongo_uri = "postgres://nope".into();
        assert!(cfg.validate().is_err());

        cfg.mongo_uri = "mongodb+srv://cluster.example.net".into();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_port_rejected() {
        let cfg = ServerConfig { host: "0.0.0.0".into(), port: 0, worker_threads: None };
        assert!(cfg.validate().is_err());
    }
}
