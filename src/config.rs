use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CompanionConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ModelConfig {
    pub provider: String,
    pub model: String,
    /// Left empty in the file; normally supplied via `GOOGLE_API_KEY`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on concurrent branches in a comparison. `0` means one per personality.
    pub max_concurrency: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            log_level: "info".into(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".into(),
            model: "gemini-2.5-flash".into(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".into(),
            timeout_secs: 60,
            temperature: None,
        }
    }
}

/// Returns `~/.companion/`
pub fn default_companion_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".companion")
}

/// Returns the default config file path: `~/.companion/config.toml`
pub fn default_config_path() -> PathBuf {
    default_companion_dir().join("config.toml")
}

impl CompanionConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply `.env` and env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            CompanionConfig::default()
        };

        // A missing .env is normal.
        let _ = dotenvy::dotenv();

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides (GOOGLE_API_KEY, GEMINI_API_KEY,
    /// COMPANION_MODEL, COMPANION_HOST, COMPANION_PORT, COMPANION_LOG_LEVEL).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(val) = non_empty_env("GOOGLE_API_KEY").or_else(|| non_empty_env("GEMINI_API_KEY")) {
            self.model.api_key = Some(val);
        }
        if let Some(val) = non_empty_env("COMPANION_MODEL") {
            self.model.model = val;
        }
        if let Some(val) = non_empty_env("COMPANION_HOST") {
            self.server.host = val;
        }
        if let Some(val) = non_empty_env("COMPANION_PORT") {
            self.server.port = val
                .parse()
                .with_context(|| format!("COMPANION_PORT is not a valid port: {val}"))?;
        }
        if let Some(val) = non_empty_env("COMPANION_LOG_LEVEL") {
            self.server.log_level = val;
        }
        Ok(())
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CompanionConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.model.provider, "gemini");
        assert_eq!(config.model.model, "gemini-2.5-flash");
        assert!(config.model.api_key.is_none());
        assert_eq!(config.engine.max_concurrency, 0);
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
port = 9090

[model]
model = "gemini-2.5-pro"
temperature = 0.4

[engine]
max_concurrency = 2
"#;
        let config: CompanionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.model.model, "gemini-2.5-pro");
        assert_eq!(config.model.temperature, Some(0.4));
        assert_eq!(config.engine.max_concurrency, 2);
        // defaults still apply for unset fields
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.model.timeout_secs, 60);
    }

    #[test]
    fn load_from_file_and_env_overrides_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nlog_level = \"debug\"\n").unwrap();

        std::env::set_var("COMPANION_MODEL", "gemini-test");
        std::env::set_var("COMPANION_PORT", "7001");

        let config = CompanionConfig::load_from(&path).unwrap();

        assert_eq!(config.server.log_level, "debug");
        assert_eq!(config.model.model, "gemini-test");
        assert_eq!(config.server.port, 7001);

        // Clean up
        std::env::remove_var("COMPANION_MODEL");
        std::env::remove_var("COMPANION_PORT");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CompanionConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.model.provider, "gemini");
    }
}
