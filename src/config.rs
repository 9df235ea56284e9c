use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::storage::ExportMode;

pub const DEFAULT_CONFIG_FILE: &str = "listing_extractor.toml";
const ENV_PREFIX: &str = "LISTING";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub export: ExportConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub pool_max_idle_per_host: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: String,
    pub mode: ExportMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Save the raw HTML of pages that look blocked.
    pub dump_html: bool,
    pub dump_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig {
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                accept_language: "fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
                timeout_seconds: 30,
                max_retries: 3,
                pool_max_idle_per_host: 6,
            },
            export: ExportConfig {
                output_dir: "pages".to_string(),
                mode: ExportMode::Full,
            },
            debug: DebugConfig {
                dump_html: true,
                dump_dir: ".".to_string(),
            },
        }
    }
}

impl Config {
    /// Defaults, then `listing_extractor.toml` if present, then `LISTING__*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let defaults = config::Config::try_from(&Config::default())
            .context("Failed to serialize default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.export.mode, ExportMode::Full);
        assert_eq!(config.export.output_dir, "pages");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[http]\ntimeout_seconds = 5\n\n[export]\nmode = \"reduced\"\noutput_dir = \"out\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.max_retries, 3);
        assert_eq!(config.export.mode, ExportMode::Reduced);
        assert_eq!(config.export.output_dir, "out");
    }
}
