use std::path::{Path, PathBuf};

use bondex_core::MatchGroup;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = "bondex";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ExtractionConfig {
    /// Profile used when the CLI is given neither groups nor a profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Named group lists, in file order.
    #[serde(default)]
    pub profiles: IndexMap<String, Vec<MatchGroup>>,
}

impl ExtractionConfig {
    pub fn profile(&self, name: &str) -> anyhow::Result<&[MatchGroup]> {
        self.profiles.get(name).map(Vec::as_slice).ok_or_else(|| {
            let known: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            anyhow::anyhow!(
                "Unknown profile '{name}'. Known profiles: {}",
                if known.is_empty() {
                    "(none)".to_string()
                } else {
                    known.join(", ")
                }
            )
        })
    }

    /// Groups of the configured default profile, if one is set.
    pub fn default_groups(&self) -> anyhow::Result<Option<&[MatchGroup]>> {
        self.default_profile
            .as_deref()
            .map(|name| self.profile(name))
            .transpose()
    }
}

pub const CONFIG_TEMPLATE: &str = r#"{
  "logging": {
    "level": "info"
  },
  "extraction": {
    "default_profile": "exchangeable-bond",
    "profiles": {
      "exchangeable-bond": [
        {
          "标的证券": "*自定义*",
          "换股期限": "*自定义*"
        }
      ],
      "bond-terms": [
        {
          "债券代码": "*自定义*",
          "发行日期": "*自定义*",
          "起息日": "*自定义*",
          "到期日": "*自定义*",
          "利率": "*自定义*",
          "规模": "*自定义*"
        },
        {
          "联系人": "*自定义*",
          "电话": "*自定义*",
          "邮箱": "*自定义*"
        }
      ]
    }
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'bondex init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        tracing::debug!(
            "Loaded config from {} ({} profiles)",
            path.display(),
            config.extraction.profiles.len()
        );
        Ok(config)
    }

    /// Load the user config, or fall back to defaults when none exists.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        Self::create_config_in(&config_dir)
    }

    /// Write the template into `dir`; refuses to overwrite an existing file.
    pub fn create_config_in(dir: &Path) -> anyhow::Result<PathBuf> {
        let config_path = dir.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use bondex_core::PatternSource;

    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_parses() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");

        assert_eq!(config.logging.level, "info");
        let groups = config
            .extraction
            .default_groups()
            .expect("default profile exists")
            .expect("default profile is set");
        assert_eq!(groups.len(), 1);
        let keys: Vec<&str> = groups[0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["标的证券", "换股期限"]);
        assert!(groups[0].values().all(PatternSource::is_predefined));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_sections_use_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty object is valid");
        assert_eq!(config, Config::default());
        assert!(
            config
                .extraction
                .default_groups()
                .expect("no default is fine")
                .is_none()
        );
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn unknown_profile_lists_known_names() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).expect("template is valid");
        let err = config
            .extraction
            .profile("missing")
            .expect_err("profile should not exist");
        let message = err.to_string();
        assert!(message.contains("exchangeable-bond"));
        assert!(message.contains("bond-terms"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn create_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = Config::create_config_in(dir.path()).expect("config created");
        let config = Config::load_from(&path).expect("config loads");
        assert_eq!(config.extraction.profiles.len(), 2);

        assert!(Config::create_config_in(dir.path()).is_err());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write file");

        let err = Config::load_from(&path).expect_err("invalid JSON should fail");
        assert!(err.to_string().contains("config.json"));
    }
}
