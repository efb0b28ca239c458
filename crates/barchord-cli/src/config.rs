use barchord_core::{AnalysisOptions, ErrorPolicy};
use std::path::{Path, PathBuf};

#[derive(serde::Serialize, serde::Deserialize, Default, Debug, PartialEq)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisOptions,
    #[serde(default)]
    pub keep_going: bool,
}

impl AppConfig {
    pub(crate) fn error_policy(&self) -> ErrorPolicy {
        if self.keep_going {
            ErrorPolicy::SkipBar
        } else {
            ErrorPolicy::Abort
        }
    }
}

pub(crate) fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barchord")
        .join("config.toml")
}

/// Load an explicitly requested config file; errors are fatal.
pub(crate) fn load_config_from(path: &Path) -> anyhow::Result<AppConfig> {
    use anyhow::Context;

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

/// Load the per-user config file, falling back to defaults.
pub(crate) fn load_config() -> AppConfig {
    let path = config_path();
    let Ok(text) = std::fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    match toml::from_str(&text) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "Loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            "keep_going = true\n[analysis]\ninclude_diminished = true\nbias_own_root = true\n",
        )
        .unwrap();
        assert!(config.keep_going);
        assert!(config.analysis.include_diminished);
        assert!(!config.analysis.bias_own_mode);
        assert!(config.analysis.bias_own_root);
        assert_eq!(config.error_policy(), ErrorPolicy::SkipBar);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.error_policy(), ErrorPolicy::Abort);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = AppConfig {
            analysis: AnalysisOptions { bias_own_mode: true, ..Default::default() },
            keep_going: false,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<AppConfig>(&text).unwrap(), config);
    }
}
