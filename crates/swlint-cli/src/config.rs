//! Configuration file support for swlint
//!
//! Loads `.swlint.toml` from the current directory or parent directories.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use swlint_core::Severity;

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default environment when the CLI flag is absent
    pub environment: Option<String>,
    pub shopware: ShopwareConfig,
    /// JavaScript rule severity overrides
    pub rules: BTreeMap<String, Severity>,
    pub style: StyleConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShopwareConfig {
    /// Target Shopware version (e.g., "6.7.0.0")
    /// Version-gated rules below this are excluded
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Style rule severity overrides
    pub rules: BTreeMap<String, Severity>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

impl Config {
    /// Load config from `.swlint.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(".swlint.toml");
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Compute the effective severity overrides for the composed rule set.
    /// Explicit `--rule` flags replace the config file selection entirely.
    pub fn effective_overrides(
        &self,
        all_rules: &[&str],
        cli_rules: &[String],
    ) -> BTreeMap<String, Severity> {
        if cli_rules.is_empty() {
            return self.rules.clone();
        }

        let mut overrides = BTreeMap::new();
        for name in all_rules {
            let severity = if cli_rules.iter().any(|r| r == name) {
                Severity::Error
            } else {
                Severity::Off
            };
            overrides.insert(name.to_string(), severity);
        }
        overrides
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            // Simple directory matching for patterns like "vendor/"
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(dir: &Path, content: &str) {
        fs::write(dir.join(".swlint.toml"), content).unwrap();
    }

    #[test]
    fn test_load_basic_config() {
        let temp = TempDir::new().unwrap();
        create_config(
            temp.path(),
            r#"
environment = "administration"

[shopware]
version = "6.7.0.0"

[rules]
"state-import" = "warn"
"no-src-import" = "off"

[style.rules]
"no-scss-extension-import" = "warn"

[paths]
exclude = ["vendor/", "*.spec.js"]

[output]
format = "json"
"#,
        );

        let (config, path) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert_eq!(path, temp.path().join(".swlint.toml"));
        assert_eq!(config.environment.as_deref(), Some("administration"));
        assert_eq!(config.shopware.version.as_deref(), Some("6.7.0.0"));
        assert_eq!(config.rules.get("state-import"), Some(&Severity::Warn));
        assert_eq!(config.rules.get("no-src-import"), Some(&Severity::Off));
        assert_eq!(
            config.style.rules.get("no-scss-extension-import"),
            Some(&Severity::Warn)
        );
        assert_eq!(
            config.paths.exclude,
            vec!["vendor/".to_string(), "*.spec.js".to_string()]
        );
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "");

        let (config, _) = Config::load_from(temp.path().to_path_buf())
            .unwrap()
            .unwrap();

        assert!(config.environment.is_none());
        assert!(config.shopware.version.is_none());
        assert!(config.rules.is_empty());
        assert!(config.paths.exclude.is_empty());
    }

    #[test]
    fn test_search_walks_upward() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[shopware]\nversion = \"6.6\"\n");
        let nested = temp.path().join("custom/plugins/MyPlugin");
        fs::create_dir_all(&nested).unwrap();

        let (config, path) = Config::load_from(nested).unwrap().unwrap();
        assert_eq!(path, temp.path().join(".swlint.toml"));
        assert_eq!(config.shopware.version.as_deref(), Some("6.6"));
    }

    #[test]
    fn test_no_config_found() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(temp.path().to_path_buf()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_severity_is_an_error() {
        let temp = TempDir::new().unwrap();
        create_config(temp.path(), "[rules]\n\"state-import\" = \"loud\"\n");

        assert!(Config::load_from(temp.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_effective_overrides_cli_override() {
        let mut config = Config::default();
        config
            .rules
            .insert("state-import".to_string(), Severity::Warn);
        let all_rules = &["no-src-import", "no-snippet-import", "state-import"];
        let cli_rules = vec!["no-src-import".to_string()];

        let overrides = config.effective_overrides(all_rules, &cli_rules);

        assert_eq!(overrides.get("no-src-import"), Some(&Severity::Error));
        assert_eq!(overrides.get("no-snippet-import"), Some(&Severity::Off));
        assert_eq!(overrides.get("state-import"), Some(&Severity::Off));
    }

    #[test]
    fn test_effective_overrides_from_config() {
        let mut config = Config::default();
        config
            .rules
            .insert("state-import".to_string(), Severity::Warn);

        let overrides = config.effective_overrides(&["state-import"], &[]);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("state-import"), Some(&Severity::Warn));
    }

    #[test]
    fn test_should_exclude_glob() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["*.spec.js".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("cart.spec.js")));
        assert!(!config.should_exclude(Path::new("cart.js")));
    }

    #[test]
    fn test_should_exclude_directory() {
        let config = Config {
            paths: PathsConfig {
                exclude: vec!["vendor/".to_string()],
            },
            ..Default::default()
        };

        assert!(config.should_exclude(Path::new("project/vendor/lib.js")));
        assert!(config.should_exclude(Path::new("vendor/lib.js")));
        assert!(!config.should_exclude(Path::new("src/vendor.js")));
    }
}
