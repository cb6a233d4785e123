//! Configuration for the command-line batch driver.
//!
//! The extraction core takes no configuration; these settings only decide
//! which files are collected and how results are printed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names searched in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["smartmetrics.yaml", ".smartmetrics.yaml"];

/// Output formats understood by the CLI.
pub const FORMATS: &[&str] = &["pretty", "json"];

/// Template written by `smartmetrics init`.
pub const TEMPLATE: &str = include_str!("templates/smartmetrics.yaml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub version: String,
    /// Glob patterns for paths to skip while walking directories (e.g., "**/vendor/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Follow symbolic links while walking directories (default: true)
    #[serde(default)]
    pub follow_links: Option<bool>,
    /// Skip directories whose name starts with '.' (default: true)
    #[serde(default)]
    pub skip_hidden: Option<bool>,
    /// Files larger than this are reported as skipped instead of analyzed
    #[serde(default)]
    pub max_file_bytes: Option<u64>,
    /// Worker threads for parallel analysis (default: one per core)
    #[serde(default)]
    pub threads: Option<usize>,
    /// "pretty" (default) or "json"
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1".to_string(),
            excluded_paths: Vec::new(),
            follow_links: None,
            skip_hidden: None,
            max_file_bytes: None,
            threads: None,
            format: None,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path.display(), e))?;
        Self::parse_str(&content)
            .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))
    }

    /// Parse a config from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn should_follow_links(&self) -> bool {
        self.follow_links.unwrap_or(true)
    }

    pub fn should_skip_hidden(&self) -> bool {
        self.skip_hidden.unwrap_or(true)
    }

    /// Returns the output format (defaults to "pretty").
    pub fn get_format(&self) -> &str {
        self.format.as_deref().unwrap_or("pretty")
    }

    /// Build a matcher for `excluded_paths`.
    pub fn exclusion_matcher(&self) -> anyhow::Result<globset::GlobSet> {
        let mut builder = globset::GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            let glob = globset::Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("excluded path {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }
}

/// Find a config file in `dir`.
pub fn discover(dir: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Load the explicit config, else a discovered one, else the defaults.
pub fn load(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::parse_file(path),
        None => match discover(dir) {
            Some(path) => {
                tracing::debug!(config = %path.display(), "using discovered config");
                Config::parse_file(path)
            }
            None => Ok(Config::default()),
        },
    }
}

/// Check a config for values the driver cannot honor.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if let Some(format) = &config.format {
        if !FORMATS.contains(&format.as_str()) {
            anyhow::bail!(
                "invalid format {:?}, must be one of: {}",
                format,
                FORMATS.join(", ")
            );
        }
    }

    if config.threads == Some(0) {
        anyhow::bail!("threads must be at least 1");
    }

    if config.max_file_bytes == Some(0) {
        anyhow::bail!("max_file_bytes must be at least 1");
    }

    config.exclusion_matcher()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
version: "1"
excluded_paths:
  - "**/vendor/**"
  - "**/generated/*.java"
follow_links: false
skip_hidden: false
max_file_bytes: 2048
threads: 2
format: json
"#;
        let config = Config::parse_str(yaml).unwrap();
        assert_eq!(config.excluded_paths.len(), 2);
        assert!(!config.should_follow_links());
        assert!(!config.should_skip_hidden());
        assert_eq!(config.max_file_bytes, Some(2048));
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.get_format(), "json");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse_str("").unwrap();
        assert!(config.should_follow_links());
        assert!(config.should_skip_hidden());
        assert_eq!(config.get_format(), "pretty");
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_template_parses() {
        let config = Config::parse_str(TEMPLATE).unwrap();
        assert!(validate(&config).is_ok());
        let matcher = config.exclusion_matcher().unwrap();
        assert!(matcher.is_match("app/vendor/lib/x.php"));
    }

    #[test]
    fn test_exclusion_matcher() {
        let config = Config {
            excluded_paths: vec!["**/vendor/**".to_string()],
            ..Default::default()
        };
        let matcher = config.exclusion_matcher().unwrap();
        assert!(matcher.is_match("src/vendor/a.php"));
        assert!(!matcher.is_match("src/app/a.php"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_format = Config {
            format: Some("xml".to_string()),
            ..Default::default()
        };
        assert!(validate(&bad_format).is_err());

        let zero_threads = Config {
            threads: Some(0),
            ..Default::default()
        };
        assert!(validate(&zero_threads).is_err());

        let zero_size = Config {
            max_file_bytes: Some(0),
            ..Default::default()
        };
        assert!(validate(&zero_size).is_err());

        let bad_glob = Config {
            excluded_paths: vec!["src/[".to_string()],
            ..Default::default()
        };
        assert!(validate(&bad_glob).is_err());
    }

    #[test]
    fn test_discover_and_load() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());
        let config = load(None, temp.path()).unwrap();
        assert_eq!(config.get_format(), "pretty");

        std::fs::write(temp.path().join(".smartmetrics.yaml"), "format: json\n").unwrap();
        assert!(discover(temp.path()).is_some());
        let config = load(None, temp.path()).unwrap();
        assert_eq!(config.get_format(), "json");

        let explicit = temp.path().join("other.yaml");
        std::fs::write(&explicit, "threads: 3\n").unwrap();
        let config = load(Some(&explicit), temp.path()).unwrap();
        assert_eq!(config.threads, Some(3));
    }

    #[test]
    fn test_unknown_file_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        assert!(load(Some(&missing), temp.path()).is_err());
    }
}
