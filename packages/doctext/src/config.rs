//! Runtime configuration, read from the environment (and a `.env` file when present).

use std::env;
use std::path::PathBuf;

/// Cache file used when nothing else is configured, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = "analyzeDocResponse.json";

/// Sample image analyzed on a cache miss when the caller names no image.
pub const DEFAULT_SAMPLE_IMAGE: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/images/lista-material-escolar.jpeg");

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cache_file: PathBuf,
    pub default_image: PathBuf,
    /// Textract region override; `None` leaves it to the AWS config chain.
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cache_file: PathBuf::from(DEFAULT_CACHE_FILE),
            default_image: PathBuf::from(DEFAULT_SAMPLE_IMAGE),
            region: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        Config {
            cache_file: get("DOCTEXT_CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_file),
            default_image: get("DOCTEXT_DEFAULT_IMAGE")
                .map(PathBuf::from)
                .unwrap_or(defaults.default_image),
            region: get("DOCTEXT_AWS_REGION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_file, PathBuf::from("analyzeDocResponse.json"));
        assert!(config.default_image.ends_with("images/lista-material-escolar.jpeg"));
    }

    #[test]
    fn test_values_override_defaults() {
        let vars: HashMap<&str, &str> = [
            ("DOCTEXT_CACHE_FILE", "/tmp/cache.json"),
            ("DOCTEXT_DEFAULT_IMAGE", "scan.png"),
            ("DOCTEXT_AWS_REGION", "sa-east-1"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.cache_file, PathBuf::from("/tmp/cache.json"));
        assert_eq!(config.default_image, PathBuf::from("scan.png"));
        assert_eq!(config.region.as_deref(), Some("sa-east-1"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }
}
