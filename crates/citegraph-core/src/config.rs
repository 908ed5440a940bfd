use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GraphError;

/// Parameters for a single preferential-attachment growth run.
///
/// ```toml
/// target_node_count = 27770
/// seed_connection_count = 12
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Total number of nodes in the grown graph (`N`).
    #[serde(default = "default_target_node_count")]
    pub target_node_count: usize,
    /// Size of the complete seed graph and number of draws per added node (`m`).
    #[serde(default = "default_seed_connection_count")]
    pub seed_connection_count: usize,
    /// RNG seed. `None` draws from OS entropy and makes the run irreproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            target_node_count: default_target_node_count(),
            seed_connection_count: default_seed_connection_count(),
            seed: None,
        }
    }
}

impl GrowthConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not valid TOML for this shape.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse growth config")
    }

    /// Load a config file, falling back to defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Check the parameters a growth run cannot work with.
    ///
    /// `seed_connection_count > target_node_count` is accepted: growth then
    /// adds nothing and the seed graph is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConfiguration`] when
    /// `seed_connection_count` is zero.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.seed_connection_count == 0 {
            return Err(GraphError::InvalidConfiguration(
                "seed_connection_count must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

// Size and truncated mean out-degree of the physics citation graph the
// analysis was first run against.
const fn default_target_node_count() -> usize {
    27_770
}

const fn default_seed_connection_count() -> usize {
    12
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn make_temp_dir(label: &str) -> std::path::PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("citegraph-config-test-{label}-{id}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir must be created");
        dir
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = GrowthConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, GrowthConfig::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = GrowthConfig::from_toml_str(
            "target_node_count = 100\nseed_connection_count = 3\nseed = 7\n",
        )
        .expect("valid config");
        assert_eq!(config.target_node_count, 100);
        assert_eq!(config.seed_connection_count, 3);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(GrowthConfig::from_toml_str("target_node_count = \"many\"").is_err());
    }

    #[test]
    fn zero_seed_connections_is_invalid() {
        let config = GrowthConfig {
            seed_connection_count: 0,
            ..GrowthConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GraphError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn more_seeds_than_targets_is_allowed() {
        let config = GrowthConfig {
            target_node_count: 2,
            seed_connection_count: 5,
            seed: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = make_temp_dir("missing");
        let config = GrowthConfig::load(&dir.join("growth.toml")).expect("defaults");
        assert_eq!(config, GrowthConfig::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = make_temp_dir("read");
        let path = dir.join("growth.toml");
        std::fs::write(&path, "seed_connection_count = 4\nseed = 1\n").expect("write config");

        let config = GrowthConfig::load(&path).expect("config loads");
        assert_eq!(config.seed_connection_count, 4);
        assert_eq!(config.target_node_count, 27_770);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = make_temp_dir("bad");
        let path = dir.join("growth.toml");
        std::fs::write(&path, "seed = [").expect("write config");

        let err = GrowthConfig::load(&path).expect_err("invalid toml");
        assert!(err.to_string().contains("growth.toml"));
    }
}
