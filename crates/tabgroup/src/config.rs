//! Configuration for grouping runs.
//!
//! Every section has serde defaults, so a partial `tabgroup.toml` is valid:
//!
//! ```toml
//! [grouping]
//! method = "kmeans"
//! k = 4
//! seed = 7
//!
//! [naming]
//! timeout_ms = 2000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabgroup_core::error::{CoreError, CoreResult};
use tabgroup_embeddings::EmbeddingConfig;

/// Clustering algorithm used by a grouping run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterMethod {
    /// Density-based; discovers the number of groups and leaves outliers ungrouped.
    #[default]
    Dbscan,
    /// Partitions into `k` groups; every embedded item is assigned.
    KMeans,
}

/// Options for one call to [`GroupingCoordinator::group`](crate::GroupingCoordinator::group).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingOptions {
    #[serde(default)]
    pub method: ClusterMethod,
    /// DBSCAN neighborhood radius in `1 - cosine` units.
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,
    /// DBSCAN minimum neighborhood size, the point itself included.
    #[serde(default = "default_min_points")]
    pub min_points: usize,
    /// K-means cluster count; derived from the item count when absent.
    #[serde(default)]
    pub k: Option<usize>,
    /// K-means seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pairs more similar than this get a relationship edge.
    #[serde(default = "default_visualization_threshold")]
    pub visualization_threshold: f32,
    /// K-means iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

/// Theme naming policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// Longest accepted name, in characters.
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,
    /// Per-cluster budget for the naming service.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Titles sent to the naming service per cluster.
    #[serde(default = "default_max_titles")]
    pub max_titles: usize,
}

/// Top-level configuration, usually loaded from `tabgroup.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabgroupConfig {
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub grouping: GroupingOptions,
    #[serde(default)]
    pub naming: NamingConfig,
}

// Default value functions
fn default_epsilon() -> f32 { 0.3 }
fn default_min_points() -> usize { 2 }
fn default_visualization_threshold() -> f32 { 0.5 }
fn default_max_iterations() -> usize { 100 }
fn default_max_name_len() -> usize { 30 }
fn default_timeout_ms() -> u64 { 5000 }
fn default_max_titles() -> usize { 10 }

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            method: ClusterMethod::default(),
            epsilon: default_epsilon(),
            min_points: default_min_points(),
            k: None,
            seed: None,
            visualization_threshold: default_visualization_threshold(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_name_len: default_max_name_len(),
            timeout_ms: default_timeout_ms(),
            max_titles: default_max_titles(),
        }
    }
}

impl GroupingOptions {
    /// DBSCAN with the given radius and minimum neighborhood size.
    pub fn dbscan(epsilon: f32, min_points: usize) -> Self {
        Self {
            method: ClusterMethod::Dbscan,
            epsilon,
            min_points,
            ..Self::default()
        }
    }

    /// K-means; `None` derives `k` from the item count.
    pub fn kmeans(k: Option<usize>) -> Self {
        Self {
            method: ClusterMethod::KMeans,
            k,
            ..Self::default()
        }
    }

    /// Set the K-means seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the edge threshold.
    pub fn with_visualization_threshold(mut self, threshold: f32) -> Self {
        self.visualization_threshold = threshold;
        self
    }

    /// Reject options no algorithm can honor.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(CoreError::InvalidParameter {
                name: "epsilon",
                message: "must be finite and >= 0",
            });
        }
        if self.min_points == 0 {
            return Err(CoreError::InvalidParameter {
                name: "min_points",
                message: "must be at least 1",
            });
        }
        if self.k == Some(0) {
            return Err(CoreError::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if !self.visualization_threshold.is_finite() {
            return Err(CoreError::InvalidParameter {
                name: "visualization_threshold",
                message: "must be finite",
            });
        }
        if self.max_iterations == 0 {
            return Err(CoreError::InvalidParameter {
                name: "max_iterations",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl NamingConfig {
    /// Set the naming timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the longest accepted name.
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// Reject a policy under which no cluster could ever be named.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_name_len == 0 {
            return Err(CoreError::InvalidParameter {
                name: "max_name_len",
                message: "must be at least 1",
            });
        }
        if self.timeout_ms == 0 {
            return Err(CoreError::InvalidParameter {
                name: "timeout_ms",
                message: "must be at least 1",
            });
        }
        if self.max_titles == 0 {
            return Err(CoreError::InvalidParameter {
                name: "max_titles",
                message: "must be at least 1",
            });
        }
        Ok(())
    }
}

impl TabgroupConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse tabgroup config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize tabgroup config")
    }

    pub fn validate(&self) -> Result<()> {
        self.embedding.validate().context("Invalid [embedding] section")?;
        self.grouping.validate().context("Invalid [grouping] section")?;
        self.naming.validate().context("Invalid [naming] section")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = GroupingOptions::default();
        assert_eq!(options.method, ClusterMethod::Dbscan);
        assert_eq!(options.epsilon, 0.3);
        assert_eq!(options.min_points, 2);
        assert_eq!(options.visualization_threshold, 0.5);
        assert!(options.validate().is_ok());

        let naming = NamingConfig::default();
        assert_eq!(naming.max_name_len, 30);
        assert_eq!(naming.timeout_ms, 5000);
    }

    #[test]
    fn test_partial_toml() {
        let config = TabgroupConfig::from_toml_str(
            r#"
            [grouping]
            method = "kmeans"
            k = 4
            seed = 7

            [naming]
            timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.grouping.method, ClusterMethod::KMeans);
        assert_eq!(config.grouping.k, Some(4));
        assert_eq!(config.grouping.seed, Some(7));
        assert_eq!(config.grouping.epsilon, 0.3);
        assert_eq!(config.naming.timeout_ms, 250);
        assert_eq!(config.naming.max_name_len, 30);
        assert_eq!(config.embedding.dimension, 384);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(TabgroupConfig::from_toml_str("").unwrap(), TabgroupConfig::default());
    }

    #[test]
    fn test_invalid_sections_rejected() {
        assert!(TabgroupConfig::from_toml_str("[grouping]\nk = 0\n").is_err());
        assert!(TabgroupConfig::from_toml_str("[embedding]\ndimension = 10\n").is_err());
        assert!(TabgroupConfig::from_toml_str("[grouping]\nmethod = \"spectral\"\n").is_err());
    }

    #[test]
    fn test_invalid_naming_rejected() {
        for section in ["max_titles = 0", "max_name_len = 0", "timeout_ms = 0"] {
            let err = TabgroupConfig::from_toml_str(&format!("[naming]\n{section}\n")).unwrap_err();
            assert!(err.to_string().contains("[naming]"), "{section}: {err}");
        }
        assert!(NamingConfig::default().with_max_name_len(0).validate().is_err());
        assert!(NamingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TabgroupConfig {
            grouping: GroupingOptions::kmeans(Some(3)).with_seed(1),
            ..TabgroupConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(TabgroupConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = TabgroupConfig::load("/definitely/not/here/tabgroup.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
