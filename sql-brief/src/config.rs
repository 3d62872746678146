//! Configuration for profiling and schema annotation.
//!
//! Thresholds are passed explicitly to the profiler and annotator at
//! construction. Every field has a documented default, and a configuration can
//! be loaded from JSON with missing fields falling back to those defaults.
//!
//! # Example
//!
//! ```rust
//! use sql_brief::config::BriefConfig;
//!
//! let config = BriefConfig::default()
//!     .with_many_uniques_threshold(20)
//!     .with_seed(7);
//! assert_eq!(config.split_size(), 10);
//!
//! let loaded = BriefConfig::from_json_str(r#"{"sample_size": 3}"#).unwrap();
//! assert_eq!(loaded.sample_size, 3);
//! assert_eq!(loaded.many_uniques_threshold, 10);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{BriefError, BriefResult};

/// Default distinct-count above which a column is sampled instead of listed.
pub const DEFAULT_MANY_UNIQUES_THRESHOLD: usize = 10;
/// Default number of example samples drawn from high-cardinality columns.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;
/// Default number of sample values injected per schema line.
pub const DEFAULT_MAX_UNIQUE: usize = 5;

/// Settings shared by the column profiler and the schema annotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BriefConfig {
    /// Distinct non-null count above which sampling and top/bottom splitting
    /// kick in (default: 10)
    pub many_uniques_threshold: usize,
    /// Number of example samples drawn when a column has many distinct values
    /// (default: 5)
    pub sample_size: usize,
    /// Maximum sample values listed per annotated schema line (default: 5)
    pub max_unique: usize,
    /// Seed for the sampling step. `None` draws from OS entropy, so repeated
    /// runs may pick different samples.
    pub seed: Option<u64>,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            many_uniques_threshold: DEFAULT_MANY_UNIQUES_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
            max_unique: DEFAULT_MAX_UNIQUE,
            seed: None,
        }
    }
}

impl BriefConfig {
    /// Sets the many-uniques threshold.
    pub fn with_many_uniques_threshold(mut self, threshold: usize) -> Self {
        self.many_uniques_threshold = threshold;
        self
    }

    /// Sets the number of example samples.
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the maximum number of sample values per schema line.
    pub fn with_max_unique(mut self, max_unique: usize) -> Self {
        self.max_unique = max_unique;
        self
    }

    /// Fixes the sampling seed for reproducible summaries.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of entries in each half of a top/bottom split.
    pub fn split_size(&self) -> usize {
        self.many_uniques_threshold / 2
    }

    /// Checks that the configuration can drive a profiling run.
    pub fn validate(&self) -> BriefResult<()> {
        if self.many_uniques_threshold == 0 {
            return Err(BriefError::configuration(
                "many_uniques_threshold must be at least 1",
            ));
        }
        if self.sample_size == 0 {
            return Err(BriefError::configuration("sample_size must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> BriefResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BriefConfig::default();
        assert_eq!(config.many_uniques_threshold, 10);
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.max_unique, 5);
        assert_eq!(config.seed, None);
        assert_eq!(config.split_size(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_split_size_floors() {
        let config = BriefConfig::default().with_many_uniques_threshold(7);
        assert_eq!(config.split_size(), 3);
    }

    #[test]
    fn test_from_json_partial() {
        let config = BriefConfig::from_json_str(r#"{"seed": 42, "max_unique": 2}"#).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_unique, 2);
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let err = BriefConfig::from_json_str(r#"{"many_uniques_threshold": 0}"#).unwrap_err();
        assert!(matches!(err, BriefError::Configuration(_)));

        let err = BriefConfig::default().with_sample_size(0).validate().unwrap_err();
        assert!(err.to_string().contains("sample_size"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = BriefConfig::from_json_str("sample_size = 3").unwrap_err();
        assert!(matches!(err, BriefError::Serialization(_)));
    }
}
