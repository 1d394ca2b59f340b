//! Generator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default cap on accepted combinations.
pub const DEFAULT_MAX_COMBINATIONS: usize = 500_000;

/// Default number of combinations kept per shape bucket.
pub const DEFAULT_MAX_PER_SHAPE: usize = 10;

/// Output bounds for the combination generator.
///
/// # Examples
///
/// ```
/// use u_timetable::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_max_combinations(10_000)
///     .with_max_per_shape(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Search stops once this many combinations have been accepted.
    ///
    /// A safety valve against combinatorial blowup, not a ranking cutoff:
    /// the accepted subset is whatever the search reached first.
    pub max_combinations: usize,

    /// Combinations stored per shape bucket. Further combinations with the
    /// same shape are counted but not stored in the bucket.
    pub max_per_shape: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
            max_per_shape: DEFAULT_MAX_PER_SHAPE,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_combinations(mut self, n: usize) -> Self {
        self.max_combinations = n;
        self
    }

    pub fn with_max_per_shape(mut self, n: usize) -> Self {
        self.max_per_shape = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_combinations == 0 {
            return Err(Error::InvalidConfig(
                "max_combinations must be positive".into(),
            ));
        }
        if self.max_per_shape == 0 {
            return Err(Error::InvalidConfig("max_per_shape must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.max_combinations, 500_000);
        assert_eq!(config.max_per_shape, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_cap() {
        let config = GeneratorConfig::default().with_max_combinations(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_bucket() {
        let config = GeneratorConfig::default().with_max_per_shape(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "max_combinations": 1000 }"#).unwrap();
        assert_eq!(config.max_combinations, 1000);
        assert_eq!(config.max_per_shape, DEFAULT_MAX_PER_SHAPE);
    }
}
