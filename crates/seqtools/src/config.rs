//! Limits for the checked constructors
//!
//! The product family enumerates its whole odometer space before filtering,
//! so `permutations` of ten values walks 10^10 index tuples. The checked
//! constructors refuse such inputs up front instead of spinning.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};

/// Configuration for checked constructors and defaulted consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Largest odometer space (product of pool sizes) a checked product may walk
    pub max_odometer_space: Option<usize>,
    pub max_tee_branches: usize,
    pub join_separator: String,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            max_odometer_space: Some(10_000_000),
            max_tee_branches: 64,
            join_separator: ",".to_string(),
        }
    }
}

impl SeqConfig {
    /// Config without any limits
    pub fn unbounded() -> Self {
        Self {
            max_odometer_space: None,
            max_tee_branches: usize::MAX,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SeqConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_tee_branches == 0 {
            return Err(SeqError::ConfigError(
                "max_tee_branches must be at least 1".to_string(),
            ));
        }
        if self.max_odometer_space == Some(0) {
            return Err(SeqError::ConfigError(
                "max_odometer_space must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Reject a product over pools of these sizes if its odometer space is too large
    pub fn check_odometer_space(&self, pool_sizes: &[usize]) -> Result<usize> {
        let space = odometer_space(pool_sizes);
        if let Some(max) = self.max_odometer_space {
            if space > max {
                tracing::warn!(
                    "[SeqConfig] Rejected product over {} pools: space {} > {}",
                    pool_sizes.len(),
                    space,
                    max
                );
                return Err(SeqError::OdometerSpaceExceeded {
                    current: space,
                    max,
                });
            }
        }
        Ok(space)
    }

    pub fn check_tee_branches(&self, branches: usize) -> Result<()> {
        if branches > self.max_tee_branches {
            tracing::warn!(
                "[SeqConfig] Rejected tee: {} branches > {}",
                branches,
                self.max_tee_branches
            );
            return Err(SeqError::TooManyBranches {
                current: branches,
                max: self.max_tee_branches,
            });
        }
        Ok(())
    }
}

/// Number of index tuples an odometer over these pools visits, saturating
pub fn odometer_space(pool_sizes: &[usize]) -> usize {
    pool_sizes
        .iter()
        .fold(1usize, |acc, &size| acc.saturating_mul(size))
}
