//! Runtime configuration for Landmark.
//!
//! Settings are read from the environment with sensible defaults:
//!
//! | Variable                          | Default          |
//! |-----------------------------------|------------------|
//! | `LANDMARK_TECHNOLOGY_DEPARTMENT`  | `Technology`     |
//! | `LANDMARK_LOG`                    | `landmark=info`  |

use crate::error::{LandmarkError, Result};
use std::env;
use tracing::debug;

/// Department name that may open routes still under development.
pub const DEFAULT_TECHNOLOGY_DEPARTMENT: &str = "Technology";

/// Default tracing filter used when neither `RUST_LOG` nor `LANDMARK_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "landmark=info";

/// Environment variable overriding the development-bypass department.
pub const TECHNOLOGY_DEPARTMENT_ENV: &str = "LANDMARK_TECHNOLOGY_DEPARTMENT";

/// Environment variable overriding the default log filter.
pub const LOG_FILTER_ENV: &str = "LANDMARK_LOG";

/// Landmark runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Members of this department (exact, case-sensitive match) can click
    /// routes flagged as `developing`.
    pub technology_department: String,
    /// Tracing filter directive for the CLI.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            technology_department: DEFAULT_TECHNOLOGY_DEPARTMENT.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set but blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(department) = lookup(TECHNOLOGY_DEPARTMENT_ENV) {
            if department.trim().is_empty() {
                return Err(LandmarkError::config(format!(
                    "{} must not be empty",
                    TECHNOLOGY_DEPARTMENT_ENV
                )));
            }
            config.technology_department = department;
        }

        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            if filter.trim().is_empty() {
                return Err(LandmarkError::config(format!(
                    "{} must not be empty",
                    LOG_FILTER_ENV
                )));
            }
            config.log_filter = filter;
        }

        debug!(
            technology_department = %config.technology_department,
            log_filter = %config.log_filter,
            "Loaded configuration"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.technology_department, "Technology");
        assert_eq!(config.log_filter, "landmark=info");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            (TECHNOLOGY_DEPARTMENT_ENV, "Engineering"),
            (LOG_FILTER_ENV, "landmark=debug"),
        ]))
        .unwrap();
        assert_eq!(config.technology_department, "Engineering");
        assert_eq!(config.log_filter, "landmark=debug");
    }

    #[test]
    fn test_blank_values_rejected() {
        let result = Config::from_lookup(lookup_from(&[(TECHNOLOGY_DEPARTMENT_ENV, "  ")]));
        assert!(matches!(result, Err(LandmarkError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[(LOG_FILTER_ENV, "")]));
        assert!(matches!(result, Err(LandmarkError::Config(_))));
    }
}
