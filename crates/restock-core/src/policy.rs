//! Decision thresholds, loadable from a TOML profile.
//!
//! The defaults are the constants the planning desk has always run with; a
//! profile file only exists so a category manager can trial different cover
//! targets without a rebuild.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Thresholds driving the send/recall rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecisionPolicy {
    /// Length of the fixed sales reporting window, in days.
    pub window_days: f64,
    /// Cover target a fulfillment center is stocked towards, in days.
    pub target_cover_days: f64,
    /// Return percentage above which sending is off the table.
    pub max_return_pct: f64,
    /// Central stock a send decision requires, in units.
    pub min_central_units: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            window_days: 30.0,
            target_cover_days: 45.0,
            max_return_pct: 30.0,
            min_central_units: 45.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse policy file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl DecisionPolicy {
    /// Loads a policy profile from a TOML file; missing keys keep defaults.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let contents = fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| PolicyError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_planning_constants() {
        let policy = DecisionPolicy::default();
        assert_eq!(policy.window_days, 30.0);
        assert_eq!(policy.target_cover_days, 45.0);
        assert_eq!(policy.max_return_pct, 30.0);
        assert_eq!(policy.min_central_units, 45.0);
    }

    #[test]
    fn partial_profile_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "target_cover_days = 60.0").unwrap();
        let policy = DecisionPolicy::load(file.path()).expect("load policy");
        assert_eq!(policy.target_cover_days, 60.0);
        assert_eq!(policy.window_days, 30.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cover_target = 60.0").unwrap();
        let err = DecisionPolicy::load(file.path()).unwrap_err();
        assert!(matches!(err, PolicyError::Toml { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DecisionPolicy::load(Path::new("no/such/policy.toml")).unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
