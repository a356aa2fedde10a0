//! # Configuration
//!
//! Immutable configuration for the state-query core.

use std::collections::BTreeSet;

/// Purposes whose default mode list excludes the relaxed mode.
pub const MODE_SENSITIVE_PURPOSES: [&str; 7] = [
    "RegisterIdentity",
    "AddIdentity",
    "AddAccessor",
    "RevokeAccessor",
    "RevokeIdentityAssociation",
    "UpdateIdentityModeList",
    "RevokeAndAddAccessor",
];

/// Configuration for the state-query core.
///
/// Built once at start-up and passed by reference to the policy resolver and
/// the codec.
#[derive(Debug, Clone)]
pub struct StateQueryConfig {
    /// Purposes for which the default mode list omits `relaxed_mode`.
    pub mode_sensitive_purposes: BTreeSet<String>,

    /// Modes every default policy contains (default: [2, 3]).
    pub default_modes: Vec<i32>,

    /// Mode added in front of the defaults for non-sensitive purposes
    /// (default: 1).
    pub relaxed_mode: i32,

    /// Maximum encoded size of one stored record (default: 4 MiB).
    pub max_record_bytes: u64,
}

impl Default for StateQueryConfig {
    fn default() -> Self {
        Self {
            mode_sensitive_purposes: MODE_SENSITIVE_PURPOSES
                .iter()
                .map(|purpose| purpose.to_string())
                .collect(),
            default_modes: vec![2, 3],
            relaxed_mode: 1,
            max_record_bytes: 4 * 1024 * 1024,
        }
    }
}

impl StateQueryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the set of mode-sensitive purposes.
    pub fn with_mode_sensitive_purposes<I, P>(mut self, purposes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.mode_sensitive_purposes = purposes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_modes(mut self, modes: Vec<i32>) -> Self {
        self.default_modes = modes;
        self
    }

    pub fn with_relaxed_mode(mut self, mode: i32) -> Self {
        self.relaxed_mode = mode;
        self
    }

    pub fn with_max_record_bytes(mut self, limit: u64) -> Self {
        self.max_record_bytes = limit;
        self
    }

    pub fn is_mode_sensitive(&self, purpose: &str) -> bool {
        self.mode_sensitive_purposes.contains(purpose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StateQueryConfig::default();
        assert_eq!(config.default_modes, vec![2, 3]);
        assert_eq!(config.relaxed_mode, 1);
        assert!(config.is_mode_sensitive("AddAccessor"));
        assert!(config.is_mode_sensitive("RevokeAndAddAccessor"));
        assert!(!config.is_mode_sensitive("CreateRequest"));
        assert!(!config.is_mode_sensitive(""));
    }

    #[test]
    fn test_builder() {
        let config = StateQueryConfig::new()
            .with_mode_sensitive_purposes(["Custom"])
            .with_default_modes(vec![3])
            .with_max_record_bytes(128);
        assert!(config.is_mode_sensitive("Custom"));
        assert!(!config.is_mode_sensitive("AddAccessor"));
        assert_eq!(config.default_modes, vec![3]);
        assert_eq!(config.max_record_bytes, 128);
    }
}
