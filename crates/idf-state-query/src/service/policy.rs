//! Policy lookups: allowed modes, namespace policy, first-IdP minimum IAL.

use super::repository::EntityRepository;
use crate::domain::{StateError, StateQueryConfig};
use crate::ports::{RecordCodec, StateReader};
use std::collections::BTreeMap;
use tracing::error;

/// Active namespaces and their external identifier caps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespacePolicy {
    pub allowed: BTreeMap<String, bool>,
    pub identifier_caps: BTreeMap<String, i32>,
}

impl NamespacePolicy {
    pub fn is_allowed(&self, namespace: &str) -> bool {
        self.allowed.get(namespace).copied().unwrap_or(false)
    }

    /// `Some(0)` means unlimited.
    pub fn identifier_cap(&self, namespace: &str) -> Option<i32> {
        self.identifier_caps.get(namespace).copied()
    }
}

pub struct PolicyResolver<'r, 'a, R: StateReader, C: RecordCodec> {
    repo: &'r EntityRepository<'a, R, C>,
    config: &'a StateQueryConfig,
}

impl<'r, 'a, R: StateReader, C: RecordCodec> PolicyResolver<'r, 'a, R, C> {
    pub fn new(repo: &'r EntityRepository<'a, R, C>, config: &'a StateQueryConfig) -> Self {
        Self { repo, config }
    }

    /// Explicit per-purpose list, or the computed default.
    ///
    /// A stored list that cannot be decoded yields an empty list.
    pub fn resolve_allowed_modes(&self, purpose: &str) -> Result<Vec<i32>, StateError> {
        match self.repo.allowed_mode_list(purpose) {
            Ok(Some(list)) => Ok(list.mode),
            Ok(None) => Ok(self.default_modes(purpose)),
            Err(StateError::Decode(message)) => {
                error!(purpose, error = %message, "unreadable allowed mode list");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    fn default_modes(&self, purpose: &str) -> Vec<i32> {
        let mut modes = Vec::with_capacity(self.config.default_modes.len() + 1);
        if !self.config.is_mode_sensitive(purpose) {
            modes.push(self.config.relaxed_mode);
        }
        modes.extend(self.config.default_modes.iter().copied());
        modes
    }

    pub fn resolve_namespace_policy(&self) -> Result<NamespacePolicy, StateError> {
        let mut policy = NamespacePolicy::default();
        let Some(list) = self.repo.namespaces()? else {
            return Ok(policy);
        };
        for namespace in list.namespaces.iter().filter(|ns| ns.active) {
            policy.allowed.insert(namespace.namespace.clone(), true);
            policy
                .identifier_caps
                .insert(namespace.namespace.clone(), namespace.external_identifier_cap());
        }
        Ok(policy)
    }

    /// Stored minimum IAL for registering at a first IdP, default 0.
    pub fn resolve_allowed_min_ial_first_idp(&self) -> Result<f64, StateError> {
        match self.repo.allowed_min_ial_first_idp() {
            Ok(record) => Ok(record.map(|r| r.min_ial).unwrap_or(0.0)),
            Err(StateError::Decode(message)) => {
                error!(error = %message, "unreadable first-IdP minimum IAL");
                Ok(0.0)
            }
            Err(err) => Err(err),
        }
    }
}
