//! Identity, accessor and proxy resolution.

use super::repository::EntityRepository;
use crate::domain::keys::KeyPrefix;
use crate::domain::{Accessor, NodeDetail, NodeId, ReferenceGroup, StateError};
use crate::ports::{RecordCodec, StateReader};
use tracing::warn;

/// How a caller names a reference group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySelector {
    None,
    ByCode(String),
    ByIdentity {
        namespace: String,
        identifier_hash: String,
    },
    /// Both a code and a full identity were supplied.
    Both {
        code: String,
        namespace: String,
        identifier_hash: String,
    },
}

impl IdentitySelector {
    /// Classify raw parameters. Empty strings count as absent.
    ///
    /// A half-supplied identity still selects by identity and goes through
    /// the index, where it finds nothing. `Both` needs all three parts.
    pub fn from_parts(code: &str, namespace: &str, identifier_hash: &str) -> Self {
        let full_identity = !namespace.is_empty() && !identifier_hash.is_empty();
        let any_identity = !namespace.is_empty() || !identifier_hash.is_empty();
        match (code.is_empty(), full_identity, any_identity) {
            (false, true, _) => IdentitySelector::Both {
                code: code.to_string(),
                namespace: namespace.to_string(),
                identifier_hash: identifier_hash.to_string(),
            },
            (false, false, _) => IdentitySelector::ByCode(code.to_string()),
            (true, _, true) => IdentitySelector::ByIdentity {
                namespace: namespace.to_string(),
                identifier_hash: identifier_hash.to_string(),
            },
            (true, _, false) => IdentitySelector::None,
        }
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self, IdentitySelector::Both { .. })
    }
}

/// Accessor located inside its reference group.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorOwner {
    pub reference_group_code: String,
    pub node_id: NodeId,
    pub accessor: Accessor,
}

/// A node together with the proxy fronting it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyChain {
    pub node: NodeDetail,
    pub proxy: Option<(NodeId, NodeDetail)>,
}

pub struct ResolutionEngine<'r, 'a, R: StateReader, C: RecordCodec> {
    repo: &'r EntityRepository<'a, R, C>,
}

impl<'r, 'a, R: StateReader, C: RecordCodec> ResolutionEngine<'r, 'a, R, C> {
    pub fn new(repo: &'r EntityRepository<'a, R, C>) -> Self {
        Self { repo }
    }

    /// Reference group code named by `selector`. `Both` resolves by code;
    /// call sites that reject the combination check before calling.
    pub fn resolve_reference_group_code(
        &self,
        selector: &IdentitySelector,
    ) -> Result<Option<String>, StateError> {
        match selector {
            IdentitySelector::None => Ok(None),
            IdentitySelector::ByCode(code) | IdentitySelector::Both { code, .. } => {
                Ok(Some(code.clone()))
            }
            IdentitySelector::ByIdentity {
                namespace,
                identifier_hash,
            } => self.repo.ref_code_by_identity(namespace, identifier_hash),
        }
    }

    /// Reference group named by `selector`, with its code.
    ///
    /// An identity index pointing at a missing group is logged and reported
    /// as absent.
    pub fn resolve_reference_group(
        &self,
        selector: &IdentitySelector,
    ) -> Result<Option<(String, ReferenceGroup)>, StateError> {
        let Some(code) = self.resolve_reference_group_code(selector)? else {
            return Ok(None);
        };
        match self.repo.reference_group(&code)? {
            Some(group) => Ok(Some((code, group))),
            None => {
                if let IdentitySelector::ByIdentity {
                    namespace,
                    identifier_hash,
                } = selector
                {
                    let err = StateError::ReferenceIntegrity {
                        index: format!(
                            "{}|{namespace}|{identifier_hash}",
                            KeyPrefix::IdentityToRefCode.as_str()
                        ),
                        target: format!("{}|{code}", KeyPrefix::RefGroupCode.as_str()),
                    };
                    warn!(error = %err, "dangling identity index");
                }
                Ok(None)
            }
        }
    }

    /// Follow the accessor index to its group and find the owning IdP.
    ///
    /// Dangling or inconsistent indexes are logged and treated as absent.
    pub fn resolve_accessor_owner(
        &self,
        accessor_id: &str,
    ) -> Result<Option<AccessorOwner>, StateError> {
        let Some(code) = self.repo.ref_code_by_accessor(accessor_id)? else {
            return Ok(None);
        };
        let index = format!("{}|{accessor_id}", KeyPrefix::AccessorToRefCode.as_str());
        let target = format!("{}|{code}", KeyPrefix::RefGroupCode.as_str());

        let group = match self.repo.reference_group(&code) {
            Ok(Some(group)) => group,
            Ok(None) => {
                warn!(error = %StateError::ReferenceIntegrity { index, target }, "dangling accessor index");
                return Ok(None);
            }
            Err(StateError::Decode(message)) => {
                warn!(index = %index, error = %message, "accessor index points at an unreadable group");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        match group.accessor_owner(accessor_id) {
            Some((association, accessor)) => Ok(Some(AccessorOwner {
                reference_group_code: code,
                node_id: association.node_id.clone(),
                accessor: accessor.clone(),
            })),
            None => {
                warn!(
                    error = %StateError::ReferenceIntegrity { index, target },
                    "group does not contain indexed accessor"
                );
                Ok(None)
            }
        }
    }

    /// Proxy fronting `node`, if any. A proxy that is named but absent is
    /// `NotFound`.
    pub fn resolve_proxy(
        &self,
        node: &NodeDetail,
    ) -> Result<Option<(NodeId, NodeDetail)>, StateError> {
        let Some(proxy_id) = node.proxy() else {
            return Ok(None);
        };
        match self.repo.node(proxy_id)? {
            Some(proxy) => Ok(Some((proxy_id.to_string(), proxy))),
            None => Err(StateError::NotFound {
                key: format!("{}|{proxy_id}", KeyPrefix::Node.as_str()),
            }),
        }
    }

    /// Node plus its proxy. `Ok(None)` if the node itself is absent.
    pub fn resolve_proxy_chain(&self, node_id: &str) -> Result<Option<ProxyChain>, StateError> {
        let Some(node) = self.repo.node(node_id)? else {
            return Ok(None);
        };
        let proxy = self.resolve_proxy(&node)?;
        Ok(Some(ProxyChain { node, proxy }))
    }
}
