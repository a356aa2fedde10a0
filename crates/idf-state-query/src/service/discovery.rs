//! IdP and AS discovery.

use super::{IdentitySelector, QueryOutcome, QueryService, QueryStatus};
use crate::domain::keys::RoleDirectory;
use crate::domain::{
    AsNode, AsNodesResult, IdpAssociation, IdpCriteria, IdpNode, IdpNodesResult, NodeDetail,
    NodeId, ProxyContact, StateError,
};
use crate::ports::{RecordCodec, StateReader};
use tracing::{debug, warn};

/// Outcome of resolving a candidate's proxy.
enum ProxyCheck {
    Direct,
    Fronted(ProxyContact),
    /// Proxy exists but is inactive: skip the candidate.
    Inactive,
    /// Proxy record is missing: abort the query.
    Missing,
}

impl<R: StateReader, C: RecordCodec> QueryService<'_, R, C> {
    /// Eligible IdPs for the criteria, optionally scoped to one identity.
    pub fn get_idp_nodes(
        &self,
        criteria: &IdpCriteria,
        selector: &IdentitySelector,
    ) -> Result<QueryOutcome<IdpNodesResult>, StateError> {
        let candidates: Vec<(NodeId, Option<IdpAssociation>)> = match selector {
            IdentitySelector::None => self
                .repo
                .role_directory(RoleDirectory::IdP)?
                .map(|list| list.node_id.into_iter().map(|id| (id, None)).collect())
                .unwrap_or_default(),
            _ => match self.resolver().resolve_reference_group(selector)? {
                Some((_, group)) => group
                    .idps
                    .into_iter()
                    .map(|association| (association.node_id.clone(), Some(association)))
                    .collect(),
                None => return Ok(QueryOutcome::not_found(IdpNodesResult::default())),
            },
        };

        let mut result = IdpNodesResult::default();
        for (node_id, association) in candidates {
            let Some(node) = self.candidate_node(&node_id)? else {
                continue;
            };
            if let Err(reason) = criteria.check(&node_id, &node, association.as_ref()) {
                debug!(node_id = %node_id, ?reason, "IdP candidate filtered out");
                continue;
            }
            let proxy = match self.check_proxy(&node_id, &node)? {
                ProxyCheck::Direct => None,
                ProxyCheck::Fronted(contact) => Some(contact),
                ProxyCheck::Inactive => continue,
                ProxyCheck::Missing => return Ok(QueryOutcome::empty(QueryStatus::NotFound)),
            };
            result
                .node
                .push(IdpNode::build(&node_id, &node, association.as_ref(), proxy));
        }

        let is_empty = result.node.is_empty();
        Ok(QueryOutcome::listing(result, is_empty))
    }

    /// Approved, active AS nodes offering `service_id`.
    ///
    /// A non-empty `node_id_list` restricts the result to those nodes.
    pub fn get_as_nodes_by_service_id(
        &self,
        service_id: &str,
        node_id_list: &[NodeId],
    ) -> Result<QueryOutcome<AsNodesResult>, StateError> {
        let Some(destinations) = self.repo.service_destinations(service_id)? else {
            return Ok(QueryOutcome::not_found(AsNodesResult::default()));
        };
        let Some(service) = self.repo.service(service_id)? else {
            return Ok(QueryOutcome::not_found(AsNodesResult::default()));
        };
        if !service.active {
            return Ok(QueryOutcome::with_status(
                AsNodesResult::default(),
                QueryStatus::ServiceInactive,
            ));
        }

        let mut result = AsNodesResult::default();
        for destination in &destinations.node {
            if !node_id_list.is_empty() && !node_id_list.contains(&destination.node_id) {
                continue;
            }
            if !destination.active {
                continue;
            }
            match self.repo.approval(service_id, &destination.node_id) {
                Ok(Some(approval)) if approval.active => {}
                Ok(_) | Err(StateError::Decode(_)) => continue,
                Err(err) => return Err(err),
            }
            let Some(node) = self.candidate_node(&destination.node_id)? else {
                continue;
            };
            if !node.active {
                continue;
            }
            let proxy = match self.check_proxy(&destination.node_id, &node)? {
                ProxyCheck::Direct => None,
                ProxyCheck::Fronted(contact) => Some(contact),
                ProxyCheck::Inactive => continue,
                ProxyCheck::Missing => return Ok(QueryOutcome::empty(QueryStatus::NotFound)),
            };
            result.node.push(AsNode::build(destination, &node, proxy));
        }

        let is_empty = result.node.is_empty();
        Ok(QueryOutcome::listing(result, is_empty))
    }

    /// Candidate node record; absent or unreadable records are skipped.
    fn candidate_node(&self, node_id: &str) -> Result<Option<NodeDetail>, StateError> {
        match self.repo.node(node_id) {
            Ok(node) => Ok(node),
            Err(StateError::Decode(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn check_proxy(&self, node_id: &str, node: &NodeDetail) -> Result<ProxyCheck, StateError> {
        match self.resolver().resolve_proxy(node) {
            Ok(None) => Ok(ProxyCheck::Direct),
            Ok(Some((proxy_id, proxy))) => {
                if proxy.active {
                    Ok(ProxyCheck::Fronted(ProxyContact::new(&proxy_id, &proxy, node)))
                } else {
                    debug!(node_id, proxy_id = %proxy_id, "proxy inactive, candidate skipped");
                    Ok(ProxyCheck::Inactive)
                }
            }
            Err(err) if err.is_not_found() => {
                warn!(node_id, error = %err, "proxy record missing, aborting discovery");
                Ok(ProxyCheck::Missing)
            }
            Err(err) => Err(err),
        }
    }
}
