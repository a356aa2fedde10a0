//! Point lookups over committed state.

use super::{IdentitySelector, QueryOutcome, QueryService, QueryStatus};
use crate::domain::keys::RoleDirectory;
use crate::domain::{
    AccessorKeyResult, AccessorOwnerResult, AllowedModeListResult, DataSignatureResult,
    ExistResult, IdentityInfoResult, InitEndedResult, MasterPublicKeyResult, MinIalResult,
    MqAddress, NamespaceView, NodeBehindProxy, NodeIdListResult, NodeInfo,
    NodesBehindProxyResult, ProvidedServiceView, ProxyDescriptor, PublicKeyResult,
    ReferenceGroupCodeResult, Request, RequestDetail, RequestSummary, ServiceDetail,
    ServicesByAsResult, StateError,
};
use super::EntityRepository;
use crate::ports::{CommittedView, RecordCodec, StateReader, VersionedStore};
use tracing::warn;

/// Stored `InitState` value once initialization has finished.
const INIT_ENDED_MARKER: &str = "false";

impl<R: StateReader, C: RecordCodec> QueryService<'_, R, C> {
    // =========================================================================
    // NODES
    // =========================================================================

    /// Role-specific descriptor. Proxied nodes expose the proxy's keys and
    /// addresses instead of their own.
    pub fn get_node_info(&self, node_id: &str) -> Result<QueryOutcome<NodeInfo>, StateError> {
        let chain = match self.resolver().resolve_proxy_chain(node_id) {
            Ok(Some(chain)) => chain,
            Ok(None) => return Ok(QueryOutcome::empty(QueryStatus::NotFound)),
            Err(err) if err.is_not_found() => {
                warn!(node_id, error = %err, "proxy of node is missing");
                return Ok(QueryOutcome::empty(QueryStatus::NotFound));
            }
            Err(err) => return Err(err),
        };
        let proxy = chain
            .proxy
            .map(|(proxy_id, proxy)| ProxyDescriptor::new(&proxy_id, &proxy, &chain.node));
        Ok(QueryOutcome::success(NodeInfo::build(&chain.node, proxy)))
    }

    pub fn get_node_public_key(
        &self,
        node_id: &str,
    ) -> Result<QueryOutcome<PublicKeyResult>, StateError> {
        Ok(match self.repo.node(node_id)? {
            Some(node) => QueryOutcome::success(PublicKeyResult {
                public_key: node.public_key,
            }),
            None => QueryOutcome::not_found(PublicKeyResult::default()),
        })
    }

    pub fn get_node_master_public_key(
        &self,
        node_id: &str,
    ) -> Result<QueryOutcome<MasterPublicKeyResult>, StateError> {
        Ok(match self.repo.node(node_id)? {
            Some(node) => QueryOutcome::success(MasterPublicKeyResult {
                master_public_key: node.master_public_key,
            }),
            None => QueryOutcome::not_found(MasterPublicKeyResult::default()),
        })
    }

    /// The node's own registered addresses.
    pub fn get_mq_addresses(
        &self,
        node_id: &str,
    ) -> Result<QueryOutcome<Vec<MqAddress>>, StateError> {
        let addresses = self.repo.node(node_id)?.map(|node| node.mq).unwrap_or_default();
        let is_empty = addresses.is_empty();
        Ok(QueryOutcome::listing(addresses, is_empty))
    }

    /// Active node IDs from the directory selected by `role`.
    pub fn get_node_id_list(
        &self,
        role: RoleDirectory,
    ) -> Result<QueryOutcome<NodeIdListResult>, StateError> {
        let mut result = NodeIdListResult::default();
        if let Some(directory) = self.repo.role_directory(role)? {
            for node_id in directory.node_id {
                match self.repo.node(&node_id) {
                    Ok(Some(node)) if node.active => result.node_id_list.push(node_id),
                    Ok(_) | Err(StateError::Decode(_)) => {}
                    Err(err) => return Err(err),
                }
            }
        }
        let is_empty = result.node_id_list.is_empty();
        Ok(QueryOutcome::listing(result, is_empty))
    }

    pub fn get_nodes_behind_proxy_node(
        &self,
        proxy_node_id: &str,
    ) -> Result<QueryOutcome<NodesBehindProxyResult>, StateError> {
        let mut result = NodesBehindProxyResult::default();
        let Some(members) = self.repo.nodes_behind_proxy(proxy_node_id)? else {
            return Ok(QueryOutcome::not_found(result));
        };
        for node_id in members.node_id {
            let node = match self.repo.node(&node_id) {
                Ok(Some(node)) => node,
                Ok(None) | Err(StateError::Decode(_)) => continue,
                Err(err) => return Err(err),
            };
            if node.proxy().is_none() {
                continue;
            }
            result.nodes.push(NodeBehindProxy::build(&node_id, &node));
        }
        let is_empty = result.nodes.is_empty();
        Ok(QueryOutcome::listing(result, is_empty))
    }

    // =========================================================================
    // REQUESTS
    // =========================================================================

    pub fn get_data_signature(
        &self,
        node_id: &str,
        service_id: &str,
        request_id: &str,
    ) -> Result<QueryOutcome<DataSignatureResult>, StateError> {
        Ok(match self.repo.data_signature(node_id, service_id, request_id)? {
            Some(signature) => QueryOutcome::success(DataSignatureResult { signature }),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    // =========================================================================
    // IDENTITIES AND ACCESSORS
    // =========================================================================

    /// Whether the selected reference group exists.
    pub fn check_existing_identity(
        &self,
        selector: &IdentitySelector,
    ) -> Result<QueryOutcome<ExistResult>, StateError> {
        if selector.is_conflicting() {
            return Ok(QueryOutcome::with_status(
                ExistResult::default(),
                QueryStatus::ConflictingSelector,
            ));
        }
        let exist = match self.resolver().resolve_reference_group(selector) {
            Ok(found) => found.is_some(),
            Err(StateError::Decode(_)) => false,
            Err(err) => return Err(err),
        };
        Ok(QueryOutcome::success(ExistResult { exist }))
    }

    /// IAL and modes of `node_id`'s active association with the selected
    /// identity.
    pub fn get_identity_info(
        &self,
        selector: &IdentitySelector,
        node_id: &str,
    ) -> Result<QueryOutcome<IdentityInfoResult>, StateError> {
        if selector.is_conflicting() {
            return Ok(QueryOutcome::with_status(
                IdentityInfoResult::default(),
                QueryStatus::ConflictingSelector,
            ));
        }
        let group = match self.resolver().resolve_reference_group(selector) {
            Ok(Some((_, group))) => group,
            Ok(None) | Err(StateError::Decode(_)) => {
                return Ok(QueryOutcome::with_status(
                    IdentityInfoResult::default(),
                    QueryStatus::ReferenceGroupNotFound,
                ))
            }
            Err(err) => return Err(err),
        };
        let result = group
            .idps
            .iter()
            .find(|idp| idp.node_id == node_id && idp.active)
            .map(|idp| IdentityInfoResult {
                ial: idp.ial,
                mode_list: idp.mode.clone(),
            })
            .unwrap_or_default();
        if result.ial <= 0.0 {
            return Ok(QueryOutcome::empty(QueryStatus::NotFound));
        }
        Ok(QueryOutcome::success(result))
    }

    pub fn get_reference_group_code(
        &self,
        namespace: &str,
        identifier_hash: &str,
    ) -> Result<QueryOutcome<ReferenceGroupCodeResult>, StateError> {
        let reference_group_code = self
            .repo
            .ref_code_by_identity(namespace, identifier_hash)?
            .unwrap_or_default();
        let is_empty = reference_group_code.is_empty();
        Ok(QueryOutcome::listing(
            ReferenceGroupCodeResult {
                reference_group_code,
            },
            is_empty,
        ))
    }

    /// Always "success"; an unknown accessor yields an empty code.
    pub fn get_reference_group_code_by_accessor_id(
        &self,
        accessor_id: &str,
    ) -> Result<QueryOutcome<ReferenceGroupCodeResult>, StateError> {
        let reference_group_code = self
            .repo
            .ref_code_by_accessor(accessor_id)?
            .unwrap_or_default();
        Ok(QueryOutcome::success(ReferenceGroupCodeResult {
            reference_group_code,
        }))
    }

    pub fn get_accessor_key(
        &self,
        accessor_id: &str,
    ) -> Result<QueryOutcome<AccessorKeyResult>, StateError> {
        Ok(match self.resolver().resolve_accessor_owner(accessor_id)? {
            Some(owner) => QueryOutcome::success(AccessorKeyResult {
                accessor_public_key: owner.accessor.accessor_public_key,
                active: owner.accessor.active,
            }),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    pub fn get_accessor_owner(
        &self,
        accessor_id: &str,
    ) -> Result<QueryOutcome<AccessorOwnerResult>, StateError> {
        Ok(match self.resolver().resolve_accessor_owner(accessor_id)? {
            Some(owner) => QueryOutcome::success(AccessorOwnerResult {
                node_id: owner.node_id,
            }),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    pub fn check_existing_accessor_id(
        &self,
        accessor_id: &str,
    ) -> Result<QueryOutcome<ExistResult>, StateError> {
        Ok(match self.resolver().resolve_accessor_owner(accessor_id)? {
            Some(_) => QueryOutcome::success(ExistResult { exist: true }),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    // =========================================================================
    // SERVICES
    // =========================================================================

    pub fn get_service_detail(
        &self,
        service_id: &str,
    ) -> Result<QueryOutcome<ServiceDetail>, StateError> {
        Ok(match self.repo.service(service_id)? {
            Some(service) => QueryOutcome::success(service),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    /// Active entries of the global service catalog.
    pub fn get_service_list(&self) -> Result<QueryOutcome<Vec<ServiceDetail>>, StateError> {
        Ok(match self.repo.services()? {
            Some(list) => QueryOutcome::success(
                list.services.into_iter().filter(|service| service.active).collect(),
            ),
            None => QueryOutcome::not_found(Vec::new()),
        })
    }

    /// Catalog of one AS. Entries need an active service, an active AS and
    /// an approval record; `suspended` is the negated approval.
    pub fn get_services_by_as_id(
        &self,
        as_id: &str,
    ) -> Result<QueryOutcome<ServicesByAsResult>, StateError> {
        let mut result = ServicesByAsResult::default();
        let Some(provided) = self.repo.provided_services(as_id)? else {
            return Ok(QueryOutcome::not_found(result));
        };
        let Some(node) = self.repo.node(as_id)? else {
            return Ok(QueryOutcome::not_found(result));
        };
        for service in &provided.services {
            let Some(detail) = self.repo.service(&service.service_id)? else {
                continue;
            };
            if !(node.active && detail.active) {
                continue;
            }
            let suspended = match self.repo.approval(&service.service_id, as_id) {
                Ok(Some(approval)) => !approval.active,
                Ok(None) => continue,
                Err(StateError::Decode(_)) => false,
                Err(err) => return Err(err),
            };
            result
                .services
                .push(ProvidedServiceView::new(service, suspended));
        }
        let is_empty = result.services.is_empty();
        Ok(QueryOutcome::listing(result, is_empty))
    }

    // =========================================================================
    // POLICY AND CHAIN
    // =========================================================================

    pub fn get_allowed_mode_list(
        &self,
        purpose: &str,
    ) -> Result<QueryOutcome<AllowedModeListResult>, StateError> {
        let allowed_mode_list = self.policy().resolve_allowed_modes(purpose)?;
        Ok(QueryOutcome::success(AllowedModeListResult { allowed_mode_list }))
    }

    /// Active namespaces with the identifier cap in external form.
    pub fn get_namespace_list(&self) -> Result<QueryOutcome<Vec<NamespaceView>>, StateError> {
        Ok(match self.repo.namespaces()? {
            Some(list) => QueryOutcome::success(
                list.namespaces
                    .iter()
                    .filter(|namespace| namespace.active)
                    .map(NamespaceView::from)
                    .collect(),
            ),
            None => QueryOutcome::not_found(Vec::new()),
        })
    }

    pub fn get_allowed_min_ial_for_register_identity_at_first_idp(
        &self,
    ) -> Result<QueryOutcome<MinIalResult>, StateError> {
        let min_ial = self.policy().resolve_allowed_min_ial_first_idp()?;
        Ok(QueryOutcome::success(MinIalResult { min_ial }))
    }

    pub fn is_init_ended(&self) -> Result<QueryOutcome<InitEndedResult>, StateError> {
        let init_ended = self.repo.init_state()?.as_deref() == Some(INIT_ENDED_MARKER);
        Ok(QueryOutcome::success(InitEndedResult { init_ended }))
    }

    /// Stored chain history, returned verbatim.
    pub fn get_chain_history(&self) -> Result<QueryOutcome<Vec<u8>>, StateError> {
        Ok(QueryOutcome::success(self.repo.chain_history()?.unwrap_or_default()))
    }
}

impl<'a, S: VersionedStore + ?Sized, C: RecordCodec> QueryService<'a, CommittedView<'a, S>, C> {
    /// Request as it existed at `height` (latest if `None` or `0`).
    fn request_at(
        &self,
        request_id: &str,
        height: Option<u64>,
    ) -> Result<Option<Request>, StateError> {
        let view = self.repo.reader().with_height(height);
        EntityRepository::new(&view, self.repo.codec()).request(request_id)
    }

    pub fn get_request(
        &self,
        request_id: &str,
        height: Option<u64>,
    ) -> Result<QueryOutcome<RequestSummary>, StateError> {
        Ok(match self.request_at(request_id, height)? {
            Some(request) => QueryOutcome::success(RequestSummary::from(&request)),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }

    pub fn get_request_detail(
        &self,
        request_id: &str,
        height: Option<u64>,
    ) -> Result<QueryOutcome<RequestDetail>, StateError> {
        Ok(match self.request_at(request_id, height)? {
            Some(request) => QueryOutcome::success(RequestDetail::from(&request)),
            None => QueryOutcome::empty(QueryStatus::NotFound),
        })
    }
}
