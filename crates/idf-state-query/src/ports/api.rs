use crate::domain::keys::RoleDirectory;
use crate::domain::{
    AccessorKeyResult, AccessorOwnerResult, AllowedModeListResult, AsNodesResult,
    DataSignatureResult, ExistResult, IdentityInfoResult, IdpCriteria, IdpNodesResult,
    InitEndedResult, MasterPublicKeyResult, MinIalResult, MqAddress, NamespaceView, NodeId,
    NodeIdListResult, NodeInfo, NodesBehindProxyResult, PublicKeyResult,
    ReferenceGroupCodeResult, RequestDetail, RequestSummary, ServiceDetail, ServicesByAsResult,
    StateError,
};
use crate::service::{IdentitySelector, QueryOutcome};

pub type QueryResult<T> = Result<QueryOutcome<T>, StateError>;

/// Read operations exposed to the transport.
///
/// Every operation reads committed state only.
pub trait StateQueryApi {
    // === Discovery ===

    fn get_idp_nodes(&self, criteria: &IdpCriteria, selector: &IdentitySelector)
        -> QueryResult<IdpNodesResult>;

    fn get_as_nodes_by_service_id(
        &self,
        service_id: &str,
        node_id_list: &[NodeId],
    ) -> QueryResult<AsNodesResult>;

    // === Nodes ===

    fn get_node_info(&self, node_id: &str) -> QueryResult<NodeInfo>;

    fn get_node_public_key(&self, node_id: &str) -> QueryResult<PublicKeyResult>;

    fn get_node_master_public_key(&self, node_id: &str) -> QueryResult<MasterPublicKeyResult>;

    fn get_mq_addresses(&self, node_id: &str) -> QueryResult<Vec<MqAddress>>;

    fn get_node_id_list(&self, role: RoleDirectory) -> QueryResult<NodeIdListResult>;

    fn get_nodes_behind_proxy_node(&self, proxy_node_id: &str)
        -> QueryResult<NodesBehindProxyResult>;

    // === Requests ===

    /// `height` of `None` or `0` reads the latest committed state.
    fn get_request(&self, request_id: &str, height: Option<u64>) -> QueryResult<RequestSummary>;

    fn get_request_detail(&self, request_id: &str, height: Option<u64>)
        -> QueryResult<RequestDetail>;

    fn get_data_signature(
        &self,
        node_id: &str,
        service_id: &str,
        request_id: &str,
    ) -> QueryResult<DataSignatureResult>;

    // === Identities and accessors ===

    fn check_existing_identity(&self, selector: &IdentitySelector) -> QueryResult<ExistResult>;

    fn get_identity_info(
        &self,
        selector: &IdentitySelector,
        node_id: &str,
    ) -> QueryResult<IdentityInfoResult>;

    fn get_reference_group_code(
        &self,
        namespace: &str,
        identifier_hash: &str,
    ) -> QueryResult<ReferenceGroupCodeResult>;

    fn get_reference_group_code_by_accessor_id(
        &self,
        accessor_id: &str,
    ) -> QueryResult<ReferenceGroupCodeResult>;

    fn get_accessor_key(&self, accessor_id: &str) -> QueryResult<AccessorKeyResult>;

    fn get_accessor_owner(&self, accessor_id: &str) -> QueryResult<AccessorOwnerResult>;

    fn check_existing_accessor_id(&self, accessor_id: &str) -> QueryResult<ExistResult>;

    // === Services ===

    fn get_service_detail(&self, service_id: &str) -> QueryResult<ServiceDetail>;

    fn get_service_list(&self) -> QueryResult<Vec<ServiceDetail>>;

    fn get_services_by_as_id(&self, as_id: &str) -> QueryResult<ServicesByAsResult>;

    // === Policy and chain ===

    fn get_allowed_mode_list(&self, purpose: &str) -> QueryResult<AllowedModeListResult>;

    fn get_namespace_list(&self) -> QueryResult<Vec<NamespaceView>>;

    fn get_allowed_min_ial_for_register_identity_at_first_idp(&self) -> QueryResult<MinIalResult>;

    fn is_init_ended(&self) -> QueryResult<InitEndedResult>;

    fn get_chain_history(&self) -> QueryResult<Vec<u8>>;
}
