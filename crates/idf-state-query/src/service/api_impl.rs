use super::{IdentitySelector, QueryService};
use crate::domain::keys::RoleDirectory;
use crate::domain::{
    AccessorKeyResult, AccessorOwnerResult, AllowedModeListResult, AsNodesResult,
    DataSignatureResult, ExistResult, IdentityInfoResult, IdpCriteria, IdpNodesResult,
    InitEndedResult, MasterPublicKeyResult, MinIalResult, MqAddress, NamespaceView, NodeId,
    NodeIdListResult, NodeInfo, NodesBehindProxyResult, PublicKeyResult,
    ReferenceGroupCodeResult, RequestDetail, RequestSummary, ServiceDetail, ServicesByAsResult,
};
use crate::ports::{CommittedView, QueryResult, RecordCodec, StateQueryApi, VersionedStore};

impl<'a, S: VersionedStore + ?Sized, C: RecordCodec> StateQueryApi
    for QueryService<'a, CommittedView<'a, S>, C>
{
    fn get_idp_nodes(
        &self,
        criteria: &IdpCriteria,
        selector: &IdentitySelector,
    ) -> QueryResult<IdpNodesResult> {
        QueryService::get_idp_nodes(self, criteria, selector)
    }

    fn get_as_nodes_by_service_id(
        &self,
        service_id: &str,
        node_id_list: &[NodeId],
    ) -> QueryResult<AsNodesResult> {
        QueryService::get_as_nodes_by_service_id(self, service_id, node_id_list)
    }

    fn get_node_info(&self, node_id: &str) -> QueryResult<NodeInfo> {
        QueryService::get_node_info(self, node_id)
    }

    fn get_node_public_key(&self, node_id: &str) -> QueryResult<PublicKeyResult> {
        QueryService::get_node_public_key(self, node_id)
    }

    fn get_node_master_public_key(&self, node_id: &str) -> QueryResult<MasterPublicKeyResult> {
        QueryService::get_node_master_public_key(self, node_id)
    }

    fn get_mq_addresses(&self, node_id: &str) -> QueryResult<Vec<MqAddress>> {
        QueryService::get_mq_addresses(self, node_id)
    }

    fn get_node_id_list(&self, role: RoleDirectory) -> QueryResult<NodeIdListResult> {
        QueryService::get_node_id_list(self, role)
    }

    fn get_nodes_behind_proxy_node(
        &self,
        proxy_node_id: &str,
    ) -> QueryResult<NodesBehindProxyResult> {
        QueryService::get_nodes_behind_proxy_node(self, proxy_node_id)
    }

    fn get_request(&self, request_id: &str, height: Option<u64>) -> QueryResult<RequestSummary> {
        QueryService::get_request(self, request_id, height)
    }

    fn get_request_detail(
        &self,
        request_id: &str,
        height: Option<u64>,
    ) -> QueryResult<RequestDetail> {
        QueryService::get_request_detail(self, request_id, height)
    }

    fn get_data_signature(
        &self,
        node_id: &str,
        service_id: &str,
        request_id: &str,
    ) -> QueryResult<DataSignatureResult> {
        QueryService::get_data_signature(self, node_id, service_id, request_id)
    }

    fn check_existing_identity(&self, selector: &IdentitySelector) -> QueryResult<ExistResult> {
        QueryService::check_existing_identity(self, selector)
    }

    fn get_identity_info(
        &self,
        selector: &IdentitySelector,
        node_id: &str,
    ) -> QueryResult<IdentityInfoResult> {
        QueryService::get_identity_info(self, selector, node_id)
    }

    fn get_reference_group_code(
        &self,
        namespace: &str,
        identifier_hash: &str,
    ) -> QueryResult<ReferenceGroupCodeResult> {
        QueryService::get_reference_group_code(self, namespace, identifier_hash)
    }

    fn get_reference_group_code_by_accessor_id(
        &self,
        accessor_id: &str,
    ) -> QueryResult<ReferenceGroupCodeResult> {
        QueryService::get_reference_group_code_by_accessor_id(self, accessor_id)
    }

    fn get_accessor_key(&self, accessor_id: &str) -> QueryResult<AccessorKeyResult> {
        QueryService::get_accessor_key(self, accessor_id)
    }

    fn get_accessor_owner(&self, accessor_id: &str) -> QueryResult<AccessorOwnerResult> {
        QueryService::get_accessor_owner(self, accessor_id)
    }

    fn check_existing_accessor_id(&self, accessor_id: &str) -> QueryResult<ExistResult> {
        QueryService::check_existing_accessor_id(self, accessor_id)
    }

    fn get_service_detail(&self, service_id: &str) -> QueryResult<ServiceDetail> {
        QueryService::get_service_detail(self, service_id)
    }

    fn get_service_list(&self) -> QueryResult<Vec<ServiceDetail>> {
        QueryService::get_service_list(self)
    }

    fn get_services_by_as_id(&self, as_id: &str) -> QueryResult<ServicesByAsResult> {
        QueryService::get_services_by_as_id(self, as_id)
    }

    fn get_allowed_mode_list(&self, purpose: &str) -> QueryResult<AllowedModeListResult> {
        QueryService::get_allowed_mode_list(self, purpose)
    }

    fn get_namespace_list(&self) -> QueryResult<Vec<NamespaceView>> {
        QueryService::get_namespace_list(self)
    }

    fn get_allowed_min_ial_for_register_identity_at_first_idp(&self) -> QueryResult<MinIalResult> {
        QueryService::get_allowed_min_ial_for_register_identity_at_first_idp(self)
    }

    fn is_init_ended(&self) -> QueryResult<InitEndedResult> {
        QueryService::is_init_ended(self)
    }

    fn get_chain_history(&self) -> QueryResult<Vec<u8>> {
        QueryService::get_chain_history(self)
    }
}
