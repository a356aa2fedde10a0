//! # Operation Router
//!
//! Maps operation names onto the query API and the mutation service.
//!
//! ```text
//! StateApp::query ──→ handle_query ──→ StateQueryApi
//! StateApp::deliver_tx ──→ handle_tx ──→ MutationService
//! ```

use crate::domain::keys::RoleDirectory;
use crate::domain::StateError;
use crate::ipc::payloads::{
    decode_params, AccessorIdParams, AsIdParams, DataSignatureParams, GetAsNodesByServiceIdParams,
    GetIdpNodesParams, IdentityParams, NodeIdParams, ProxyNodeIdParams, PurposeParams,
    RequestIdParams, RoleParams, ServiceIdParams, SetMqAddressesParams, UpdateNodeParams,
};
use crate::ports::{RecordCodec, StateQueryApi, StateWriter};
use crate::service::{MutationService, NodePatch, QueryOutcome};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Body rendered for a result without a payload.
const EMPTY_OBJECT: &[u8] = b"{}";

#[derive(Debug, Error, PartialEq)]
pub enum RouterError {
    #[error("method not found")]
    MethodNotFound(String),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Encoded result and status string of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedQuery {
    pub value: Vec<u8>,
    pub log: String,
}

impl RoutedQuery {
    fn render<T: Serialize>(outcome: QueryOutcome<T>) -> Result<Self, StateError> {
        let value = match &outcome.body {
            Some(body) => {
                serde_json::to_vec(body).map_err(|e| StateError::Encode(e.to_string()))?
            }
            None => EMPTY_OBJECT.to_vec(),
        };
        Ok(Self {
            value,
            log: outcome.status.to_string(),
        })
    }

    fn raw(outcome: QueryOutcome<Vec<u8>>) -> Self {
        Self {
            log: outcome.status.to_string(),
            value: outcome.body.unwrap_or_default(),
        }
    }
}

/// Dispatch a read operation. `height` only affects request lookups.
pub fn handle_query<A: StateQueryApi>(
    api: &A,
    operation: &str,
    params: &str,
    height: Option<u64>,
) -> Result<RoutedQuery, RouterError> {
    info!(operation, params, "query");
    let routed = match operation {
        "GetIdpNodes" | "GetIdpNodesInfo" => {
            let p: GetIdpNodesParams = decode_params(params)?;
            RoutedQuery::render(api.get_idp_nodes(&p.criteria(), &p.selector())?)?
        }
        "GetAsNodesByServiceId" | "GetAsNodesInfoByServiceId" => {
            let p: GetAsNodesByServiceIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_as_nodes_by_service_id(&p.service_id, &p.node_id_list)?)?
        }
        "GetNodeInfo" => {
            let p: NodeIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_node_info(&p.node_id)?)?
        }
        "GetNodePublicKey" => {
            let p: NodeIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_node_public_key(&p.node_id)?)?
        }
        "GetNodeMasterPublicKey" => {
            let p: NodeIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_node_master_public_key(&p.node_id)?)?
        }
        "GetMqAddresses" => {
            let p: NodeIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_mq_addresses(&p.node_id)?)?
        }
        "GetNodeIDList" => {
            let p: RoleParams = decode_params(params)?;
            RoutedQuery::render(api.get_node_id_list(RoleDirectory::parse(&p.role))?)?
        }
        "GetNodesBehindProxyNode" => {
            let p: ProxyNodeIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_nodes_behind_proxy_node(&p.proxy_node_id)?)?
        }
        "GetRequest" => {
            let p: RequestIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_request(&p.request_id, height)?)?
        }
        "GetRequestDetail" => {
            let p: RequestIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_request_detail(&p.request_id, height)?)?
        }
        "GetDataSignature" => {
            let p: DataSignatureParams = decode_params(params)?;
            RoutedQuery::render(api.get_data_signature(&p.node_id, &p.service_id, &p.request_id)?)?
        }
        "CheckExistingIdentity" => {
            let p: IdentityParams = decode_params(params)?;
            RoutedQuery::render(api.check_existing_identity(&p.selector())?)?
        }
        "GetIdentityInfo" => {
            let p: IdentityParams = decode_params(params)?;
            RoutedQuery::render(api.get_identity_info(&p.selector(), &p.node_id)?)?
        }
        "GetReferenceGroupCode" => {
            let p: IdentityParams = decode_params(params)?;
            RoutedQuery::render(
                api.get_reference_group_code(&p.identity_namespace, &p.identity_identifier_hash)?,
            )?
        }
        "GetReferenceGroupCodeByAccessorID" => {
            let p: AccessorIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_reference_group_code_by_accessor_id(&p.accessor_id)?)?
        }
        "GetAccessorKey" => {
            let p: AccessorIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_accessor_key(&p.accessor_id)?)?
        }
        "GetAccessorOwner" => {
            let p: AccessorIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_accessor_owner(&p.accessor_id)?)?
        }
        "CheckExistingAccessorID" => {
            let p: AccessorIdParams = decode_params(params)?;
            RoutedQuery::render(api.check_existing_accessor_id(&p.accessor_id)?)?
        }
        "GetServiceDetail" => {
            let p: ServiceIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_service_detail(&p.service_id)?)?
        }
        "GetServiceList" => RoutedQuery::render(api.get_service_list()?)?,
        "GetServicesByAsID" => {
            let p: AsIdParams = decode_params(params)?;
            RoutedQuery::render(api.get_services_by_as_id(&p.as_id)?)?
        }
        "GetAllowedModeList" => {
            let p: PurposeParams = decode_params(params)?;
            RoutedQuery::render(api.get_allowed_mode_list(&p.purpose)?)?
        }
        "GetNamespaceList" => RoutedQuery::render(api.get_namespace_list()?)?,
        "GetAllowedMinIalForRegisterIdentityAtFirstIdp" => RoutedQuery::render(
            api.get_allowed_min_ial_for_register_identity_at_first_idp()?,
        )?,
        "IsInitEnded" => RoutedQuery::render(api.is_init_ended()?)?,
        "GetChainHistory" => RoutedQuery::raw(api.get_chain_history()?),
        _ => return Err(RouterError::MethodNotFound(operation.to_string())),
    };
    Ok(routed)
}

/// Dispatch a state-changing operation on behalf of `caller_node_id`.
pub fn handle_tx<W: StateWriter, C: RecordCodec>(
    service: &MutationService<'_, W, C>,
    operation: &str,
    params: &str,
    caller_node_id: &str,
) -> Result<(), RouterError> {
    info!(operation, params, caller_node_id, "transaction");
    match operation {
        "UpdateNode" => {
            let p: UpdateNodeParams = decode_params(params)?;
            service.update_node(caller_node_id, &NodePatch::from(p))?;
        }
        "SetMqAddresses" => {
            let p: SetMqAddressesParams = decode_params(params)?;
            service.set_mq_addresses(caller_node_id, &p.addresses)?;
        }
        _ => return Err(RouterError::MethodNotFound(operation.to_string())),
    }
    Ok(())
}
