//! JSON parameter payloads, one struct per operation family.
//!
//! Missing fields take their defaults, so `{}` is a valid payload for
//! every operation.

use crate::domain::{IdpCriteria, MqAddress, StateError};
use crate::service::{IdentitySelector, NodePatch};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Parse an operation's JSON parameters. The parser's message is kept
/// verbatim so it can be surfaced to the caller.
pub fn decode_params<T: DeserializeOwned>(params: &str) -> Result<T, StateError> {
    Ok(serde_json::from_str(params)?)
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetIdpNodesParams {
    pub reference_group_code: String,
    pub identity_namespace: String,
    pub identity_identifier_hash: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub node_id_list: Vec<String>,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub mode_list: Vec<i32>,
}

impl GetIdpNodesParams {
    pub fn criteria(&self) -> IdpCriteria {
        IdpCriteria {
            min_ial: self.min_ial,
            min_aal: self.min_aal,
            node_id_list: self.node_id_list.clone(),
            supported_request_message_data_url_type_list: self
                .supported_request_message_data_url_type_list
                .clone(),
            mode_list: self.mode_list.clone(),
        }
    }

    pub fn selector(&self) -> IdentitySelector {
        IdentitySelector::from_parts(
            &self.reference_group_code,
            &self.identity_namespace,
            &self.identity_identifier_hash,
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetAsNodesByServiceIdParams {
    pub service_id: String,
    pub node_id_list: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct NodeIdParams {
    pub node_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProxyNodeIdParams {
    pub proxy_node_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RequestIdParams {
    pub request_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DataSignatureParams {
    pub node_id: String,
    pub service_id: String,
    pub request_id: String,
}

/// Reference group code or identity, plus an optional IdP for
/// `GetIdentityInfo`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct IdentityParams {
    pub reference_group_code: String,
    pub identity_namespace: String,
    pub identity_identifier_hash: String,
    pub node_id: String,
}

impl IdentityParams {
    pub fn selector(&self) -> IdentitySelector {
        IdentitySelector::from_parts(
            &self.reference_group_code,
            &self.identity_namespace,
            &self.identity_identifier_hash,
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AccessorIdParams {
    pub accessor_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RoleParams {
    pub role: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PurposeParams {
    pub purpose: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServiceIdParams {
    pub service_id: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AsIdParams {
    pub as_id: String,
}

/// `UpdateNode` transaction. Empty strings leave the stored key unchanged.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateNodeParams {
    pub public_key: String,
    pub master_public_key: String,
    pub supported_request_message_data_url_type_list: Option<Vec<String>>,
}

impl From<UpdateNodeParams> for NodePatch {
    fn from(params: UpdateNodeParams) -> Self {
        let non_empty = |value: String| (!value.is_empty()).then_some(value);
        NodePatch {
            public_key: non_empty(params.public_key),
            master_public_key: non_empty(params.master_public_key),
            supported_request_message_data_url_type_list: params
                .supported_request_message_data_url_type_list,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SetMqAddressesParams {
    pub addresses: Vec<MqAddress>,
}
