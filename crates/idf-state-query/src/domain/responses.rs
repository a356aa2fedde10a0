//! # Response Shapes
//!
//! Result records returned by read operations.
//!
//! Node descriptors come in several fixed shapes. Each shape is its own
//! struct and the lists hold a sum type over them, serialized untagged so
//! every variant keeps exactly its own field set on the wire. List fields
//! are always present; they are never omitted or null.

use crate::domain::entities::{
    IdpAssociation, MqAddress, Namespace, NodeDetail, NodeId, ProvidedService, Request,
    Response, ServiceDestination,
};
use serde::Serialize;

/// Contact material of a proxy, as embedded in discovery results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProxyContact {
    pub node_id: NodeId,
    pub public_key: String,
    pub mq: Vec<MqAddress>,
    pub config: Option<String>,
}

impl ProxyContact {
    /// `config` comes from the fronted node, everything else from the proxy.
    pub fn new(proxy_id: &str, proxy: &NodeDetail, fronted: &NodeDetail) -> Self {
        Self {
            node_id: proxy_id.to_string(),
            public_key: proxy.public_key.clone(),
            mq: proxy.mq.clone(),
            config: fronted.proxy_config.clone(),
        }
    }
}

/// Full proxy identity, as embedded in node info.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProxyDescriptor {
    pub node_id: NodeId,
    pub node_name: String,
    pub public_key: String,
    pub master_public_key: String,
    pub mq: Vec<MqAddress>,
    pub config: Option<String>,
}

impl ProxyDescriptor {
    pub fn new(proxy_id: &str, proxy: &NodeDetail, fronted: &NodeDetail) -> Self {
        Self {
            node_id: proxy_id.to_string(),
            node_name: proxy.node_name.clone(),
            public_key: proxy.public_key.clone(),
            master_public_key: proxy.master_public_key.clone(),
            mq: proxy.mq.clone(),
            config: fronted.proxy_config.clone(),
        }
    }
}

// =============================================================================
// IDP DISCOVERY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeDirect {
    pub node_id: NodeId,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub public_key: String,
    pub mq: Vec<MqAddress>,
    pub supported_request_message_data_url_type_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeProxied {
    pub node_id: NodeId,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub proxy: ProxyContact,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeDirectWithAssociation {
    pub node_id: NodeId,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub public_key: String,
    pub mq: Vec<MqAddress>,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub ial: f64,
    pub mode_list: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeProxiedWithAssociation {
    pub node_id: NodeId,
    pub name: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub proxy: ProxyContact,
    pub ial: f64,
    pub mode_list: Vec<i32>,
}

/// IdP descriptor returned by discovery.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IdpNode {
    Direct(IdpNodeDirect),
    Proxied(IdpNodeProxied),
    DirectWithAssociation(IdpNodeDirectWithAssociation),
    ProxiedWithAssociation(IdpNodeProxiedWithAssociation),
}

impl IdpNode {
    /// Pick the shape from the association (identity-scoped query or not)
    /// and the resolved proxy contact.
    pub fn build(
        node_id: &str,
        node: &NodeDetail,
        association: Option<&IdpAssociation>,
        proxy: Option<ProxyContact>,
    ) -> Self {
        let node_id = node_id.to_string();
        let name = node.node_name.clone();
        let types = node.supported_request_message_data_url_type_list.clone();
        match (association, proxy) {
            (None, None) => IdpNode::Direct(IdpNodeDirect {
                node_id,
                name,
                max_ial: node.max_ial,
                max_aal: node.max_aal,
                public_key: node.public_key.clone(),
                mq: node.mq.clone(),
                supported_request_message_data_url_type_list: types,
            }),
            (None, Some(proxy)) => IdpNode::Proxied(IdpNodeProxied {
                node_id,
                name,
                max_ial: node.max_ial,
                max_aal: node.max_aal,
                supported_request_message_data_url_type_list: types,
                proxy,
            }),
            (Some(association), None) => {
                IdpNode::DirectWithAssociation(IdpNodeDirectWithAssociation {
                    node_id,
                    name,
                    max_ial: node.max_ial,
                    max_aal: node.max_aal,
                    public_key: node.public_key.clone(),
                    mq: node.mq.clone(),
                    supported_request_message_data_url_type_list: types,
                    ial: association.ial,
                    mode_list: association.mode.clone(),
                })
            }
            (Some(association), Some(proxy)) => {
                IdpNode::ProxiedWithAssociation(IdpNodeProxiedWithAssociation {
                    node_id,
                    name,
                    max_ial: node.max_ial,
                    max_aal: node.max_aal,
                    supported_request_message_data_url_type_list: types,
                    proxy,
                    ial: association.ial,
                    mode_list: association.mode.clone(),
                })
            }
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            IdpNode::Direct(node) => &node.node_id,
            IdpNode::Proxied(node) => &node.node_id,
            IdpNode::DirectWithAssociation(node) => &node.node_id,
            IdpNode::ProxiedWithAssociation(node) => &node.node_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct IdpNodesResult {
    pub node: Vec<IdpNode>,
}

// =============================================================================
// AS DISCOVERY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AsNodeDirect {
    pub node_id: NodeId,
    pub name: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub public_key: String,
    pub mq: Vec<MqAddress>,
    pub supported_namespace_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AsNodeProxied {
    pub node_id: NodeId,
    pub name: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub supported_namespace_list: Vec<String>,
    pub proxy: ProxyContact,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AsNode {
    Direct(AsNodeDirect),
    Proxied(AsNodeProxied),
}

impl AsNode {
    pub fn build(
        destination: &ServiceDestination,
        node: &NodeDetail,
        proxy: Option<ProxyContact>,
    ) -> Self {
        match proxy {
            None => AsNode::Direct(AsNodeDirect {
                node_id: destination.node_id.clone(),
                name: node.node_name.clone(),
                min_ial: destination.min_ial,
                min_aal: destination.min_aal,
                public_key: node.public_key.clone(),
                mq: node.mq.clone(),
                supported_namespace_list: destination.supported_namespace_list.clone(),
            }),
            Some(proxy) => AsNode::Proxied(AsNodeProxied {
                node_id: destination.node_id.clone(),
                name: node.node_name.clone(),
                min_ial: destination.min_ial,
                min_aal: destination.min_aal,
                supported_namespace_list: destination.supported_namespace_list.clone(),
                proxy,
            }),
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            AsNode::Direct(node) => &node.node_id,
            AsNode::Proxied(node) => &node.node_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct AsNodesResult {
    pub node: Vec<AsNode>,
}

// =============================================================================
// NODE INFO
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeInfo {
    pub public_key: String,
    pub master_public_key: String,
    pub node_name: String,
    pub role: &'static str,
    pub max_ial: f64,
    pub max_aal: f64,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub mq: Vec<MqAddress>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BasicNodeInfo {
    pub public_key: String,
    pub master_public_key: String,
    pub node_name: String,
    pub role: &'static str,
    pub mq: Vec<MqAddress>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpNodeInfoBehindProxy {
    pub node_name: String,
    pub role: &'static str,
    pub max_ial: f64,
    pub max_aal: f64,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub proxy: ProxyDescriptor,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BasicNodeInfoBehindProxy {
    pub node_name: String,
    pub role: &'static str,
    pub proxy: ProxyDescriptor,
    pub active: bool,
}

/// Role-specific node descriptor. Proxied shapes carry no key material or
/// addresses of their own.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeInfo {
    Idp(IdpNodeInfo),
    Basic(BasicNodeInfo),
    IdpBehindProxy(IdpNodeInfoBehindProxy),
    BasicBehindProxy(BasicNodeInfoBehindProxy),
}

impl NodeInfo {
    pub fn build(node: &NodeDetail, proxy: Option<ProxyDescriptor>) -> Self {
        let is_idp = node.role == crate::domain::entities::Role::IdP;
        match (is_idp, proxy) {
            (true, None) => NodeInfo::Idp(IdpNodeInfo {
                public_key: node.public_key.clone(),
                master_public_key: node.master_public_key.clone(),
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                max_ial: node.max_ial,
                max_aal: node.max_aal,
                supported_request_message_data_url_type_list: node
                    .supported_request_message_data_url_type_list
                    .clone(),
                mq: node.mq.clone(),
                active: node.active,
            }),
            (false, None) => NodeInfo::Basic(BasicNodeInfo {
                public_key: node.public_key.clone(),
                master_public_key: node.master_public_key.clone(),
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                mq: node.mq.clone(),
                active: node.active,
            }),
            (true, Some(proxy)) => NodeInfo::IdpBehindProxy(IdpNodeInfoBehindProxy {
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                max_ial: node.max_ial,
                max_aal: node.max_aal,
                supported_request_message_data_url_type_list: node
                    .supported_request_message_data_url_type_list
                    .clone(),
                proxy,
                active: node.active,
            }),
            (false, Some(proxy)) => NodeInfo::BasicBehindProxy(BasicNodeInfoBehindProxy {
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                proxy,
                active: node.active,
            }),
        }
    }
}

// =============================================================================
// NODES BEHIND PROXY
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdpBehindProxy {
    pub node_id: NodeId,
    pub node_name: String,
    pub role: &'static str,
    pub public_key: String,
    pub master_public_key: String,
    pub max_ial: f64,
    pub max_aal: f64,
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub config: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OtherBehindProxy {
    pub node_id: NodeId,
    pub node_name: String,
    pub role: &'static str,
    pub public_key: String,
    pub master_public_key: String,
    pub config: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeBehindProxy {
    Idp(IdpBehindProxy),
    Other(OtherBehindProxy),
}

impl NodeBehindProxy {
    pub fn build(node_id: &str, node: &NodeDetail) -> Self {
        if node.role == crate::domain::entities::Role::IdP {
            NodeBehindProxy::Idp(IdpBehindProxy {
                node_id: node_id.to_string(),
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                public_key: node.public_key.clone(),
                master_public_key: node.master_public_key.clone(),
                max_ial: node.max_ial,
                max_aal: node.max_aal,
                supported_request_message_data_url_type_list: node
                    .supported_request_message_data_url_type_list
                    .clone(),
                config: node.proxy_config.clone(),
            })
        } else {
            NodeBehindProxy::Other(OtherBehindProxy {
                node_id: node_id.to_string(),
                node_name: node.node_name.clone(),
                role: node.role.as_str(),
                public_key: node.public_key.clone(),
                master_public_key: node.master_public_key.clone(),
                config: node.proxy_config.clone(),
            })
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct NodesBehindProxyResult {
    pub nodes: Vec<NodeBehindProxy>,
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    pub closed: bool,
    pub timed_out: bool,
    pub request_message_hash: String,
    pub mode: i32,
}

impl From<&Request> for RequestSummary {
    fn from(request: &Request) -> Self {
        Self {
            closed: request.closed,
            timed_out: request.timed_out,
            request_message_hash: request.request_message_hash.clone(),
            mode: request.mode,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DataRequestView {
    pub service_id: String,
    pub as_id_list: Vec<NodeId>,
    pub min_as: i64,
    pub request_params_hash: String,
    pub answered_as_id_list: Vec<NodeId>,
    pub received_data_from_list: Vec<NodeId>,
}

/// Response with tri-state validity: `null` means not yet verified.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseView {
    pub ial: f64,
    pub aal: f64,
    pub status: String,
    pub signature: String,
    pub idp_id: NodeId,
    pub valid_ial: Option<bool>,
    pub valid_signature: Option<bool>,
}

impl From<&Response> for ResponseView {
    fn from(response: &Response) -> Self {
        Self {
            ial: response.ial,
            aal: response.aal,
            status: response.status.clone(),
            signature: response.signature.clone(),
            idp_id: response.idp_id.clone(),
            valid_ial: response.valid_ial.as_option(),
            valid_signature: response.valid_signature.as_option(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestDetail {
    pub request_id: String,
    pub min_idp: i64,
    pub min_aal: f64,
    pub min_ial: f64,
    pub request_timeout: i64,
    pub idp_id_list: Vec<NodeId>,
    pub data_request_list: Vec<DataRequestView>,
    pub request_message_hash: String,
    pub response_list: Vec<ResponseView>,
    pub closed: bool,
    pub timed_out: bool,
    pub purpose: String,
    pub mode: i32,
    pub requester_node_id: NodeId,
    pub creation_block_height: i64,
    pub creation_chain_id: String,
}

impl From<&Request> for RequestDetail {
    fn from(request: &Request) -> Self {
        Self {
            request_id: request.request_id.clone(),
            min_idp: request.min_idp,
            min_aal: request.min_aal,
            min_ial: request.min_ial,
            request_timeout: request.request_timeout,
            idp_id_list: request.idp_id_list.clone(),
            data_request_list: request
                .data_request_list
                .iter()
                .map(|data_request| DataRequestView {
                    service_id: data_request.service_id.clone(),
                    as_id_list: data_request.as_id_list.clone(),
                    min_as: data_request.min_as,
                    request_params_hash: data_request.request_params_hash.clone(),
                    answered_as_id_list: data_request.answered_as_id_list.clone(),
                    received_data_from_list: data_request.received_data_from_list.clone(),
                })
                .collect(),
            request_message_hash: request.request_message_hash.clone(),
            response_list: request.response_list.iter().map(ResponseView::from).collect(),
            closed: request.closed,
            timed_out: request.timed_out,
            purpose: request.purpose.clone(),
            mode: request.mode,
            requester_node_id: request.owner.clone(),
            creation_block_height: request.creation_block_height,
            creation_chain_id: request.chain_id.clone(),
        }
    }
}

// =============================================================================
// SMALL RESULTS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct NodeIdListResult {
    pub node_id_list: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Default)]
pub struct ExistResult {
    pub exist: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct AccessorKeyResult {
    pub accessor_public_key: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct AccessorOwnerResult {
    pub node_id: NodeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct PublicKeyResult {
    pub public_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct MasterPublicKeyResult {
    pub master_public_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct AllowedModeListResult {
    pub allowed_mode_list: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamespaceView {
    pub namespace: String,
    pub description: String,
    pub active: bool,
    pub allowed_identifier_count_in_reference_group: i32,
}

impl From<&Namespace> for NamespaceView {
    fn from(namespace: &Namespace) -> Self {
        Self {
            namespace: namespace.namespace.clone(),
            description: namespace.description.clone(),
            active: namespace.active,
            allowed_identifier_count_in_reference_group: namespace.external_identifier_cap(),
        }
    }
}

/// Entry of an AS's own catalog. `suspended` is the negated governance
/// approval and is independent of `active`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProvidedServiceView {
    pub service_id: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub active: bool,
    pub suspended: bool,
    pub supported_namespace_list: Vec<String>,
}

impl ProvidedServiceView {
    pub fn new(service: &ProvidedService, suspended: bool) -> Self {
        Self {
            service_id: service.service_id.clone(),
            min_ial: service.min_ial,
            min_aal: service.min_aal,
            active: service.active,
            suspended,
            supported_namespace_list: service.supported_namespace_list.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct ServicesByAsResult {
    pub services: Vec<ProvidedServiceView>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Default)]
pub struct IdentityInfoResult {
    pub ial: f64,
    pub mode_list: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct DataSignatureResult {
    pub signature: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Default)]
pub struct ReferenceGroupCodeResult {
    pub reference_group_code: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Default)]
pub struct MinIalResult {
    pub min_ial: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Default)]
pub struct InitEndedResult {
    pub init_ended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, Validity};

    fn idp_node() -> NodeDetail {
        let mut node = NodeDetail::new("IdP One", Role::IdP);
        node.public_key = "idp-pk".into();
        node.max_ial = 3.0;
        node.max_aal = 2.2;
        node.mq = vec![MqAddress {
            ip: "10.0.0.1".into(),
            port: 5555,
        }];
        node
    }

    fn proxy_node() -> NodeDetail {
        let mut proxy = NodeDetail::new("Proxy", Role::Proxy);
        proxy.public_key = "proxy-pk".into();
        proxy.master_public_key = "proxy-mpk".into();
        proxy.mq = vec![MqAddress {
            ip: "10.0.0.9".into(),
            port: 6000,
        }];
        proxy
    }

    #[test]
    fn test_idp_node_shapes() {
        let node = idp_node();
        let association = IdpAssociation {
            node_id: "idp1".into(),
            active: true,
            ial: 2.3,
            mode: vec![2, 3],
            accessors: vec![],
        };

        let direct = serde_json::to_value(IdpNode::build("idp1", &node, None, None)).unwrap();
        assert_eq!(direct["public_key"], "idp-pk");
        assert_eq!(direct["mq"][0]["port"], 5555);
        assert!(direct.get("ial").is_none());
        assert!(direct.get("proxy").is_none());

        let with_association =
            serde_json::to_value(IdpNode::build("idp1", &node, Some(&association), None)).unwrap();
        assert_eq!(with_association["ial"], 2.3);
        assert_eq!(with_association["mode_list"], serde_json::json!([2, 3]));

        let mut fronted = node.clone();
        fronted.proxy_node_id = Some("proxy1".into());
        fronted.proxy_config = Some("KEY_ON_PROXY".into());
        let contact = ProxyContact::new("proxy1", &proxy_node(), &fronted);
        let proxied = serde_json::to_value(IdpNode::build(
            "idp1",
            &fronted,
            Some(&association),
            Some(contact),
        ))
        .unwrap();
        assert!(proxied.get("public_key").is_none());
        assert!(proxied.get("mq").is_none());
        assert_eq!(proxied["proxy"]["public_key"], "proxy-pk");
        assert_eq!(proxied["proxy"]["mq"][0]["ip"], "10.0.0.9");
        assert_eq!(proxied["proxy"]["config"], "KEY_ON_PROXY");
        assert_eq!(proxied["mode_list"], serde_json::json!([2, 3]));
    }

    #[test]
    fn test_node_info_behind_proxy_hides_own_contact() {
        let mut node = idp_node();
        node.proxy_node_id = Some("proxy1".into());
        let info = NodeInfo::build(
            &node,
            Some(ProxyDescriptor::new("proxy1", &proxy_node(), &node)),
        );
        let value = serde_json::to_value(info).unwrap();
        assert!(value.get("public_key").is_none());
        assert_eq!(value["proxy"]["public_key"], "proxy-pk");
        assert_eq!(value["proxy"]["master_public_key"], "proxy-mpk");
        assert_eq!(value["role"], "IdP");
    }

    #[test]
    fn test_empty_lists_are_not_null() {
        let node = NodeDetail::new("RP", Role::RP);
        let value = serde_json::to_value(NodeInfo::build(&node, None)).unwrap();
        assert_eq!(value["mq"], serde_json::json!([]));

        let value = serde_json::to_value(IdpNodesResult::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "node": [] }));
    }

    #[test]
    fn test_response_view_tri_state() {
        let response = Response {
            ial: 2.3,
            aal: 2.0,
            status: "accept".into(),
            signature: "sig".into(),
            idp_id: "idp1".into(),
            valid_ial: Validity::Unknown,
            valid_signature: Validity::False,
        };
        let value = serde_json::to_value(ResponseView::from(&response)).unwrap();
        assert!(value["valid_ial"].is_null());
        assert_eq!(value["valid_signature"], false);
    }
}
