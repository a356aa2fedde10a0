//! # Domain Entities
//!
//! Ledger records of the identity federation.
//!
//! ## Type Decisions
//!
//! - Records never hold hash maps. Every list keeps insertion order so that
//!   two replicas encode identical logical state to identical bytes.
//! - Assurance levels are `f64` (IAL 2.3 is a legal value).
//! - Writes replace whole records; there is no partial field patching at
//!   the storage layer.

use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Participant role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "IdP")]
    IdP,
    #[serde(rename = "RP")]
    RP,
    #[serde(rename = "AS")]
    AS,
    #[serde(rename = "Proxy")]
    Proxy,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::IdP => "IdP",
            Role::RP => "RP",
            Role::AS => "AS",
            Role::Proxy => "Proxy",
        }
    }
}

/// Message queue address of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqAddress {
    pub ip: String,
    pub port: i64,
}

/// Identity of a participant.
///
/// ## Proxy indirection
///
/// A node with a non-empty `proxy_node_id` is fronted by that proxy. Its
/// external contact material (keys, addresses) is read from the proxy record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDetail {
    pub public_key: String,
    pub master_public_key: String,
    pub node_name: String,
    pub role: Role,
    /// IdP only.
    pub max_ial: f64,
    /// IdP only.
    pub max_aal: f64,
    /// IdP only.
    pub supported_request_message_data_url_type_list: Vec<String>,
    pub active: bool,
    pub mq: Vec<MqAddress>,
    pub proxy_node_id: Option<NodeId>,
    pub proxy_config: Option<String>,
}

impl NodeDetail {
    /// Create an active node with no capabilities and no addresses.
    pub fn new(node_name: impl Into<String>, role: Role) -> Self {
        Self {
            public_key: String::new(),
            master_public_key: String::new(),
            node_name: node_name.into(),
            role,
            max_ial: 0.0,
            max_aal: 0.0,
            supported_request_message_data_url_type_list: Vec::new(),
            active: true,
            mq: Vec::new(),
            proxy_node_id: None,
            proxy_config: None,
        }
    }

    /// Proxy the node sits behind, if any. Empty IDs count as no proxy.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy_node_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Identity bound into a reference group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub namespace: String,
    pub identifier_hash: String,
}

/// Accessor registered by a user at an IdP.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accessor {
    pub accessor_id: String,
    pub accessor_public_key: String,
    pub active: bool,
}

/// Association between an IdP and the identities of a reference group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdpAssociation {
    pub node_id: NodeId,
    pub active: bool,
    pub ial: f64,
    /// Distinct verification modes supported for this identity.
    pub mode: Vec<i32>,
    pub accessors: Vec<Accessor>,
}

/// Federation unit binding identities to the IdPs that vouch for them.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceGroup {
    pub identities: Vec<Identity>,
    pub idps: Vec<IdpAssociation>,
}

impl ReferenceGroup {
    /// Association owning the given accessor, by linear scan.
    pub fn accessor_owner(&self, accessor_id: &str) -> Option<(&IdpAssociation, &Accessor)> {
        self.idps.iter().find_map(|idp| {
            idp.accessors
                .iter()
                .find(|accessor| accessor.accessor_id == accessor_id)
                .map(|accessor| (idp, accessor))
        })
    }
}

/// Service catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetail {
    pub service_id: String,
    pub service_name: String,
    pub active: bool,
}

/// Global service catalog stored under `AllService`.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceDetailList {
    pub services: Vec<ServiceDetail>,
}

/// One AS offering a service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceDestination {
    pub node_id: NodeId,
    pub min_ial: f64,
    pub min_aal: f64,
    pub active: bool,
    pub supported_namespace_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceDestinationList {
    pub node: Vec<ServiceDestination>,
}

/// Governance approval of an AS for a service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveService {
    pub active: bool,
}

/// Service as listed in an AS's own catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProvidedService {
    pub service_id: String,
    pub min_ial: f64,
    pub min_aal: f64,
    pub active: bool,
    pub supported_namespace_list: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct ProvidedServiceList {
    pub services: Vec<ProvidedService>,
}

/// Verification outcome persisted as "" / "true" / "false".
///
/// `Unknown` means the check has not run yet, which is distinct from a
/// failed check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Validity {
    #[default]
    Unknown,
    True,
    False,
}

impl Validity {
    /// External form: `None` for not-yet-verified.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Validity::Unknown => None,
            Validity::True => Some(true),
            Validity::False => Some(false),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ial: f64,
    pub aal: f64,
    pub status: String,
    pub signature: String,
    pub idp_id: NodeId,
    #[serde(with = "crate::adapters::codec::validity_text")]
    pub valid_ial: Validity,
    #[serde(with = "crate::adapters::codec::validity_text")]
    pub valid_signature: Validity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    pub service_id: String,
    pub as_id_list: Vec<NodeId>,
    pub min_as: i64,
    pub request_params_hash: String,
    pub answered_as_id_list: Vec<NodeId>,
    pub received_data_from_list: Vec<NodeId>,
}

/// Verification transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub min_idp: i64,
    pub min_aal: f64,
    pub min_ial: f64,
    pub request_timeout: i64,
    pub idp_id_list: Vec<NodeId>,
    pub data_request_list: Vec<DataRequest>,
    pub request_message_hash: String,
    pub response_list: Vec<Response>,
    pub closed: bool,
    pub timed_out: bool,
    pub purpose: String,
    pub owner: NodeId,
    pub mode: i32,
    pub creation_block_height: i64,
    pub chain_id: String,
}

/// Namespace registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub namespace: String,
    pub description: String,
    pub active: bool,
    /// `UNLIMITED_IDENTIFIER_COUNT` means no cap.
    pub allowed_identifier_count_in_reference_group: i32,
}

/// Stored sentinel for "no identifier cap".
pub const UNLIMITED_IDENTIFIER_COUNT: i32 = -1;

impl Namespace {
    /// Identifier cap as surfaced to callers: the sentinel becomes 0.
    pub fn external_identifier_cap(&self) -> i32 {
        if self.allowed_identifier_count_in_reference_group == UNLIMITED_IDENTIFIER_COUNT {
            0
        } else {
            self.allowed_identifier_count_in_reference_group
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamespaceList {
    pub namespaces: Vec<Namespace>,
}

/// Per-purpose policy of permitted verification modes.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AllowedModeList {
    pub mode: Vec<i32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct AllowedMinIal {
    pub min_ial: f64,
}

/// Role directories and proxy membership lists.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeIdList {
    pub node_id: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_proxy_id_is_direct() {
        let mut node = NodeDetail::new("IdP One", Role::IdP);
        assert_eq!(node.proxy(), None);

        node.proxy_node_id = Some(String::new());
        assert_eq!(node.proxy(), None);

        node.proxy_node_id = Some("proxy1".into());
        assert_eq!(node.proxy(), Some("proxy1"));
    }

    #[test]
    fn test_accessor_owner_scan() {
        let group = ReferenceGroup {
            identities: vec![],
            idps: vec![
                IdpAssociation {
                    node_id: "idp1".into(),
                    active: true,
                    ial: 2.3,
                    mode: vec![2, 3],
                    accessors: vec![],
                },
                IdpAssociation {
                    node_id: "idp2".into(),
                    active: true,
                    ial: 3.0,
                    mode: vec![3],
                    accessors: vec![Accessor {
                        accessor_id: "acc-1".into(),
                        accessor_public_key: "pk".into(),
                        active: false,
                    }],
                },
            ],
        };

        let (owner, accessor) = group.accessor_owner("acc-1").unwrap();
        assert_eq!(owner.node_id, "idp2");
        assert!(!accessor.active);
        assert!(group.accessor_owner("acc-2").is_none());
    }

    #[test]
    fn test_identifier_cap_sentinel() {
        let mut ns = Namespace {
            namespace: "citizen_id".into(),
            description: String::new(),
            active: true,
            allowed_identifier_count_in_reference_group: UNLIMITED_IDENTIFIER_COUNT,
        };
        assert_eq!(ns.external_identifier_cap(), 0);

        ns.allowed_identifier_count_in_reference_group = 3;
        assert_eq!(ns.external_identifier_cap(), 3);
    }

    #[test]
    fn test_validity_external_form() {
        assert_eq!(Validity::default(), Validity::Unknown);
        assert_eq!(Validity::Unknown.as_option(), None);
        assert_eq!(Validity::True.as_option(), Some(true));
        assert_eq!(Validity::False.as_option(), Some(false));
    }
}
