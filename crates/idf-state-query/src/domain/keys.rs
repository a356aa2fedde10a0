//! # State Keys
//!
//! Storage key layout: `prefix|id[|id...]`, plus singleton keys.

use crate::domain::entities::Role;

/// Segment separator inside composite keys.
pub const KEY_SEPARATOR: &str = "|";

/// Key prefixes for the ledger key-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPrefix {
    /// `NodeID|{node}` -> NodeDetail
    Node,
    /// `BehindProxyNode|{proxy}` -> NodeIdList
    BehindProxyNode,
    /// `Service|{service}` -> ServiceDetail
    Service,
    /// `ServiceDestination|{service}` -> ServiceDestinationList
    ServiceDestination,
    /// `ApproveKey|{service}|{node}` -> ApproveService
    ApprovedService,
    /// `ProvideService|{as}` -> ProvidedServiceList
    ProvidedServices,
    /// `RefGroupCode|{code}` -> ReferenceGroup
    RefGroupCode,
    /// `identityToRefCodeKey|{namespace}|{hash}` -> raw code
    IdentityToRefCode,
    /// `accessorToRefCodeKey|{accessor}` -> raw code
    AccessorToRefCode,
    /// `AllowedModeList|{purpose}` -> AllowedModeList
    AllowedModeList,
    /// `Request|{request}` -> Request
    Request,
    /// `SignData|{node}|{service}|{request}` -> raw signature
    DataSignature,
}

impl KeyPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPrefix::Node => "NodeID",
            KeyPrefix::BehindProxyNode => "BehindProxyNode",
            KeyPrefix::Service => "Service",
            KeyPrefix::ServiceDestination => "ServiceDestination",
            KeyPrefix::ApprovedService => "ApproveKey",
            KeyPrefix::ProvidedServices => "ProvideService",
            KeyPrefix::RefGroupCode => "RefGroupCode",
            KeyPrefix::IdentityToRefCode => "identityToRefCodeKey",
            KeyPrefix::AccessorToRefCode => "accessorToRefCodeKey",
            KeyPrefix::AllowedModeList => "AllowedModeList",
            KeyPrefix::Request => "Request",
            KeyPrefix::DataSignature => "SignData",
        }
    }

    /// Build a full key from the given id segments.
    pub fn key(&self, segments: &[&str]) -> Vec<u8> {
        let mut key = String::from(self.as_str());
        for segment in segments {
            key.push_str(KEY_SEPARATOR);
            key.push_str(segment);
        }
        key.into_bytes()
    }
}

/// Singleton keys.
pub mod singleton {
    pub const IDP_LIST: &[u8] = b"IdPList";
    pub const RP_LIST: &[u8] = b"rpList";
    pub const AS_LIST: &[u8] = b"asList";
    pub const ALL_LIST: &[u8] = b"allList";
    pub const ALL_NAMESPACE: &[u8] = b"AllNamespace";
    pub const ALL_SERVICE: &[u8] = b"AllService";
    pub const INIT_STATE: &[u8] = b"InitState";
    pub const CHAIN_HISTORY_INFO: &[u8] = b"ChainHistoryInfo";
    pub const ALLOWED_MIN_IAL_FIRST_IDP: &[u8] = b"AllowedMinIalForRegisterIdentityAtFirstIdp";
}

/// Which role directory an enumeration reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDirectory {
    IdP,
    RP,
    AS,
    All,
}

impl RoleDirectory {
    /// Parse the case-insensitive role filter; anything unrecognised
    /// (including "") selects every node.
    pub fn parse(role: &str) -> Self {
        match role.to_ascii_lowercase().as_str() {
            "idp" => RoleDirectory::IdP,
            "rp" => RoleDirectory::RP,
            "as" => RoleDirectory::AS,
            _ => RoleDirectory::All,
        }
    }

    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::IdP => Some(RoleDirectory::IdP),
            Role::RP => Some(RoleDirectory::RP),
            Role::AS => Some(RoleDirectory::AS),
            Role::Proxy => None,
        }
    }

    pub fn key(&self) -> &'static [u8] {
        match self {
            RoleDirectory::IdP => singleton::IDP_LIST,
            RoleDirectory::RP => singleton::RP_LIST,
            RoleDirectory::AS => singleton::AS_LIST,
            RoleDirectory::All => singleton::ALL_LIST,
        }
    }
}

/// Render a key for logs and error messages.
pub fn display_key(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_keys() {
        assert_eq!(KeyPrefix::Node.key(&["idp1"]), b"NodeID|idp1".to_vec());
        assert_eq!(
            KeyPrefix::IdentityToRefCode.key(&["citizen_id", "abc"]),
            b"identityToRefCodeKey|citizen_id|abc".to_vec()
        );
        assert_eq!(
            KeyPrefix::ApprovedService.key(&["svc", "as1"]),
            b"ApproveKey|svc|as1".to_vec()
        );
        assert_eq!(
            KeyPrefix::DataSignature.key(&["as1", "svc", "req"]),
            b"SignData|as1|svc|req".to_vec()
        );
    }

    #[test]
    fn test_role_directory_parse() {
        assert_eq!(RoleDirectory::parse("IdP"), RoleDirectory::IdP);
        assert_eq!(RoleDirectory::parse("rp"), RoleDirectory::RP);
        assert_eq!(RoleDirectory::parse("AS"), RoleDirectory::AS);
        assert_eq!(RoleDirectory::parse(""), RoleDirectory::All);
        assert_eq!(RoleDirectory::parse("proxy"), RoleDirectory::All);
        assert_eq!(RoleDirectory::IdP.key(), b"IdPList");
        assert_eq!(RoleDirectory::for_role(Role::Proxy), None);
    }
}
