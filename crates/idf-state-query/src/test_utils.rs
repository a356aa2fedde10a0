//! Ledger seeding helpers for tests.

use crate::adapters::{CanonicalCodec, InMemoryVersionedStore};
use crate::domain::keys::{KeyPrefix, RoleDirectory};
use crate::domain::{
    Accessor, ApproveService, Identity, IdpAssociation, MqAddress, NodeDetail, NodeIdList,
    ReferenceGroup, Request, Response, Role, ServiceDestination, ServiceDestinationList,
    ServiceDetail, StateError, Validity,
};
use crate::ports::{CommittedView, RecordCodec, StateWriter, VersionedStore, WorkingView};
use crate::service::EntityRepository;

pub type WriteRepo<'a> =
    EntityRepository<'a, WorkingView<'a, InMemoryVersionedStore>, CanonicalCodec>;
pub type ReadRepo<'a> =
    EntityRepository<'a, CommittedView<'a, InMemoryVersionedStore>, CanonicalCodec>;

/// In-memory ledger with a default codec.
pub struct LedgerFixture {
    pub store: InMemoryVersionedStore,
    pub codec: CanonicalCodec,
}

impl LedgerFixture {
    pub fn new() -> Self {
        Self {
            store: InMemoryVersionedStore::new(),
            codec: CanonicalCodec::default(),
        }
    }

    /// Run `seed` against the working view, then commit one block.
    pub fn write(&self, seed: impl FnOnce(&WriteRepo<'_>) -> Result<(), StateError>) -> u64 {
        let view = WorkingView::new(&self.store);
        let repo = EntityRepository::new(&view, &self.codec);
        seed(&repo).expect("seeding failed");
        self.store.commit().expect("commit failed")
    }

    /// Run `read` against committed state.
    pub fn with_repo<T>(&self, read: impl FnOnce(&ReadRepo<'_>) -> T) -> T {
        let view = CommittedView::latest(&self.store);
        let repo = EntityRepository::new(&view, &self.codec);
        read(&repo)
    }
}

impl Default for LedgerFixture {
    fn default() -> Self {
        Self::new()
    }
}

pub fn mq(ip: &str, port: i64) -> MqAddress {
    MqAddress {
        ip: ip.to_string(),
        port,
    }
}

/// Active IdP with the given assurance levels and one address.
pub fn make_idp(name: &str, max_ial: f64, max_aal: f64) -> NodeDetail {
    let mut node = NodeDetail::new(name, Role::IdP);
    node.public_key = format!("{name}-public-key");
    node.master_public_key = format!("{name}-master-public-key");
    node.max_ial = max_ial;
    node.max_aal = max_aal;
    node.mq = vec![mq("127.0.0.1", 5000)];
    node
}

pub fn make_as(name: &str) -> NodeDetail {
    let mut node = NodeDetail::new(name, Role::AS);
    node.public_key = format!("{name}-public-key");
    node.mq = vec![mq("127.0.0.1", 6000)];
    node
}

pub fn make_proxy(name: &str) -> NodeDetail {
    let mut node = NodeDetail::new(name, Role::Proxy);
    node.public_key = format!("{name}-public-key");
    node.master_public_key = format!("{name}-master-public-key");
    node.mq = vec![mq("10.0.0.1", 7000)];
    node
}

pub fn seed_node<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    node_id: &str,
    node: &NodeDetail,
) -> Result<(), StateError> {
    repo.put_node(node_id, node)
}

/// Write the node and list it in its role directory and the all-nodes
/// directory.
pub fn register_node<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    node_id: &str,
    node: &NodeDetail,
) -> Result<(), StateError> {
    repo.put_node(node_id, node)?;
    let mut directories = vec![RoleDirectory::All];
    directories.extend(RoleDirectory::for_role(node.role));
    for directory in directories {
        let mut list = repo.role_directory(directory)?.unwrap_or_default();
        list.node_id.push(node_id.to_string());
        repo.put_record(directory.key(), &list)?;
    }
    if let Some(proxy_id) = node.proxy() {
        let mut behind = repo.nodes_behind_proxy(proxy_id)?.unwrap_or_default();
        behind.node_id.push(node_id.to_string());
        repo.put_record(&KeyPrefix::BehindProxyNode.key(&[proxy_id]), &behind)?;
    }
    Ok(())
}

pub fn association(node_id: &str, ial: f64, mode: Vec<i32>) -> IdpAssociation {
    IdpAssociation {
        node_id: node_id.to_string(),
        active: true,
        ial,
        mode,
        accessors: Vec::new(),
    }
}

/// Reference group with a single `citizen_id` identity (hash
/// `hash-{code}`) and the identity index pointing at it.
pub fn seed_reference_group<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    code: &str,
    idps: Vec<IdpAssociation>,
) -> Result<(), StateError> {
    let identity_hash = format!("hash-{code}");
    let group = ReferenceGroup {
        identities: vec![Identity {
            namespace: "citizen_id".into(),
            identifier_hash: identity_hash.clone(),
        }],
        idps,
    };
    repo.put_record(&KeyPrefix::RefGroupCode.key(&[code]), &group)?;
    repo.put_text(
        &KeyPrefix::IdentityToRefCode.key(&["citizen_id", &identity_hash]),
        code,
    )
}

/// Group with one IdP association holding one active accessor, plus both
/// reverse indexes.
pub fn seed_group_with_accessor<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    code: &str,
    idp_id: &str,
    accessor_id: &str,
) -> Result<(), StateError> {
    let mut idp = association(idp_id, 2.3, vec![2, 3]);
    idp.accessors.push(Accessor {
        accessor_id: accessor_id.to_string(),
        accessor_public_key: format!("{accessor_id}-public-key"),
        active: true,
    });
    seed_reference_group(repo, code, vec![idp])?;
    repo.put_text(&KeyPrefix::AccessorToRefCode.key(&[accessor_id]), code)
}

/// Active service offered by the given AS nodes, each approved.
pub fn seed_service<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    service_id: &str,
    destinations: Vec<ServiceDestination>,
) -> Result<(), StateError> {
    repo.put_record(
        &KeyPrefix::Service.key(&[service_id]),
        &ServiceDetail {
            service_id: service_id.to_string(),
            service_name: format!("{service_id} name"),
            active: true,
        },
    )?;
    for destination in &destinations {
        repo.put_record(
            &KeyPrefix::ApprovedService.key(&[service_id, &destination.node_id]),
            &ApproveService { active: true },
        )?;
    }
    repo.put_record(
        &KeyPrefix::ServiceDestination.key(&[service_id]),
        &ServiceDestinationList { node: destinations },
    )
}

pub fn destination(node_id: &str, active: bool) -> ServiceDestination {
    ServiceDestination {
        node_id: node_id.to_string(),
        min_ial: 1.1,
        min_aal: 1.0,
        active,
        supported_namespace_list: vec!["citizen_id".into()],
    }
}

pub fn node_id_list(ids: &[&str]) -> NodeIdList {
    NodeIdList {
        node_id: ids.iter().map(|id| id.to_string()).collect(),
    }
}

/// Open request owned by `rp1` with no responses yet.
pub fn make_request(request_id: &str) -> Request {
    Request {
        request_id: request_id.to_string(),
        min_idp: 1,
        min_aal: 1.0,
        min_ial: 1.1,
        request_timeout: 3600,
        idp_id_list: vec!["idp1".into()],
        data_request_list: Vec::new(),
        request_message_hash: format!("{request_id}-message-hash"),
        response_list: Vec::new(),
        closed: false,
        timed_out: false,
        purpose: String::new(),
        owner: "rp1".into(),
        mode: 2,
        creation_block_height: 1,
        chain_id: "test-chain".into(),
    }
}

pub fn response(idp_id: &str, valid_ial: Validity, valid_signature: Validity) -> Response {
    Response {
        ial: 2.3,
        aal: 2.2,
        status: "accept".into(),
        signature: format!("{idp_id}-signature"),
        idp_id: idp_id.to_string(),
        valid_ial,
        valid_signature,
    }
}

pub fn seed_request<R: StateWriter, C: RecordCodec>(
    repo: &EntityRepository<'_, R, C>,
    request: &Request,
) -> Result<(), StateError> {
    repo.put_record(&KeyPrefix::Request.key(&[&request.request_id]), request)
}
