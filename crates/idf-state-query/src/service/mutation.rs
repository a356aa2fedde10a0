//! Node detail and address updates.
//!
//! Every mutation reads the whole record through the working view,
//! validates, and writes the whole record back. Nothing is written on
//! failure.

use super::repository::EntityRepository;
use crate::domain::{MqAddress, Role, StateError};
use crate::ports::{RecordCodec, StateWriter, VersionedStore, WorkingView};
use tracing::{debug, info};

/// Fields an `UpdateNode` transaction may overwrite. `None` leaves the
/// stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub public_key: Option<String>,
    pub master_public_key: Option<String>,
    /// Applied only to IdP nodes.
    pub supported_request_message_data_url_type_list: Option<Vec<String>>,
}

pub struct MutationService<'a, W: StateWriter, C: RecordCodec> {
    repo: EntityRepository<'a, W, C>,
}

impl<'a, S: VersionedStore + ?Sized, C: RecordCodec> MutationService<'a, WorkingView<'a, S>, C> {
    pub fn new(view: &'a WorkingView<'a, S>, codec: &'a C) -> Self {
        Self {
            repo: EntityRepository::new(view, codec),
        }
    }
}

impl<W: StateWriter, C: RecordCodec> MutationService<'_, W, C> {
    pub fn update_node(&self, node_id: &str, patch: &NodePatch) -> Result<(), StateError> {
        let Some(mut node) = self.repo.node(node_id)? else {
            return Err(StateError::NodeIdNotFound {
                node_id: node_id.to_string(),
            });
        };
        if let Some(master_public_key) = &patch.master_public_key {
            node.master_public_key = master_public_key.clone();
        }
        if let Some(public_key) = &patch.public_key {
            node.public_key = public_key.clone();
        }
        if let Some(types) = &patch.supported_request_message_data_url_type_list {
            if node.role == Role::IdP {
                node.supported_request_message_data_url_type_list = types.clone();
            } else {
                debug!(node_id, role = node.role.as_str(), "ignoring data URL types for non-IdP node");
            }
        }
        self.repo.put_node(node_id, &node)?;
        info!(node_id, "node detail updated");
        Ok(())
    }

    /// Replace the node's address list. An absent node surfaces as a
    /// decode error.
    pub fn set_mq_addresses(&self, node_id: &str, addresses: &[MqAddress]) -> Result<(), StateError> {
        let mut node = self.repo.node_or_decode_error(node_id)?;
        node.mq = addresses.to_vec();
        self.repo.put_node(node_id, &node)?;
        info!(node_id, count = addresses.len(), "message queue addresses replaced");
        Ok(())
    }
}
