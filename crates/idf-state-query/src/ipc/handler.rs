//! # State Application Facade
//!
//! Entry point for the external transport. Queries run against a
//! [`CommittedView`], transactions against a [`WorkingView`]; pending
//! writes become visible to queries only after [`StateApp::commit`].
//!
//! ```text
//! query(op, params, height)      ──→ QueryService    ──→ CommittedView ─┐
//! deliver_tx(op, params, caller) ──→ MutationService ──→ WorkingView ───┤
//! commit() / rollback()          ─────────────────────────────────────→ VersionedStore
//! ```

use crate::adapters::{handle_query, handle_tx, CanonicalCodec, RouterError};
use crate::domain::{ResultCode, StateError, StateQueryConfig};
use crate::ports::{CommittedView, VersionedStore, WorkingView};
use crate::service::{MutationService, QueryService, QueryStatus};
use tracing::{error, info, warn};

/// Log string of a successful transaction.
const TX_SUCCESS: &str = "success";

/// Result of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// JSON result, or raw bytes for `GetChainHistory`. Empty on error.
    pub value: Vec<u8>,
    /// Status string.
    pub log: String,
    /// Committed height the response was produced at.
    pub height: u64,
}

/// Result of one delivered transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResponse {
    pub code: u32,
    pub log: String,
}

impl TxResponse {
    pub fn is_ok(&self) -> bool {
        self.code == ResultCode::Ok.as_u32()
    }
}

pub struct StateApp<S: VersionedStore> {
    store: S,
    config: StateQueryConfig,
    codec: CanonicalCodec,
}

impl<S: VersionedStore> StateApp<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, StateQueryConfig::default())
    }

    pub fn with_config(store: S, config: StateQueryConfig) -> Self {
        let codec = CanonicalCodec::new(&config);
        Self {
            store,
            config,
            codec,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &StateQueryConfig {
        &self.config
    }

    /// Run a read operation. `height` pins request lookups; `None` or `0`
    /// reads the latest committed block.
    pub fn query(&self, operation: &str, params: &str, height: Option<u64>) -> QueryResponse {
        let view = CommittedView::latest(&self.store);
        let service = QueryService::new(&view, &self.codec, &self.config);
        let (value, log) = match handle_query(&service, operation, params, height) {
            Ok(routed) => (routed.value, routed.log),
            Err(RouterError::State(err)) if err.is_not_found() => {
                warn!(operation, error = %err, "query aborted on missing record");
                (b"{}".to_vec(), QueryStatus::NotFound.to_string())
            }
            Err(err) => {
                warn!(operation, error = %err, "query failed");
                (Vec::new(), err.to_string())
            }
        };
        QueryResponse {
            value,
            log,
            height: self.committed_height(),
        }
    }

    /// Apply a state-changing operation to the working view. Effects are
    /// pending until the next commit.
    pub fn deliver_tx(&self, operation: &str, params: &str, caller_node_id: &str) -> TxResponse {
        let view = WorkingView::new(&self.store);
        let service = MutationService::new(&view, &self.codec);
        match handle_tx(&service, operation, params, caller_node_id) {
            Ok(()) => TxResponse {
                code: ResultCode::Ok.as_u32(),
                log: TX_SUCCESS.to_string(),
            },
            Err(err) => {
                let code = match &err {
                    RouterError::MethodNotFound(_) => ResultCode::UnknownOperation,
                    RouterError::State(state) => ResultCode::from(state),
                };
                warn!(operation, caller_node_id, code = code.as_u32(), error = %err, "transaction rejected");
                TxResponse {
                    code: code.as_u32(),
                    log: err.to_string(),
                }
            }
        }
    }

    /// Finalize pending writes as a new block.
    pub fn commit(&self) -> Result<u64, StateError> {
        let height = self.store.commit()?;
        info!(height, "block committed");
        Ok(height)
    }

    /// Discard pending writes.
    pub fn rollback(&self) -> Result<(), StateError> {
        self.store.rollback()?;
        info!("pending writes discarded");
        Ok(())
    }

    fn committed_height(&self) -> u64 {
        match self.store.committed_height() {
            Ok(height) => height,
            Err(err) => {
                error!(error = %err, "failed to read committed height");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryVersionedStore;
    use crate::test_utils::{make_idp, register_node, LedgerFixture};

    fn app_with_idp() -> StateApp<InMemoryVersionedStore> {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| register_node(repo, "idp1", &make_idp("IdP 1", 3.0, 3.0)));
        StateApp::new(fixture.store)
    }

    #[test]
    fn test_query_reports_committed_height() {
        let app = app_with_idp();
        let response = app.query("GetNodePublicKey", r#"{"node_id":"idp1"}"#, None);
        assert_eq!(response.log, "success");
        assert_eq!(response.height, 1);
        let body: serde_json::Value = serde_json::from_slice(&response.value).unwrap();
        assert_eq!(body["public_key"], "IdP 1-public-key");
    }

    #[test]
    fn test_tx_invisible_until_commit() {
        let app = app_with_idp();
        let tx = app.deliver_tx("UpdateNode", r#"{"public_key":"rotated"}"#, "idp1");
        assert!(tx.is_ok());
        assert_eq!(tx.log, "success");

        let before = app.query("GetNodePublicKey", r#"{"node_id":"idp1"}"#, None);
        assert!(!String::from_utf8_lossy(&before.value).contains("rotated"));

        assert_eq!(app.commit().unwrap(), 2);
        let after = app.query("GetNodePublicKey", r#"{"node_id":"idp1"}"#, None);
        assert!(String::from_utf8_lossy(&after.value).contains("rotated"));
    }

    #[test]
    fn test_rollback_discards_pending() {
        let app = app_with_idp();
        app.deliver_tx("UpdateNode", r#"{"public_key":"rotated"}"#, "idp1");
        app.rollback().unwrap();
        app.commit().unwrap();
        let response = app.query("GetNodePublicKey", r#"{"node_id":"idp1"}"#, None);
        assert!(!String::from_utf8_lossy(&response.value).contains("rotated"));
    }

    #[test]
    fn test_tx_error_codes() {
        let app = app_with_idp();
        let missing = app.deliver_tx("UpdateNode", "{}", "ghost");
        assert_eq!(missing.code, ResultCode::NodeIdNotFound.as_u32());
        assert_eq!(missing.log, "Node ID not found");

        let unknown = app.deliver_tx("Transfer", "{}", "idp1");
        assert_eq!(unknown.code, ResultCode::UnknownOperation.as_u32());
        assert_eq!(unknown.log, "method not found");

        let malformed = app.deliver_tx("SetMqAddresses", "[", "idp1");
        assert_eq!(malformed.code, ResultCode::DecodeError.as_u32());

        let absent = app.deliver_tx("SetMqAddresses", r#"{"addresses":[]}"#, "ghost");
        assert_eq!(absent.code, ResultCode::DecodeError.as_u32());
    }

    #[test]
    fn test_unknown_query() {
        let app = app_with_idp();
        let response = app.query("DropTables", "{}", None);
        assert_eq!(response.log, "method not found");
        assert!(response.value.is_empty());
    }
}
