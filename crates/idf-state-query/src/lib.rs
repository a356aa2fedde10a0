//! # idf-state-query
//!
//! Deterministic state-query and directory-resolution engine of an
//! identity-federation ledger.
//!
//! ## Role in System
//!
//! - **Query path**: answers discovery and lookup operations (IdPs, AS
//!   nodes, accessors, requests, services, policy) from committed state
//! - **Transaction path**: applies node detail and address updates to
//!   pending state, visible to queries after commit
//!
//! ## Flow
//!
//! ```text
//! transport ──→ StateApp ──→ query_router ──┬──→ QueryService ──→ CommittedView ─┐
//!                                           └──→ MutationService ──→ WorkingView ─┤
//!                                                                                 ↓
//!                                                                     VersionedStore
//! ```
//!
//! ## Determinism
//!
//! - Records are encoded with a canonical bincode configuration
//! - Result lists preserve stored order; no hash maps are iterated
//! - Queries never observe uncommitted writes

pub mod adapters;
pub mod domain;
pub mod ipc;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::*;
pub use domain::*;
pub use ipc::*;
pub use ports::*;
pub use service::*;
