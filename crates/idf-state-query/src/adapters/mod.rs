//! # Adapters Module
//!
//! ## Modules
//!
//! - `codec`: canonical bincode record codec
//! - `memory_db`: in-memory versioned store
//! - `query_router`: operation-name dispatch for the query and transaction paths

pub mod codec;
pub mod memory_db;
pub mod query_router;

pub use codec::CanonicalCodec;
pub use memory_db::InMemoryVersionedStore;
pub use query_router::{handle_query, handle_tx, RouterError};
