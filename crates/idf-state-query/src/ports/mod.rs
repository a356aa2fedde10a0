//! # Ports Layer
//!
//! - `api.rs` - Driving port (read operations exposed to the transport)
//! - `database.rs` - Driven port (versioned ledger) and its typed views
//! - `codec.rs` - Driven port (canonical record encoding)

pub mod api;
pub mod codec;
pub mod database;

pub use api::*;
pub use codec::*;
pub use database::*;
