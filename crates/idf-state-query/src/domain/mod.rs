//! # Domain Layer
//!
//! Ledger records, key layout, configuration, filter rules and response
//! shapes. Nothing here touches storage.

pub mod config;
pub mod entities;
pub mod errors;
pub mod filters;
pub mod keys;
pub mod responses;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use filters::*;
pub use keys::*;
pub use responses::*;
