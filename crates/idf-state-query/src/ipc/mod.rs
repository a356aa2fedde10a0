//! # Transport Boundary
//!
//! - `payloads`: JSON parameters of each operation
//! - `handler`: the [`StateApp`] facade driven by the external transport

pub mod handler;
pub mod payloads;

pub use handler::{QueryResponse, StateApp, TxResponse};
