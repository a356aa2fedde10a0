//! # Identity-Federation State Query Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end scenarios through StateApp
//!     ├── discovery.rs  # IdP / AS discovery and node info
//!     ├── identity.rs   # Reference groups, accessors, requests
//!     └── transactions.rs # UpdateNode / SetMqAddresses and commit visibility
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p idf-tests
//! RUST_LOG=debug cargo test -p idf-tests integration::discovery
//! ```

pub mod integration;

use tracing_subscriber::EnvFilter;

/// Install a test subscriber honouring `RUST_LOG`. Safe to call from every
/// test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
