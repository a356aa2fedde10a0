//! End-to-end scenarios. Each test seeds a ledger, wraps it in a
//! `StateApp` and talks to it only through operation names and JSON.

pub mod discovery;
pub mod identity;
pub mod transactions;

#[cfg(test)]
mod support {
    use idf_state_query::test_utils::LedgerFixture;
    use idf_state_query::{InMemoryVersionedStore, QueryResponse, StateApp};
    use serde_json::Value;

    /// Facade over an already-seeded fixture.
    pub fn app(fixture: LedgerFixture) -> StateApp<InMemoryVersionedStore> {
        crate::init_test_tracing();
        StateApp::new(fixture.store)
    }

    pub fn body(response: &QueryResponse) -> Value {
        serde_json::from_slice(&response.value).expect("query result is JSON")
    }
}
