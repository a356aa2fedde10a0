//! # Transaction Scenarios
//!
//! Mutations are pending until commit; queries only see committed state.

#[cfg(test)]
mod tests {
    use super::super::support::{app, body};
    use idf_state_query::test_utils::{make_idp, register_node, LedgerFixture};
    use idf_state_query::ResultCode;
    use serde_json::json;

    fn app_with_idp() -> idf_state_query::StateApp<idf_state_query::InMemoryVersionedStore> {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| register_node(repo, "idp1", &make_idp("IdP 1", 3.0, 3.0)));
        app(fixture)
    }

    #[test]
    fn test_update_node_visible_after_commit() {
        let app = app_with_idp();
        let tx = app.deliver_tx(
            "UpdateNode",
            r#"{"public_key":"pk-2","supported_request_message_data_url_type_list":["text/plain"]}"#,
            "idp1",
        );
        assert_eq!(tx.code, ResultCode::Ok.as_u32());

        let pending = body(&app.query("GetNodePublicKey", r#"{"node_id":"idp1"}"#, None));
        assert_eq!(pending, json!({ "public_key": "IdP 1-public-key" }));

        app.commit().unwrap();
        let info = body(&app.query("GetNodeInfo", r#"{"node_id":"idp1"}"#, None));
        assert_eq!(info["public_key"], "pk-2");
        assert_eq!(info["master_public_key"], "IdP 1-master-public-key");
        assert_eq!(
            info["supported_request_message_data_url_type_list"],
            json!(["text/plain"])
        );
    }

    #[test]
    fn test_update_node_twice_is_idempotent() {
        let app = app_with_idp();
        let params = r#"{"master_public_key":"mpk-2"}"#;

        app.deliver_tx("UpdateNode", params, "idp1");
        app.commit().unwrap();
        let once = app.query("GetNodeInfo", r#"{"node_id":"idp1"}"#, None).value;

        app.deliver_tx("UpdateNode", params, "idp1");
        app.commit().unwrap();
        let twice = app.query("GetNodeInfo", r#"{"node_id":"idp1"}"#, None).value;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_mq_addresses_replaces_wholesale() {
        let app = app_with_idp();
        let tx = app.deliver_tx(
            "SetMqAddresses",
            r#"{"addresses":[{"ip":"192.168.3.99","port":8000},{"ip":"192.168.3.100","port":8001}]}"#,
            "idp1",
        );
        assert!(tx.is_ok());
        app.commit().unwrap();

        let response = app.query("GetMqAddresses", r#"{"node_id":"idp1"}"#, None);
        assert_eq!(response.log, "success");
        assert_eq!(
            body(&response),
            json!([
                { "ip": "192.168.3.99", "port": 8000 },
                { "ip": "192.168.3.100", "port": 8001 }
            ])
        );
    }

    #[test]
    fn test_mutation_failures_write_nothing() {
        let app = app_with_idp();

        let missing = app.deliver_tx("UpdateNode", r#"{"public_key":"x"}"#, "idp9");
        assert_eq!(missing.code, ResultCode::NodeIdNotFound.as_u32());
        let absent = app.deliver_tx("SetMqAddresses", r#"{"addresses":[]}"#, "idp9");
        assert_eq!(absent.code, ResultCode::DecodeError.as_u32());
        let unknown = app.deliver_tx("RegisterNode", "{}", "idp1");
        assert_eq!(unknown.code, ResultCode::UnknownOperation.as_u32());

        app.commit().unwrap();
        let response = app.query("GetNodeInfo", r#"{"node_id":"idp9"}"#, None);
        assert_eq!(response.log, "not found");
    }
}
