//! # Discovery Scenarios
//!
//! IdP and AS discovery, node info and directories as seen by a client.

#[cfg(test)]
mod tests {
    use super::super::support::{app, body};
    use idf_state_query::test_utils::{
        association, destination, make_as, make_idp, make_proxy, register_node,
        seed_reference_group, seed_service, LedgerFixture,
    };
    use serde_json::json;

    #[test]
    fn test_empty_ledger_idp_list() {
        let app = app(LedgerFixture::new());
        let response = app.query("GetNodeIDList", r#"{"role":"idp"}"#, None);
        assert_eq!(response.log, "not found");
        assert_eq!(body(&response), json!({ "node_id_list": [] }));
        assert_eq!(response.height, 0);
    }

    #[test]
    fn test_reference_group_mode_scenario() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            register_node(repo, "idp1", &make_idp("IdP 1", 3.0, 3.0))?;
            seed_reference_group(repo, "ref-1", vec![association("idp1", 2.3, vec![2, 3])])
        });
        let app = app(fixture);

        let found = app.query(
            "GetIdpNodes",
            r#"{"reference_group_code":"ref-1","min_ial":2.0,"mode_list":[2]}"#,
            None,
        );
        assert_eq!(found.log, "success");
        let nodes = body(&found)["node"].as_array().cloned().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["node_id"], "idp1");
        assert_eq!(nodes[0]["mode_list"], json!([2, 3]));
        assert_eq!(nodes[0]["ial"], 2.3);

        let none = app.query(
            "GetIdpNodes",
            r#"{"reference_group_code":"ref-1","min_ial":2.0,"mode_list":[2,4]}"#,
            None,
        );
        assert_eq!(none.log, "not found");
        assert_eq!(body(&none), json!({ "node": [] }));
    }

    #[test]
    fn test_idp_discovery_filters_and_shapes() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            register_node(repo, "proxy1", &make_proxy("Proxy 1"))?;
            let mut direct = make_idp("Direct", 3.0, 3.0);
            direct.supported_request_message_data_url_type_list = vec!["text/plain".into()];
            register_node(repo, "idp1", &direct)?;
            let mut fronted = make_idp("Fronted", 2.5, 2.2);
            fronted.supported_request_message_data_url_type_list =
                vec!["text/plain".into(), "application/pdf".into()];
            fronted.proxy_node_id = Some("proxy1".into());
            register_node(repo, "idp2", &fronted)?;
            register_node(repo, "idp3", &make_idp("Weak", 1.1, 1.0))
        });
        let app = app(fixture);

        let response = app.query("GetIdpNodes", r#"{"min_ial":2.3,"min_aal":2.0}"#, None);
        let nodes = body(&response)["node"].as_array().cloned().unwrap();
        let ids: Vec<_> = nodes.iter().map(|n| n["node_id"].clone()).collect();
        assert_eq!(ids, vec![json!("idp1"), json!("idp2")]);
        assert_eq!(nodes[0]["public_key"], "Direct-public-key");
        assert!(nodes[1].get("public_key").is_none());
        assert_eq!(nodes[1]["proxy"]["node_id"], "proxy1");
        assert_eq!(nodes[1]["proxy"]["public_key"], "Proxy 1-public-key");

        let pdf = app.query(
            "GetIdpNodesInfo",
            r#"{"supported_request_message_data_url_type_list":["text/plain","application/pdf"]}"#,
            None,
        );
        let nodes = body(&pdf)["node"].as_array().cloned().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["node_id"], "idp2");
    }

    #[test]
    fn test_as_discovery_skips_inactive_destination() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            register_node(repo, "as1", &make_as("AS 1"))?;
            register_node(repo, "as2", &make_as("AS 2"))?;
            seed_service(
                repo,
                "serviceX",
                vec![destination("as1", false), destination("as2", true)],
            )
        });
        let app = app(fixture);

        let response = app.query(
            "GetAsNodesByServiceId",
            r#"{"service_id":"serviceX"}"#,
            None,
        );
        assert_eq!(response.log, "success");
        let nodes = body(&response)["node"].as_array().cloned().unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0]["node_id"], "as2");
        assert_eq!(nodes[0]["min_ial"], 1.1);
        assert_eq!(nodes[0]["supported_namespace_list"], json!(["citizen_id"]));

        let unknown = app.query("GetAsNodesInfoByServiceId", r#"{"service_id":"nope"}"#, None);
        assert_eq!(unknown.log, "not found");
        assert_eq!(body(&unknown), json!({ "node": [] }));
    }

    #[test]
    fn test_node_info_of_proxied_node() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            register_node(repo, "proxy1", &make_proxy("Proxy 1"))?;
            let mut node = make_as("AS 1");
            node.proxy_node_id = Some("proxy1".into());
            register_node(repo, "as1", &node)
        });
        let app = app(fixture);

        let response = app.query("GetNodeInfo", r#"{"node_id":"as1"}"#, None);
        let info = body(&response);
        assert_eq!(info["role"], "AS");
        assert!(info.get("public_key").is_none());
        assert_eq!(info["proxy"]["public_key"], "Proxy 1-public-key");
        assert_eq!(info["proxy"]["mq"], json!([{ "ip": "10.0.0.1", "port": 7000 }]));

        let missing = app.query("GetNodeInfo", r#"{"node_id":"ghost"}"#, None);
        assert_eq!(missing.log, "not found");
        assert_eq!(body(&missing), json!({}));
    }
}
