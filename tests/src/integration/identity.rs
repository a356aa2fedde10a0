//! # Identity, Accessor and Request Scenarios

#[cfg(test)]
mod tests {
    use super::super::support::{app, body};
    use idf_state_query::test_utils::{
        association, make_idp, make_request, register_node, response, seed_group_with_accessor,
        seed_reference_group, seed_request, LedgerFixture,
    };
    use idf_state_query::{singleton, Namespace, NamespaceList, Validity};
    use serde_json::json;

    #[test]
    fn test_identity_existence_and_conflicting_selector() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            seed_reference_group(repo, "ref-1", vec![association("idp1", 2.3, vec![2, 3])])
        });
        let app = app(fixture);

        let by_identity = app.query(
            "CheckExistingIdentity",
            r#"{"identity_namespace":"citizen_id","identity_identifier_hash":"hash-ref-1"}"#,
            None,
        );
        assert_eq!(by_identity.log, "success");
        assert_eq!(body(&by_identity), json!({ "exist": true }));

        let both = app.query(
            "CheckExistingIdentity",
            r#"{"reference_group_code":"ref-1","identity_namespace":"citizen_id","identity_identifier_hash":"hash-ref-1"}"#,
            None,
        );
        assert_eq!(both.log, "Found reference group code and identity detail in parameter");
        assert_eq!(body(&both), json!({ "exist": false }));

        let code = app.query(
            "GetReferenceGroupCode",
            r#"{"identity_namespace":"citizen_id","identity_identifier_hash":"hash-ref-1"}"#,
            None,
        );
        assert_eq!(body(&code), json!({ "reference_group_code": "ref-1" }));
    }

    #[test]
    fn test_accessor_lookups() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            register_node(repo, "idp1", &make_idp("IdP 1", 3.0, 3.0))?;
            seed_group_with_accessor(repo, "ref-1", "idp1", "acc-1")
        });
        let app = app(fixture);

        let key = app.query("GetAccessorKey", r#"{"accessor_id":"acc-1"}"#, None);
        assert_eq!(
            body(&key),
            json!({ "accessor_public_key": "acc-1-public-key", "active": true })
        );
        let owner = app.query("GetAccessorOwner", r#"{"accessor_id":"acc-1"}"#, None);
        assert_eq!(body(&owner), json!({ "node_id": "idp1" }));
        let exists = app.query("CheckExistingAccessorID", r#"{"accessor_id":"acc-1"}"#, None);
        assert_eq!(body(&exists), json!({ "exist": true }));

        let unknown = app.query("GetAccessorKey", r#"{"accessor_id":"acc-2"}"#, None);
        assert_eq!(unknown.log, "not found");
        assert_eq!(body(&unknown), json!({}));
        let unknown_code = app.query(
            "GetReferenceGroupCodeByAccessorID",
            r#"{"accessor_id":"acc-2"}"#,
            None,
        );
        assert_eq!(unknown_code.log, "success");
        assert_eq!(body(&unknown_code), json!({ "reference_group_code": "" }));
    }

    #[test]
    fn test_request_detail_tri_state_validity() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            let mut request = make_request("req-1");
            request.response_list = vec![
                response("idp1", Validity::Unknown, Validity::Unknown),
                response("idp2", Validity::True, Validity::False),
            ];
            seed_request(repo, &request)
        });
        let app = app(fixture);

        let detail = body(&app.query("GetRequestDetail", r#"{"request_id":"req-1"}"#, None));
        assert_eq!(detail["requester_node_id"], "rp1");
        assert_eq!(detail["creation_chain_id"], "test-chain");
        let responses = detail["response_list"].as_array().cloned().unwrap();
        assert_eq!(responses[0]["valid_ial"], json!(null));
        assert_eq!(responses[1]["valid_ial"], json!(true));
        assert_eq!(responses[1]["valid_signature"], json!(false));

        let summary = body(&app.query("GetRequest", r#"{"request_id":"req-1"}"#, None));
        assert_eq!(
            summary,
            json!({
                "closed": false,
                "timed_out": false,
                "request_message_hash": "req-1-message-hash",
                "mode": 2
            })
        );
    }

    #[test]
    fn test_request_history_by_height() {
        let fixture = LedgerFixture::new();
        let opened = fixture.write(|repo| seed_request(repo, &make_request("req-1")));
        fixture.write(|repo| {
            let mut request = make_request("req-1");
            request.closed = true;
            seed_request(repo, &request)
        });
        let app = app(fixture);

        let then = app.query("GetRequest", r#"{"request_id":"req-1"}"#, Some(opened));
        assert_eq!(body(&then)["closed"], false);
        let now = app.query("GetRequest", r#"{"request_id":"req-1"}"#, Some(0));
        assert_eq!(body(&now)["closed"], true);
        assert_eq!(now.height, 2);
    }

    #[test]
    fn test_namespace_sentinel_and_policy_defaults() {
        let fixture = LedgerFixture::new();
        fixture.write(|repo| {
            repo.put_record(
                singleton::ALL_NAMESPACE,
                &NamespaceList {
                    namespaces: vec![Namespace {
                        namespace: "citizen_id".into(),
                        description: "Citizen ID".into(),
                        active: true,
                        allowed_identifier_count_in_reference_group: -1,
                    }],
                },
            )
        });
        let app = app(fixture);

        let namespaces = body(&app.query("GetNamespaceList", "{}", None));
        assert_eq!(namespaces[0]["allowed_identifier_count_in_reference_group"], 0);

        let modes = body(&app.query("GetAllowedModeList", r#"{"purpose":"AddAccessor"}"#, None));
        assert_eq!(modes, json!({ "allowed_mode_list": [2, 3] }));

        let min_ial = body(&app.query("GetAllowedMinIalForRegisterIdentityAtFirstIdp", "{}", None));
        assert_eq!(min_ial, json!({ "min_ial": 0.0 }));

        let init = body(&app.query("IsInitEnded", "{}", None));
        assert_eq!(init, json!({ "init_ended": false }));
    }

    #[test]
    fn test_malformed_params_surface_parser_message() {
        let app = app(LedgerFixture::new());
        let response = app.query("GetAccessorKey", r#"{"accessor_id":}"#, None);
        assert!(response.value.is_empty());
        assert!(response.log.contains("expected value"));
    }
}
