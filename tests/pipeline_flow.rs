//! 两节点流水线集成测试
//!
//! 认证节点 → 记录节点的令牌传递：令牌只通过条目负载上的
//! `tenantAccessToken` 字段流动，第二个节点的请求必须携带它。

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use larkflow::flow::{Item, Pipeline};
use larkflow::lark::{BitableLocator, LarkClient, LarkCredentials};
use larkflow::nodes::{AuthenticationNode, BitableNode, BitableParams, Operation};

#[tokio::test]
async fn test_token_flows_from_auth_node_to_bitable_node() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v3/tenant_access_token/internal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "ok",
            "tenant_access_token": "t-pipeline",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let data = json!({ "items": [], "has_more": false });
    Mock::given(method("GET"))
        .and(path("/bitable/v1/apps/bascn1/tables/tbl9/records"))
        .and(query_param("page_size", "100"))
        .and(header("Authorization", "Bearer t-pipeline"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "msg": "success",
            "data": data,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = LarkCredentials {
        app_id: "cli_a".to_string(),
        app_secret: "secret_b".to_string(),
    };
    let client = || LarkClient::new(credentials.clone()).with_base_url(server.uri());

    let pipeline = Pipeline::new()
        .add_node(Box::new(AuthenticationNode::from_client(client())))
        .add_node(Box::new(BitableNode::new(
            client(),
            BitableLocator {
                app_token: "bascn1".to_string(),
                table_id: "tbl9".to_string(),
            },
            BitableParams::for_operation(Operation::GetRecordList),
        )));

    let output = pipeline.run(vec![Item::empty()]).await.unwrap();

    assert_eq!(output.len(), 1);
    assert_eq!(output[0].json, data);
}

#[tokio::test]
async fn test_auth_failure_aborts_before_bitable_node() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v3/tenant_access_token/internal"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 99991668,
            "msg": "invalid app secret",
        })))
        .mount(&server)
        .await;

    let credentials = LarkCredentials {
        app_id: "cli_a".to_string(),
        app_secret: "wrong".to_string(),
    };
    let client = || LarkClient::new(credentials.clone()).with_base_url(server.uri());

    let pipeline = Pipeline::new()
        .add_node(Box::new(AuthenticationNode::from_client(client())))
        .add_node(Box::new(BitableNode::new(
            client(),
            BitableLocator {
                app_token: "bascn1".to_string(),
                table_id: "tbl9".to_string(),
            },
            BitableParams::for_operation(Operation::GetRecordList),
        )));

    let err = pipeline.run(vec![Item::empty()]).await.unwrap_err();

    assert!(err.to_string().contains("invalid app secret"));
    // 记录接口一次都没被访问
    let requests = server.received_requests().await.unwrap();
    assert!(requests
        .iter()
        .all(|r| r.url.path().starts_with("/auth/")));
}
