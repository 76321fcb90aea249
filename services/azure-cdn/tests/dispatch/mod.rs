use azurecdn::{verify, CdnRequest, Credential, Purge};
use azurecdn_core::time::parse_request_date;
use azurecdn_core::{ErrorKind, Result};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::support::{client, MockHttpSend, KEY_ID, KEY_VALUE};

#[tokio::test]
async fn test_signed_request_verifies() -> Result<()> {
    let mock = MockHttpSend::new().respond_json(json!({"Succeeded": true}));
    client(&mock).enable_endpoint("ep1").await?;

    let req = mock.last_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(
        req.uri.to_string(),
        "https://restapi.cdn.azure.cn/subscriptions/SUB1/endpoints/ep1/enable?apiVersion=1.0"
    );

    let date = req.headers["x-azurecdn-request-date"].to_str().unwrap();
    parse_request_date(date)?;
    let authorization = req.headers[AUTHORIZATION].to_str().unwrap();
    assert!(authorization.starts_with(&format!("AzureCDN {KEY_ID}:")));
    assert_eq!(authorization.len(), "AzureCDN KEYID:".len() + 64);

    assert!(verify(&req.parts(), &Credential::new(KEY_ID, KEY_VALUE))?);
    assert!(!verify(&req.parts(), &Credential::new(KEY_ID, "other"))?);
    Ok(())
}

#[tokio::test]
async fn test_content_type_only_with_body() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(json!({"Succeeded": true}))
        .respond_json(json!({"Succeeded": true}));
    let client = client(&mock);

    client.disable_endpoint("ep1").await?;
    client
        .add_purge(
            "ep1",
            &Purge {
                files: vec!["http://example.com/a.png".to_string()],
                ..Default::default()
            },
        )
        .await?;

    let reqs = mock.requests();
    assert!(reqs[0].headers.get(CONTENT_TYPE).is_none());
    assert!(reqs[0].body.is_empty());

    assert_eq!(reqs[1].headers[CONTENT_TYPE], "application/json");
    assert_eq!(
        reqs[1].json(),
        json!({"Files": ["http://example.com/a.png"], "Directories": []})
    );
    assert!(verify(&reqs[1].parts(), &Credential::new(KEY_ID, KEY_VALUE))?);
    Ok(())
}

#[tokio::test]
async fn test_query_merge_precedence() -> Result<()> {
    let mock = MockHttpSend::new().respond_json(json!({}));
    let req = CdnRequest::get("/endpoints?b=2&a=1")
        .with_query("a", "9")
        .with_query("c", "3");
    client(&mock).send::<Value>(req).await?;

    assert_eq!(
        mock.last_request().uri.query(),
        Some("b=2&a=9&c=3&apiVersion=1.0")
    );
    Ok(())
}

#[tokio::test]
async fn test_transport_error_is_not_retried() {
    let mock = MockHttpSend::new().fail("connection reset");
    let err = client(&mock).list_endpoints().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_api_error_carries_correlation_id() {
    let mock = MockHttpSend::new().respond_with_correlation_id(
        400,
        r#"{"Succeeded": false, "ErrorInfo": {"Type": "InvalidParameter", "Message": "bad endpoint"}}"#,
        "corr-1",
    );
    let err = client(&mock).get_endpoint("ep1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    let service = err.service_error().unwrap();
    assert_eq!(service.error_type, "InvalidParameter");
    assert_eq!(service.message, "bad endpoint");
    assert_eq!(service.correlation_id.as_deref(), Some("corr-1"));
}

#[tokio::test]
async fn test_truncated_body_is_decode_error() {
    let mock = MockHttpSend::new().respond_with_correlation_id(200, r#"{"EndpointID": "ep"#, "corr-2");
    let err = client(&mock).get_endpoint("ep1").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(err.service_error().is_none());
}

#[tokio::test]
async fn test_concurrent_calls_share_client() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(json!([]))
        .respond_json(json!([]))
        .respond_json(json!([]));
    let client = client(&mock);
    let cloned = client.clone();

    let (a, b, c) = tokio::join!(
        client.list_endpoints(),
        cloned.list_endpoints(),
        client.list_endpoints()
    );
    assert!(a?.is_empty() && b?.is_empty() && c?.is_empty());
    assert_eq!(mock.requests().len(), 3);
    Ok(())
}
