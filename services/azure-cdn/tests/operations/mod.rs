use azurecdn::{
    AccessControl, CachePolicy, CacheRule, CacheRuleType, Granularity, HttpsBinding,
    OriginProtocol, Preload, PurgeStatus, RefererControl, RefererControlType, TaskStatus,
    TaskTracker, UpdateEndpoint, UploadCertificate,
};
use azurecdn_core::{ErrorKind, Result};
use chrono::{TimeZone, Utc};
use http::Method;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::support::{client, MockHttpSend};

fn accepted(task_id: &str) -> serde_json::Value {
    json!({
        "Succeeded": true,
        "IsAsync": true,
        "AsyncInfo": {"TaskTrackId": task_id, "TaskStatus": "NotSet"}
    })
}

fn path_and_query(mock: &MockHttpSend) -> (Method, String) {
    let req = mock.last_request();
    (req.method, req.uri.path_and_query().unwrap().to_string())
}

#[tokio::test]
async fn test_endpoint_reads() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(json!([{"EndpointID": "ep1"}, {"EndpointID": "ep2"}]))
        .respond_json(json!({"EndpointID": "ep1", "Settings": {"CustomDomain": "cdn.example.com"}}))
        .respond_json(json!({"Rules": [{"Type": "Dir", "Items": ["/img/"], "TTL": 3600}], "IgnoreCookie": true}));
    let client = client(&mock);

    let eps = client.list_endpoints().await?;
    assert_eq!(eps.len(), 2);
    assert_eq!(
        path_and_query(&mock),
        (Method::GET, "/subscriptions/SUB1/endpoints?apiVersion=1.0".to_string())
    );

    let ep = client.get_endpoint("ep1").await?;
    assert_eq!(ep.settings.custom_domain, "cdn.example.com");

    let policy = client.get_cache_policy("ep1").await?;
    assert_eq!(policy.rules[0].rule_type, CacheRuleType::Dir);
    assert_eq!(policy.rules[0].ttl, 3600);
    assert!(policy.ignore_cookie);
    assert_eq!(
        path_and_query(&mock),
        (
            Method::GET,
            "/subscriptions/SUB1/endpoints/ep1/cacherules?apiVersion=1.0".to_string()
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_endpoint_writes() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(accepted("t1"))
        .respond_json(accepted("t2"))
        .respond_json(accepted("t3"))
        .respond_json(accepted("t4"))
        .respond_json(accepted("t5"));
    let client = client(&mock);

    client
        .update_endpoint("ep1", &UpdateEndpoint::host_header("origin.example.com"))
        .await?;
    assert_eq!(
        path_and_query(&mock),
        (Method::PUT, "/subscriptions/SUB1/endpoints/ep1?apiVersion=1.0".to_string())
    );
    assert_eq!(mock.last_request().json()["UpdateFlag"], "HostHeader");

    let resp = client.delete_endpoint("ep1").await?;
    assert_eq!(resp.task_track_id(), Some("t2"));
    assert_eq!(
        path_and_query(&mock),
        (Method::DELETE, "/subscriptions/SUB1/endpoints/ep1?apiVersion=1.0".to_string())
    );

    client
        .update_cache_policy(
            "ep1",
            &CachePolicy {
                rules: vec![CacheRule {
                    rule_type: CacheRuleType::Suffix,
                    items: vec![".jpg".to_string()],
                    ttl: 60,
                }],
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(mock.last_request().json()["Rules"][0]["Items"], json!([".jpg"]));

    client
        .update_access_control(
            "ep1",
            &AccessControl {
                forbidden_ips: vec![],
                referer_control: RefererControl {
                    enabled: true,
                    path_patterns: vec!["/*".to_string()],
                    referers: vec!["example.com".to_string()],
                    referer_control_type: RefererControlType::AllowList,
                },
            },
        )
        .await?;
    assert_eq!(
        path_and_query(&mock),
        (
            Method::PUT,
            "/subscriptions/SUB1/endpoints/ep1/accesscontrol?apiVersion=1.0".to_string()
        )
    );

    client
        .create_https_binding(&HttpsBinding {
            certificate_id: "cert1".to_string(),
            endpoint_id: "ep1".to_string(),
            origin_protocol: OriginProtocol::Https,
            auto_https_redirect: false,
        })
        .await?;
    assert_eq!(
        path_and_query(&mock),
        (Method::POST, "/subscriptions/SUB1/https/bindings?apiVersion=1.0".to_string())
    );
    Ok(())
}

#[tokio::test]
async fn test_endpoint_id_is_encoded() -> Result<()> {
    let mock = MockHttpSend::new().respond_json(json!({}));
    client(&mock).get_endpoint("ep 1/../x").await?;

    assert_eq!(
        mock.last_request().uri.path(),
        "/subscriptions/SUB1/endpoints/ep%201%2F..%2Fx"
    );
    Ok(())
}

#[tokio::test]
async fn test_content() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(accepted("p1"))
        .respond_json(json!({"Files": [{"Url": "http://example.com/a.png", "Status": "Failed"}]}));
    let client = client(&mock);

    client
        .add_preload(
            "ep1",
            &Preload {
                files: vec!["http://example.com/a.png".to_string()],
            },
        )
        .await?;
    assert_eq!(
        path_and_query(&mock),
        (
            Method::POST,
            "/subscriptions/SUB1/endpoints/ep1/preloads?apiVersion=1.0".to_string()
        )
    );

    let progress = client.query_purge("ep1", "p1").await?;
    assert_eq!(progress.files[0].status, PurgeStatus::Failed);
    assert!(progress.directories.is_empty());
    assert_eq!(
        path_and_query(&mock),
        (
            Method::GET,
            "/subscriptions/SUB1/endpoints/ep1/purges/p1?apiVersion=1.0".to_string()
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_upload_certificate() -> Result<()> {
    let mock = MockHttpSend::new().respond_json(json!({"CertificateID": "cert1", "State": "Valid"}));
    let cert = client(&mock)
        .upload_https_certificate(&UploadCertificate::pem("site", "PUBLIC", "PRIVATE"))
        .await?;

    assert_eq!(cert.certificate_id, "cert1");
    let req = mock.last_request();
    assert_eq!(req.uri.path(), "/subscriptions/SUB1/https/certificates");
    assert_eq!(
        req.json(),
        json!({
            "CertificateName": "site",
            "PublicCertificate": "PUBLIC",
            "PrivateKey": "PRIVATE",
            "Format": "Pem"
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_traffic() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(json!({"DomainName": "cdn.example.com", "PeakBandwidthInMbps": 10}))
        .respond_json(json!({"DomainName": "cdn.example.com", "TotalCDNVolumeInMB": 20}));
    let client = client(&mock);
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).unwrap();

    let bw = client.get_endpoint_bandwidth("ep1", start, end).await?;
    assert_eq!(bw.peak_bandwidth_in_mbps, 10);
    assert_eq!(
        path_and_query(&mock).1,
        "/subscriptions/SUB1/endpoints/ep1/bandwidth?startTime=2023-01-01T00%3A00%3A00Z&endTime=2023-01-02T00%3A00%3A00Z&apiVersion=1.0"
    );

    let volume = client
        .get_endpoint_volume("ep1", Granularity::PerHour, start, end)
        .await?;
    assert_eq!(volume.total_cdn_volume_in_mb, 20);
    assert_eq!(
        path_and_query(&mock).1,
        "/subscriptions/SUB1/endpoints/ep1/volume?granularity=PerHour&startTime=2023-01-01T00%3A00%3A00Z&endTime=2023-01-02T00%3A00%3A00Z&apiVersion=1.0"
    );

    let err = client
        .get_endpoint_volume("ep1", Granularity::PerDay, end, start)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert_eq!(mock.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_track_purge_to_completion() -> Result<()> {
    let mock = MockHttpSend::new()
        .respond_json(accepted("task-1"))
        .respond_json(json!({"ID": "task-1", "Status": "Processing"}))
        .respond_json(json!({"ID": "task-1", "Status": "Succeeded", "End": "2023-01-01T00:01:00Z"}));
    let client = client(&mock);

    let resp = client.add_purge("ep1", &Default::default()).await?;
    let mut tracker = resp.tracker("ep1").expect("purge must be async");
    assert_eq!(tracker.status(), TaskStatus::NotSet);

    assert_eq!(tracker.poll(&client).await?, TaskStatus::Processing);
    assert_eq!(tracker.poll(&client).await?, TaskStatus::Succeeded);
    assert_eq!(
        path_and_query(&mock).1,
        "/subscriptions/SUB1/endpoints/ep1/operations/task-1?apiVersion=1.0"
    );

    // No further query once terminal.
    assert_eq!(tracker.poll(&client).await?, TaskStatus::Succeeded);
    assert_eq!(mock.requests().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_poll_failure_surfaces_api_error() {
    let mock = MockHttpSend::new().respond(
        404,
        r#"{"Succeeded": false, "ErrorInfo": {"Type": "OperationNotFound", "Message": "no such operation"}}"#,
    );
    let client = client(&mock);

    let mut tracker = TaskTracker::new("ep1", "missing");
    let err = tracker.poll(&client).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.service_error().unwrap().error_type, "OperationNotFound");
    assert_eq!(tracker.status(), TaskStatus::NotSet);
}
