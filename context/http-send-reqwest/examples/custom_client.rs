use azurecdn_core::{Context, Result};
use azurecdn_http_send_reqwest::ReqwestHttpSend;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // The core defines no timeouts, configure them on the transport instead.
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("azurecdn-example/0.1")
        .build()
        .map_err(|e| azurecdn_core::Error::config_invalid("invalid client").with_source(e))?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Unsigned requests are rejected by the service, this only shows the transport.
    let req = http::Request::builder()
        .method("GET")
        .uri("https://restapi.cdn.azure.cn/subscriptions/example/endpoints?apiVersion=1.0")
        .body(Bytes::new())?;

    match ctx.http_send_as_string(req).await {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            println!("Response body: {}", resp.body());
        }
        Err(e) => {
            eprintln!("Request failed: {e}");
        }
    }

    Ok(())
}
