//! Purge a list of urls and wait until the service reports a terminal status.
//!
//! ```shell
//! AZURECDN_SUBSCRIPTION_ID=.. AZURECDN_KEY_ID=.. AZURECDN_KEY_VALUE=.. \
//!   cargo run --example purge_and_wait -- <endpoint-id> <url>...
//! ```

use std::env;
use std::time::Duration;

use azurecdn::{Client, Config, Purge, TaskStatus};
use azurecdn_core::{Error, Result};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let var = |k: &str| env::var(k).map_err(|_| Error::config_invalid(format!("env {k} must set")));
    let client = Client::new(
        Config::new(var("AZURECDN_SUBSCRIPTION_ID")?),
        &var("AZURECDN_KEY_ID")?,
        &var("AZURECDN_KEY_VALUE")?,
    )?;

    let mut args = env::args().skip(1);
    let endpoint_id = args
        .next()
        .ok_or_else(|| Error::request_invalid("endpoint id is required"))?;
    let purge = Purge {
        files: args.collect(),
        ..Default::default()
    };

    let accepted = client.add_purge(&endpoint_id, &purge).await?;
    let Some(mut tracker) = accepted.tracker(&endpoint_id) else {
        match accepted.status() {
            TaskStatus::Succeeded => println!("purge finished"),
            status => println!("purge accepted without a task to track: {status}"),
        }
        return Ok(());
    };

    while !tracker.is_terminal() {
        tokio::time::sleep(Duration::from_secs(5)).await;
        let status = tracker.poll(&client).await?;
        println!("task {}: {status}", tracker.task_id());
    }

    if tracker.status() == TaskStatus::Failed {
        let op = client.get_operation(&endpoint_id, tracker.task_id()).await?;
        println!("purge failed: {:?}", op.message);
    }
    Ok(())
}
