//! Azure China CDN management api client.
//!
//! Every request is signed with the `AzureCDN` shared key scheme: an
//! HMAC-SHA256 over the request path, sorted query, request date and method.
//! Responses are classified through their common envelope and calls that the
//! service completes out of band can be followed with a [`TaskTracker`].
//!
//! # Example
//!
//! ```rust,no_run
//! use azurecdn::{Client, Config, Purge};
//! use azurecdn_core::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(Config::new("my-subscription"), "key-id", "key-value")?;
//!
//!     let accepted = client
//!         .add_purge(
//!             "endpoint-id",
//!             &Purge {
//!                 files: vec!["http://example.com/index.html".to_string()],
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!
//!     if let Some(mut tracker) = accepted.tracker("endpoint-id") {
//!         while !tracker.is_terminal() {
//!             tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!             tracker.poll(&client).await?;
//!         }
//!         println!("purge finished: {}", tracker.status());
//!     }
//!     Ok(())
//! }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{canonical_string, sign, verify, RequestSigner};

mod response;
pub use response::{classify, Classified, ErrorInfo};

mod task;
pub use task::{AsyncInfo, Operation, PollOperation, TaskResponse, TaskStatus, TaskTracker};

mod client;
pub use client::{CdnRequest, Client};

mod api;
pub use api::*;
