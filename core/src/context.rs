use crate::{Error, Result};
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the runtime capabilities used by the client.
///
/// ## Important
///
/// azurecdn-core provides NO default implementations. Users MUST configure the
/// HTTP sender they want to use. An unconfigured context uses a no-op sender
/// that returns errors when called.
///
/// ## Example
///
/// ```
/// use azurecdn_core::Context;
///
/// let ctx = Context::new();
/// // ctx.with_http_send(my_http_client);
/// ```
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("http", &self.http).finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with a no-op HTTP sender.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Send http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Send http request and return the response as string.
    pub async fn http_send_as_string(
        &self,
        req: http::Request<Bytes>,
    ) -> Result<http::Response<String>> {
        let (parts, body) = self.http.http_send(req).await?.into_parts();
        let body = String::from_utf8_lossy(&body).to_string();
        Ok(http::Response::from_parts(parts, body))
    }
}

/// HttpSend performs one network exchange.
///
/// Implementations must read the entire response body before returning and
/// must not retry. Failures of the exchange itself should be reported as
/// [`ErrorKind::Transport`](crate::ErrorKind::Transport).
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}
