use azurecdn_core::{Error, Result, SigningRequest, Signer};
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::constants::*;
use crate::credential::Credential;
use crate::response::classify;

/// CdnRequest describes one management api call.
///
/// `path` is relative to the subscription scope, e.g. `/endpoints/ep1/purges`,
/// and may embed a query string. Pairs added by [`with_query`](CdnRequest::with_query)
/// are merged after the embedded ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdnRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl CdnRequest {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set a query pair, replacing the value of an existing key.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        merge_pair(&mut self.query, key.into(), value.into());
        self
    }

    /// Set the raw body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body to the json encoding of `body`.
    pub fn with_json(self, body: &impl Serialize) -> Result<Self> {
        let body = serde_json::to_vec(body)?;
        Ok(self.with_body(body))
    }
}

/// Last writer wins, new keys keep their insertion order.
fn merge_pair(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => pairs.push((key, value)),
    }
}

/// Client for the Azure China CDN management api.
///
/// A client only holds immutable configuration and a signer, cloning it is
/// cheap and clones can be used concurrently.
#[derive(Clone, Debug)]
pub struct Client {
    config: Config,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client that sends requests through `signer`'s context.
    pub fn with_signer(config: Config, signer: Signer<Credential>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, signer })
    }

    /// Create a client with static credentials and the default reqwest transport.
    #[cfg(feature = "default-context")]
    pub fn new(config: Config, key_id: &str, key_value: &str) -> Result<Self> {
        use crate::{RequestSigner, StaticCredentialProvider};
        use azurecdn_core::Context;
        use azurecdn_http_send_reqwest::ReqwestHttpSend;

        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        let signer = Signer::new(
            ctx,
            StaticCredentialProvider::new(key_id, key_value),
            RequestSigner::new(),
        );
        Self::with_signer(config, signer)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the absolute url for a subscription relative path.
    ///
    /// Query pairs embedded in `path` come first. Pairs in `query` are applied
    /// after them: an equal key gets its value replaced in place, other keys
    /// are appended. `apiVersion` is appended from config when still missing.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> Result<String> {
        let (path, embedded) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        if !path.starts_with('/') {
            return Err(Error::request_invalid(format!(
                "path must start with '/', got {path:?}"
            )));
        }

        let mut pairs = Vec::new();
        if let Some(raw) = embedded {
            let parsed = SigningRequest::query_parse(raw).ok_or_else(|| {
                Error::request_invalid(format!("query embedded in path is malformed: {raw:?}"))
            })?;
            for (k, v) in parsed {
                merge_pair(&mut pairs, k, v);
            }
        }
        for (k, v) in query {
            merge_pair(&mut pairs, k.clone(), v.clone());
        }
        if !pairs.iter().any(|(k, _)| k == API_VERSION) {
            pairs.push((API_VERSION.to_string(), self.config.api_version.clone()));
        }

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();

        Ok(format!(
            "https://{}/subscriptions/{}{}?{}",
            self.config.endpoint,
            utf8_percent_encode(&self.config.subscription_id, &PATH_SEGMENT_ENCODE_SET),
            path,
            query
        ))
    }

    /// Sign and send the request once, returning the raw response.
    ///
    /// Transport failures are returned as is, nothing is retried.
    pub async fn dispatch(&self, req: CdnRequest) -> Result<http::Response<Bytes>> {
        if ![Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(&req.method) {
            return Err(Error::request_invalid(format!(
                "method {} is not supported by the management api",
                req.method
            )));
        }

        let url = self.build_url(&req.path, &req.query)?;
        let mut builder = http::Request::builder().method(req.method).uri(url);
        if req.body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        let (mut parts, body) = builder.body(req.body.unwrap_or_default())?.into_parts();

        self.signer.sign(&mut parts).await?;
        debug!("dispatching request: {} {}", parts.method, parts.uri);

        let resp = self
            .signer
            .context()
            .http_send(http::Request::from_parts(parts, body))
            .await?;
        debug!(
            "got response: status {}, correlation id {:?}",
            resp.status(),
            correlation_id(&resp)
        );
        Ok(resp)
    }

    /// Dispatch the request and classify the response body into `T`.
    pub async fn send<T: DeserializeOwned>(&self, req: CdnRequest) -> Result<T> {
        let resp = self.dispatch(req).await?;
        classify(resp.body()).map_err(|err| match correlation_id(&resp) {
            Some(id) => err.with_correlation_id(id),
            None => err,
        })
    }
}

fn correlation_id(resp: &http::Response<Bytes>) -> Option<&str> {
    resp.headers()
        .get(X_CORRELATION_ID)
        .and_then(|v| v.to_str().ok())
}
