use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azurecdn::{Client, Config, RequestSigner, StaticCredentialProvider};
use azurecdn_core::{Context, Error, HttpSend, Result, Signer};
use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Uri};
use serde_json::Value;

pub const KEY_ID: &str = "KEYID";
pub const KEY_VALUE: &str = "secret";
pub const SUBSCRIPTION_ID: &str = "SUB1";

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    pub fn parts(&self) -> Parts {
        let mut parts = http::Request::builder()
            .method(self.method.clone())
            .uri(self.uri.clone())
            .body(())
            .unwrap()
            .into_parts()
            .0;
        parts.headers = self.headers.clone();
        parts
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug)]
enum Canned {
    Response {
        status: u16,
        correlation_id: Option<String>,
        body: Bytes,
    },
    TransportError(String),
}

#[derive(Debug, Default)]
struct State {
    requests: Vec<Captured>,
    responses: VecDeque<Canned>,
}

/// MockHttpSend records every request and replays canned responses in order.
#[derive(Debug, Clone, Default)]
pub struct MockHttpSend {
    state: Arc<Mutex<State>>,
}

impl MockHttpSend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Canned::Response {
            status,
            correlation_id: None,
            body: Bytes::copy_from_slice(body.as_bytes()),
        })
    }

    pub fn respond_json(self, body: Value) -> Self {
        self.respond(200, &body.to_string())
    }

    pub fn respond_with_correlation_id(self, status: u16, body: &str, id: &str) -> Self {
        self.push(Canned::Response {
            status,
            correlation_id: Some(id.to_string()),
            body: Bytes::copy_from_slice(body.as_bytes()),
        })
    }

    pub fn fail(self, message: &str) -> Self {
        self.push(Canned::TransportError(message.to_string()))
    }

    fn push(self, canned: Canned) -> Self {
        self.state.lock().unwrap().responses.push_back(canned);
        self
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn last_request(&self) -> Captured {
        self.requests().pop().expect("no request has been sent")
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let mut state = self.state.lock().unwrap();
        state.requests.push(Captured {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        match state.responses.pop_front() {
            Some(Canned::Response {
                status,
                correlation_id,
                body,
            }) => {
                let mut builder = http::Response::builder().status(status);
                if let Some(id) = correlation_id {
                    builder = builder.header("x-correlation-id", id);
                }
                Ok(builder.body(body)?)
            }
            Some(Canned::TransportError(msg)) => Err(Error::transport(msg)),
            None => Err(Error::unexpected("no canned response left")),
        }
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a client that talks to `mock`.
pub fn client(mock: &MockHttpSend) -> Client {
    init_logger();

    let ctx = Context::new().with_http_send(mock.clone());
    let signer = Signer::new(
        ctx,
        StaticCredentialProvider::new(KEY_ID, KEY_VALUE),
        RequestSigner::new(),
    );
    Client::with_signer(Config::new(SUBSCRIPTION_ID), signer).unwrap()
}
