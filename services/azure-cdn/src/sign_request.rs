//! Azure China CDN management api request signer.

use async_trait::async_trait;
use azurecdn_core::hash::upper_hex_hmac_sha256;
use azurecdn_core::time::{format_request_date, now, parse_request_date, DateTime};
use azurecdn_core::{Context, Error, Result, SignRequest, SigningRequest};
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;
use log::debug;

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner implements the `AzureCDN` shared key authorization.
///
/// The request date is captured once and written both into the
/// `x-azurecdn-request-date` header and into the string to sign.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::credential_invalid("credential is required"));
        };

        let request_date = format_request_date(self.time.unwrap_or_else(now));
        let mut ctx = SigningRequest::build(req)?;

        let string_to_sign = string_to_sign(&ctx, &request_date);
        let signature = upper_hex_hmac_sha256(cred.key_value.as_bytes(), string_to_sign.as_bytes());

        ctx.headers
            .insert(X_AZURECDN_REQUEST_DATE, request_date.parse()?);
        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue =
                format!("{AUTHORIZATION_SCHEME} {}:{signature}", cred.key_id).parse()?;
            value.set_sensitive(true);
            value
        });

        ctx.apply(req)
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// Path + "\r\n" +
/// CanonicalizedQuery + "\r\n" +
/// RequestDate + "\r\n" +
/// VERB
/// ```
///
/// CanonicalizedQuery is the first value of every query key sorted by key,
/// rendered as `key:value` and joined by `", "`.
fn string_to_sign(ctx: &SigningRequest, request_date: &str) -> String {
    let s = canonical_string(
        &ctx.path_percent_decoded(),
        ctx.query.as_deref(),
        request_date,
        ctx.method.as_str(),
    );

    debug!("string to sign: {:?}", &s);
    s
}

/// Build the canonical string for given request fields.
///
/// `path` must already be percent decoded. `query` is the raw query string
/// without the leading `?`; a query that can't be parsed is canonicalized
/// as empty.
pub fn canonical_string(path: &str, query: Option<&str>, request_date: &str, method: &str) -> String {
    let query = query
        .map(|q| SigningRequest::query_to_string(SigningRequest::query_first_values(q), ":", ", "))
        .unwrap_or_default();

    format!("{path}\r\n{query}\r\n{request_date}\r\n{method}")
}

/// Compute the upper-case hex digest for given request fields.
pub fn sign(path: &str, query: Option<&str>, request_date: &str, method: &str, key_value: &str) -> String {
    let content = canonical_string(path, query, request_date, method);
    upper_hex_hmac_sha256(key_value.as_bytes(), content.as_bytes())
}

/// Recompute the signature of a signed request and compare it with the
/// transmitted `Authorization` header.
///
/// This is the same check the service performs: the request date is read
/// back from the `x-azurecdn-request-date` header.
pub fn verify(parts: &Parts, cred: &Credential) -> Result<bool> {
    let request_date = parts
        .headers
        .get(X_AZURECDN_REQUEST_DATE)
        .ok_or_else(|| Error::request_invalid("request date header is missing"))?
        .to_str()?;
    parse_request_date(request_date)?;

    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::request_invalid("authorization header is missing"))?
        .to_str()?;

    let path = percent_encoding::percent_decode_str(parts.uri.path()).decode_utf8_lossy();
    let digest = sign(
        &path,
        parts.uri.query(),
        request_date,
        parts.method.as_str(),
        &cred.key_value,
    );

    Ok(authorization == format!("{AUTHORIZATION_SCHEME} {}:{digest}", cred.key_id))
}
