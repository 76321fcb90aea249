use std::borrow::Cow;
use std::collections::BTreeMap;
use std::mem;
use std::str::FromStr;

use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::{Error, Result};

/// Signing context for request.
///
/// The raw query is kept untouched so that applying the context back never
/// re-encodes the url that the caller built.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// Raw HTTP query without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = match self.query {
                    Some(q) if !q.is_empty() => format!("{}?{}", self.path, q),
                    _ => self.path,
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Cow<str> {
        percent_encoding::percent_decode_str(&self.path).decode_utf8_lossy()
    }

    /// Get the first value of every key in a raw query, sorted by key.
    ///
    /// A query that can't be parsed is treated as empty.
    pub fn query_first_values(raw: &str) -> Vec<(String, String)> {
        let Some(pairs) = Self::query_parse(raw) else {
            log::debug!("query {raw:?} is malformed, treat it as empty");
            return Vec::new();
        };

        let mut first = BTreeMap::new();
        for (k, v) in pairs {
            first.entry(k).or_insert(v);
        }
        first.into_iter().collect()
    }

    /// Parse a raw `application/x-www-form-urlencoded` query.
    ///
    /// Returns `None` if the query contains a `;` separator or an invalid
    /// percent escape.
    pub fn query_parse(raw: &str) -> Option<Vec<(String, String)>> {
        if raw.contains(';') || !has_valid_escapes(raw) {
            return None;
        }

        Some(
            form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// Convert sorted query to string.
    ///
    /// ```shell
    /// [(a, b), (c, d)] => "a:b, c:d"
    /// ```
    pub fn query_to_string(mut query: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via query key.
        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

fn has_valid_escapes(s: &str) -> bool {
    let bs = s.as_bytes();
    let mut i = 0;
    while i < bs.len() {
        if bs[i] == b'%' {
            if i + 2 >= bs.len()
                || !bs[i + 1].is_ascii_hexdigit()
                || !bs[i + 2].is_ascii_hexdigit()
            {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
