//! Classification of management api responses.
//!
//! Every response body shares one loose envelope: a failure carries
//! `{"Succeeded": false, "ErrorInfo": {...}}`, a success carries the
//! resource fields directly and may or may not carry `"Succeeded": true`.

use std::any::type_name;

use azurecdn_core::{Error, Result, ServiceError};
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure details carried by a failed response envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ErrorInfo {
    /// Error type, e.g. `InvalidParameter`.
    #[serde(rename = "Type")]
    pub error_type: String,
    /// Human readable message.
    pub message: String,
}

impl ErrorInfo {
    fn unknown(message: impl Into<String>) -> Self {
        Self {
            error_type: "Unknown".to_string(),
            message: message.into(),
        }
    }
}

impl From<ErrorInfo> for ServiceError {
    fn from(info: ErrorInfo) -> Self {
        ServiceError {
            error_type: info.error_type,
            message: info.message,
            correlation_id: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Envelope {
    #[serde(alias = "succeeded")]
    succeeded: Option<bool>,
    #[serde(alias = "errorInfo")]
    error_info: Option<Value>,
}

impl Envelope {
    /// Extract the envelope from a json value.
    ///
    /// Only objects are envelopes. A `Succeeded` field that is not a bool
    /// means the body is not an envelope at all.
    fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Envelope::deserialize(value).ok()
    }

    fn failure(self) -> Option<ErrorInfo> {
        if self.succeeded != Some(false) {
            return None;
        }

        Some(match self.error_info {
            None | Some(Value::Null) => ErrorInfo::unknown(""),
            Some(raw) => {
                ErrorInfo::deserialize(&raw).unwrap_or_else(|_| ErrorInfo::unknown(raw.to_string()))
            }
        })
    }
}

/// The outcome of classifying a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<T> {
    /// The service did not report a failure and the body decoded into `T`.
    Succeeded(T),
    /// The service reported `"Succeeded": false`.
    Failed(ErrorInfo),
}

impl<T: DeserializeOwned> Classified<T> {
    /// Classify a raw response body.
    ///
    /// Returns [`ErrorKind::Decode`](azurecdn_core::ErrorKind::Decode) if the
    /// body is not json, or if it is not a failure and doesn't match `T`.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|err| {
            Error::decode("response body is not valid json").with_source(err)
        })?;

        if let Some(info) = Envelope::from_value(&value).and_then(Envelope::failure) {
            debug!("service reported failure: {}: {}", info.error_type, info.message);
            return Ok(Classified::Failed(info));
        }

        let result = serde_json::from_value(value).map_err(|err| {
            Error::decode(format!("response doesn't match {}", type_name::<T>())).with_source(err)
        })?;
        Ok(Classified::Succeeded(result))
    }
}

impl<T> Classified<T> {
    /// Turn the classification into a result, failures become
    /// [`ErrorKind::Api`](azurecdn_core::ErrorKind::Api) errors.
    pub fn into_result(self) -> Result<T> {
        match self {
            Classified::Succeeded(v) => Ok(v),
            Classified::Failed(info) => Err(Error::api(info.into())),
        }
    }
}

/// Classify a raw response body into `T`.
pub fn classify<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Classified::from_slice(body)?.into_result()
}
