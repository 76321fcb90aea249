use azurecdn_core::{Error, Result};

use crate::constants::*;

/// Config carries the immutable settings of a [`Client`](crate::Client).
///
/// Credentials are not part of the config, they come from a
/// [`ProvideCredential`](azurecdn_core::ProvideCredential) implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Host of the management api, without scheme.
    ///
    /// Default to `restapi.cdn.azure.cn`.
    pub endpoint: String,
    /// Subscription that scopes every request path.
    pub subscription_id: String,
    /// Value of the mandatory `apiVersion` query parameter.
    ///
    /// Default to `1.0`.
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Create a config for given subscription with default endpoint and api version.
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            ..Default::default()
        }
    }

    /// Set the api host.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the api version.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Check that the config can be used to build request urls.
    pub fn validate(&self) -> Result<()> {
        if self.subscription_id.is_empty() {
            return Err(Error::config_invalid("subscription_id is required"));
        }
        if self.endpoint.is_empty() || self.endpoint.contains('/') {
            return Err(Error::config_invalid(format!(
                "endpoint must be a bare host, got {:?}",
                self.endpoint
            )));
        }
        if self.api_version.is_empty() {
            return Err(Error::config_invalid("api_version is required"));
        }
        Ok(())
    }
}
