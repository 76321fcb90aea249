use azurecdn_core::Result;
use serde::{Deserialize, Serialize};

use super::endpoint_path;
use crate::client::{CdnRequest, Client};
use crate::task::TaskResponse;

/// Acceleration type of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    Web,
    Download,
    #[serde(rename = "VOD")]
    Vod,
    LiveStreaming,
    ImageProcessing,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Origin {
    /// Return-to-source addresses.
    pub addresses: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EndpointSettings {
    pub custom_domain: String,
    /// Return-to-source host header.
    pub host: String,
    #[serde(rename = "ICP")]
    pub icp: String,
    pub origin: Origin,
    pub service_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EndpointStatus {
    pub enabled: bool,
    #[serde(rename = "ICPVerifyStatus")]
    pub icp_verify_status: String,
    pub lifetime_status: String,
    #[serde(rename = "CNameConfigured")]
    pub cname_configured: bool,
    pub free_trial_expired: bool,
    pub time_last_updated: String,
}

/// An accelerated domain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Endpoint {
    #[serde(rename = "EndpointID")]
    pub endpoint_id: String,
    pub settings: EndpointSettings,
    pub status: EndpointStatus,
}

/// Body of [`Client::create_endpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateEndpoint {
    pub custom_domain: String,
    pub host: String,
    #[serde(rename = "ICP")]
    pub icp: String,
    pub origin: Origin,
    pub service_type: ServiceType,
}

/// Which part of the endpoint [`Client::update_endpoint`] changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UpdateFlag {
    Origin,
    HostHeader,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateEndpointSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
}

/// Body of [`Client::update_endpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateEndpoint {
    pub endpoint_settings: UpdateEndpointSettings,
    pub update_flag: UpdateFlag,
}

impl UpdateEndpoint {
    /// Replace the return-to-source addresses.
    pub fn origin(addresses: Vec<String>) -> Self {
        Self {
            endpoint_settings: UpdateEndpointSettings {
                origin: Some(Origin { addresses }),
                ..Default::default()
            },
            update_flag: UpdateFlag::Origin,
        }
    }

    /// Replace the return-to-source host header.
    pub fn host_header(host: impl Into<String>) -> Self {
        Self {
            endpoint_settings: UpdateEndpointSettings {
                host: Some(host.into()),
                ..Default::default()
            },
            update_flag: UpdateFlag::HostHeader,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheRuleType {
    /// Match by file extension.
    #[default]
    Suffix,
    /// Match every file under a directory.
    Dir,
    /// Match one exact path.
    FullUri,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CacheRule {
    #[serde(rename = "Type")]
    pub rule_type: CacheRuleType,
    pub items: Vec<String>,
    /// Cache time in seconds.
    #[serde(rename = "TTL")]
    pub ttl: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CachePolicy {
    pub rules: Vec<CacheRule>,
    pub ignore_cache_control: bool,
    pub ignore_cookie: bool,
    pub ignore_query_string: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RefererControlType {
    AllowList,
    BlockList,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefererControl {
    pub enabled: bool,
    pub path_patterns: Vec<String>,
    pub referers: Vec<String>,
    pub referer_control_type: RefererControlType,
}

/// Body of [`Client::update_access_control`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccessControl {
    pub forbidden_ips: Vec<String>,
    pub referer_control: RefererControl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OriginProtocol {
    Http,
    Https,
    FollowRequest,
}

/// Body of [`Client::create_https_binding`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpsBinding {
    #[serde(rename = "CertificateID")]
    pub certificate_id: String,
    #[serde(rename = "EndpointID")]
    pub endpoint_id: String,
    pub origin_protocol: OriginProtocol,
    #[serde(rename = "AutoHTTPSRedirect")]
    pub auto_https_redirect: bool,
}

impl Client {
    /// List every endpoint of the subscription.
    pub async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        self.send(CdnRequest::get("/endpoints")).await
    }

    pub async fn get_endpoint(&self, endpoint_id: &str) -> Result<Endpoint> {
        self.send(CdnRequest::get(endpoint_path(endpoint_id, "")))
            .await
    }

    pub async fn create_endpoint(&self, body: &CreateEndpoint) -> Result<Endpoint> {
        self.send(CdnRequest::post("/endpoints").with_json(body)?)
            .await
    }

    pub async fn update_endpoint(
        &self,
        endpoint_id: &str,
        body: &UpdateEndpoint,
    ) -> Result<TaskResponse> {
        self.send(CdnRequest::put(endpoint_path(endpoint_id, "")).with_json(body)?)
            .await
    }

    pub async fn delete_endpoint(&self, endpoint_id: &str) -> Result<TaskResponse> {
        self.send(CdnRequest::delete(endpoint_path(endpoint_id, "")))
            .await
    }

    pub async fn enable_endpoint(&self, endpoint_id: &str) -> Result<TaskResponse> {
        self.send(CdnRequest::post(endpoint_path(endpoint_id, "/enable")))
            .await
    }

    pub async fn disable_endpoint(&self, endpoint_id: &str) -> Result<TaskResponse> {
        self.send(CdnRequest::post(endpoint_path(endpoint_id, "/disable")))
            .await
    }

    pub async fn get_cache_policy(&self, endpoint_id: &str) -> Result<CachePolicy> {
        self.send(CdnRequest::get(endpoint_path(endpoint_id, "/cacherules")))
            .await
    }

    pub async fn update_cache_policy(
        &self,
        endpoint_id: &str,
        body: &CachePolicy,
    ) -> Result<TaskResponse> {
        self.send(CdnRequest::put(endpoint_path(endpoint_id, "/cacherules")).with_json(body)?)
            .await
    }

    pub async fn update_access_control(
        &self,
        endpoint_id: &str,
        body: &AccessControl,
    ) -> Result<TaskResponse> {
        self.send(CdnRequest::put(endpoint_path(endpoint_id, "/accesscontrol")).with_json(body)?)
            .await
    }

    /// Deploy a certificate uploaded by [`Client::upload_https_certificate`] to an endpoint.
    pub async fn create_https_binding(&self, body: &HttpsBinding) -> Result<TaskResponse> {
        self.send(CdnRequest::post("/https/bindings").with_json(body)?)
            .await
    }
}
