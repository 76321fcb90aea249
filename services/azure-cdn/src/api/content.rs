use azurecdn_core::Result;
use serde::{Deserialize, Serialize};

use super::{endpoint_path, segment};
use crate::client::{CdnRequest, Client};
use crate::task::TaskResponse;

/// Body of [`Client::add_purge`].
///
/// Every entry must be an absolute url, e.g. `http://example.com/pictures/city.png`
/// for a file or `http://example.com/pictures/` for a directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Purge {
    pub files: Vec<String>,
    pub directories: Vec<String>,
}

/// Body of [`Client::add_preload`]. Every file must be an absolute url.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Preload {
    pub files: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurgeStatus {
    #[default]
    Running,
    Succeed,
    Failed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreloadStatus {
    #[default]
    Waiting,
    Running,
    Succeed,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PurgeItem {
    pub url: String,
    pub status: PurgeStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PurgeProgress {
    pub files: Vec<PurgeItem>,
    pub directories: Vec<PurgeItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PreloadItem {
    pub url: String,
    pub status: PreloadStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PreloadProgress {
    pub files: Vec<PreloadItem>,
}

impl Client {
    /// Refresh cached files and directories.
    ///
    /// The returned task track id can be passed to [`Client::query_purge`].
    pub async fn add_purge(&self, endpoint_id: &str, body: &Purge) -> Result<TaskResponse> {
        self.send(CdnRequest::post(endpoint_path(endpoint_id, "/purges")).with_json(body)?)
            .await
    }

    pub async fn query_purge(&self, endpoint_id: &str, purge_id: &str) -> Result<PurgeProgress> {
        let path = endpoint_path(endpoint_id, &format!("/purges/{}", segment(purge_id)));
        self.send(CdnRequest::get(path)).await
    }

    /// Prefetch files into the cache.
    pub async fn add_preload(&self, endpoint_id: &str, body: &Preload) -> Result<TaskResponse> {
        self.send(CdnRequest::post(endpoint_path(endpoint_id, "/preloads")).with_json(body)?)
            .await
    }

    pub async fn query_preload(
        &self,
        endpoint_id: &str,
        preload_id: &str,
    ) -> Result<PreloadProgress> {
        let path = endpoint_path(endpoint_id, &format!("/preloads/{}", segment(preload_id)));
        self.send(CdnRequest::get(path)).await
    }
}
