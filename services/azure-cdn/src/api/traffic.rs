use std::fmt;

use azurecdn_core::time::{format_iso8601, DateTime};
use azurecdn_core::{Error, Result};
use serde::{Deserialize, Serialize};

use super::endpoint_path;
use crate::client::{CdnRequest, Client};

/// Aggregation interval of volume statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    PerFiveMinutes,
    PerHour,
    PerDay,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::PerFiveMinutes => write!(f, "PerFiveMinutes"),
            Granularity::PerHour => write!(f, "PerHour"),
            Granularity::PerDay => write!(f, "PerDay"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BandwidthItem {
    pub timestamp: String,
    pub bandwidth_in_mbps: i64,
    pub origin_bandwidth_in_mbps: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Bandwidth {
    pub domain_name: String,
    pub items: Vec<BandwidthItem>,
    pub peak_bandwidth_in_mbps: i64,
    pub valley_bandwidth_in_mbps: i64,
    pub peak_origin_bandwidth_in_mbps: i64,
    pub valley_origin_bandwidth_in_mbps: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VolumeItem {
    pub timestamp: String,
    #[serde(rename = "VolumeInMB")]
    pub volume_in_mb: i64,
    #[serde(rename = "OriginVolumeInMB")]
    pub origin_volume_in_mb: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Volume {
    pub domain_name: String,
    pub items: Vec<VolumeItem>,
    #[serde(rename = "TotalCDNVolumeInMB")]
    pub total_cdn_volume_in_mb: i64,
    #[serde(rename = "TotalOriginVolumeInMB")]
    pub total_origin_volume_in_mb: i64,
}

fn check_range(start: DateTime, end: DateTime) -> Result<()> {
    if start > end {
        return Err(Error::request_invalid(format!(
            "start time {} is after end time {}",
            format_iso8601(start),
            format_iso8601(end)
        )));
    }
    Ok(())
}

impl Client {
    /// Bandwidth statistics of an endpoint between `start` and `end`.
    pub async fn get_endpoint_bandwidth(
        &self,
        endpoint_id: &str,
        start: DateTime,
        end: DateTime,
    ) -> Result<Bandwidth> {
        check_range(start, end)?;

        let req = CdnRequest::get(endpoint_path(endpoint_id, "/bandwidth"))
            .with_query("startTime", format_iso8601(start))
            .with_query("endTime", format_iso8601(end));
        self.send(req).await
    }

    /// Traffic volume of an endpoint between `start` and `end`.
    pub async fn get_endpoint_volume(
        &self,
        endpoint_id: &str,
        granularity: Granularity,
        start: DateTime,
        end: DateTime,
    ) -> Result<Volume> {
        check_range(start, end)?;

        let req = CdnRequest::get(endpoint_path(endpoint_id, "/volume"))
            .with_query("granularity", granularity.to_string())
            .with_query("startTime", format_iso8601(start))
            .with_query("endTime", format_iso8601(end));
        self.send(req).await
    }
}
