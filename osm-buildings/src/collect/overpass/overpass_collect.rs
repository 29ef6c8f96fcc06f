use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use crate::collect::error::CollectError;
use crate::collect::global_variables::{
    DEFAULT_OVERPASS_URLS, OVERPASS_QUERY_TIMEOUT_S, REQUEST_TIMEOUT_S, USER_AGENT,
};
use crate::collect::overpass::payload::OverpassPayload;
use crate::geo_core::BoundingBox;

/// Overpass QL selecting building ways in a bbox, plus their nodes
pub fn build_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:{}];\n(\n  way[\"building\"]({});\n);\n(._;>;);\nout body;",
        OVERPASS_QUERY_TIMEOUT_S,
        bbox.to_overpass_filter()
    )
}

/// GET url for one endpoint, the query travels in the `data` parameter
pub fn request_url(endpoint: &str, query: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().append_pair("data", query);
    Ok(url)
}

/// Fetches raw building payloads from Overpass
///
/// Endpoints are tried in order until one answers with parseable JSON. An
/// offline payload, when configured and present, replaces the network.
pub struct OverpassCollect {
    pub overpass_urls: Vec<String>,
    pub offline_payload_path: Option<PathBuf>,
    client: Client,
}

impl OverpassCollect {
    pub fn new(overpass_urls: Option<Vec<String>>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_S))
            .build()
            .context("Failed to create HTTP client")?;

        let mut collect = OverpassCollect {
            overpass_urls: Vec::new(),
            offline_payload_path: None,
            client,
        };
        collect.set_overpass_urls(overpass_urls);
        Ok(collect)
    }

    /// None or an empty list restores the default endpoints
    pub fn set_overpass_urls(&mut self, overpass_urls: Option<Vec<String>>) {
        self.overpass_urls = match overpass_urls {
            Some(urls) if !urls.is_empty() => urls,
            _ => DEFAULT_OVERPASS_URLS.iter().map(|u| u.to_string()).collect(),
        };
    }

    pub fn set_offline_payload(&mut self, path: Option<PathBuf>) {
        self.offline_payload_path = path;
    }

    /// Retrieve the element payload for a bounding box
    pub fn fetch(&self, bbox: &BoundingBox) -> Result<OverpassPayload, CollectError> {
        let mut failures = Vec::new();

        if let Some(ref path) = self.offline_payload_path {
            if path.is_file() {
                return OverpassPayload::from_file(path);
            }
            failures.push(format!("Offline payload not found: {}", path.display()));
        }

        let query = build_query(bbox);
        for endpoint in &self.overpass_urls {
            match self.request(endpoint, &query) {
                Ok(value) => return OverpassPayload::from_value(value),
                Err(reason) => {
                    warn!(endpoint = %endpoint, reason = %reason, "Overpass endpoint failed");
                    failures.push(format!("{}: {}", endpoint, reason));
                }
            }
        }

        Err(CollectError::SourceUnavailable { failures })
    }

    fn request(&self, endpoint: &str, query: &str) -> Result<serde_json::Value, String> {
        let url = request_url(endpoint, query).map_err(|e| format!("invalid URL ({})", e))?;
        info!(url = %url, "Requesting Overpass");

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;

        let bytes = response
            .bytes()
            .map_err(|e| format!("failed to read response body ({})", e))?;

        serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON response ({})", e))
    }
}
