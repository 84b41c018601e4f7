//! Manifest harvesting
//!
//! A live host serves a JSON document shaped like
//! `{"data": [{"name": "...", "url": "..."}, ...]}`. Harvesting is best
//! effort per host: anything unexpected in the document yields no channels
//! for that host and is only logged at debug level.

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use url::{Position, Url};

use super::normalizer::ChannelNameNormalizer;
use crate::errors::{SourceError, SourceResult};
use crate::models::{Channel, RawChannelEntry};
use crate::utils::ScanHttpClient;

/// Stream urls with one of these prefixes are already absolute
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "udp://", "rtp://"];

#[derive(Debug, Deserialize)]
struct Manifest {
    data: Vec<Value>,
}

/// Fetches a live host's manifest and turns it into channels
#[derive(Clone)]
pub struct ManifestHarvester {
    client: Arc<dyn ScanHttpClient>,
    normalizer: Arc<ChannelNameNormalizer>,
}

impl ManifestHarvester {
    pub fn new(client: Arc<dyn ScanHttpClient>, normalizer: Arc<ChannelNameNormalizer>) -> Self {
        Self { client, normalizer }
    }

    pub async fn harvest(&self, live_url: String) -> Vec<Channel> {
        let body = match self.client.get_body(&live_url).await {
            Ok(body) => body,
            Err(e) => {
                debug!("Manifest fetch failed: {}", e);
                return Vec::new();
            }
        };

        let Some(base) = host_base(&live_url) else {
            debug!("Cannot derive host base from {}", live_url);
            return Vec::new();
        };

        match parse_manifest(&body, &base, &self.normalizer) {
            Ok(channels) => {
                debug!("Harvested {} channels from {}", channels.len(), live_url);
                channels
            }
            Err(e) => {
                debug!("Ignoring manifest from {}: {}", live_url, e);
                Vec::new()
            }
        }
    }
}

/// `scheme://authority` part of a url, e.g. `http://10.0.0.1:9901`
pub fn host_base(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !parsed.has_host() {
        return None;
    }
    Some(parsed[..Position::BeforePath].to_string())
}

/// Pull the usable (name, url) entries out of a manifest body
///
/// Entries with an empty or non-string `name`/`url`, and urls containing a
/// comma, are dropped. Fails only when the body is not a manifest at all.
pub fn extract_entries(body: &[u8]) -> SourceResult<Vec<RawChannelEntry>> {
    let manifest: Manifest = serde_json::from_slice(body)
        .map_err(|e| SourceError::parse_error("manifest", e.to_string()))?;

    Ok(manifest
        .data
        .iter()
        .filter_map(|item| {
            let item = item.as_object()?;
            let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
            let url = item.get("url").and_then(Value::as_str).unwrap_or_default();
            if name.is_empty() || url.is_empty() || url.contains(',') {
                return None;
            }
            Some(RawChannelEntry {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect())
}

/// Absolute urls pass through, anything else is appended to `base`
pub fn resolve_stream_url(raw: &str, base: &str) -> String {
    if ABSOLUTE_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        raw.to_string()
    } else {
        format!("{base}{raw}")
    }
}

/// Parse a manifest body into normalized channels rooted at `base`
pub fn parse_manifest(
    body: &[u8],
    base: &str,
    normalizer: &ChannelNameNormalizer,
) -> SourceResult<Vec<Channel>> {
    Ok(extract_entries(body)?
        .into_iter()
        .filter_map(|entry| {
            let name = normalizer.normalize(&entry.name);
            if name.is_empty() {
                return None;
            }
            Some(Channel {
                name,
                url: resolve_stream_url(&entry.url, base),
            })
        })
        .collect())
}
