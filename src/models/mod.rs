use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// URL scheme accepted for seeds and candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Split a known scheme prefix off `input`
    pub fn strip_prefix(input: &str) -> Option<(Scheme, &str)> {
        if let Some(rest) = input.strip_prefix("http://") {
            Some((Scheme::Http, rest))
        } else if let Some(rest) = input.strip_prefix("https://") {
            Some((Scheme::Https, rest))
        } else {
            None
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `scheme://a.b.c.d:port[/path]` seed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeedAddress {
    pub scheme: Scheme,
    pub ip: Ipv4Addr,
    pub port: u16,
    /// Anything after the port; kept for display, ignored by expansion
    pub path_suffix: String,
}

/// A channel entry as it appears in a manifest, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChannelEntry {
    pub name: String,
    pub url: String,
}

/// A discovered channel: normalized name plus absolute stream url
///
/// Identity is the (name, url) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub url: String,
}

impl Channel {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.url)
    }
}

/// Outcome of one full discovery run
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Distinct /24 bases left after seed normalization
    pub seed_count: usize,
    pub candidate_count: usize,
    /// Live manifest urls in completion order
    pub live_urls: Vec<String>,
    /// Unique channels, sorted by (name, url)
    pub channels: Vec<Channel>,
    pub elapsed: Duration,
}
