//! Seed parsing and /24 address expansion
//!
//! A seed such as `http://1.192.12.77:9901` stands for the whole
//! `1.192.12.0/24` block on port 9901. Seeds are first collapsed onto their
//! `.1` representative so two seeds in the same block are scanned once, then
//! each base expands into the 255 candidate manifest urls of its block.

use std::collections::HashSet;
use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::{Scheme, SeedAddress};

impl SeedAddress {
    /// Parse a `scheme://a.b.c.d:port[/path]` string
    ///
    /// Returns `None` for an unsupported scheme, a host that is not exactly
    /// four numeric octets, or a missing/invalid port.
    pub fn parse(input: &str) -> Option<Self> {
        let (scheme, rest) = Scheme::strip_prefix(input.trim())?;
        let (host, port_and_path) = rest.split_once(':')?;
        let ip = parse_dotted_quad(host)?;

        let port_end = port_and_path
            .find(['/', '?'])
            .unwrap_or(port_and_path.len());
        let (port, path_suffix) = port_and_path.split_at(port_end);
        if !port.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let port: u16 = port.parse().ok().filter(|port| *port != 0)?;

        Some(Self {
            scheme,
            ip,
            port,
            path_suffix: path_suffix.to_string(),
        })
    }

    /// The `.1` representative of this seed's /24, without any path
    pub fn normalized(&self) -> Self {
        let [a, b, c, _] = self.ip.octets();
        Self {
            scheme: self.scheme,
            ip: Ipv4Addr::new(a, b, c, 1),
            port: self.port,
            path_suffix: String::new(),
        }
    }

    /// All 255 candidate urls of this seed's /24 (last octet 1..=255)
    pub fn expand(&self, manifest_path: &str) -> Vec<String> {
        let [a, b, c, _] = self.ip.octets();
        (1..=u8::MAX)
            .map(|host| {
                format!(
                    "{}://{a}.{b}.{c}.{host}:{}{manifest_path}",
                    self.scheme, self.port
                )
            })
            .collect()
    }
}

impl fmt::Display for SeedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}{}",
            self.scheme, self.ip, self.port, self.path_suffix
        )
    }
}

fn parse_dotted_quad(host: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = host.split('.');
    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Expand a raw seed string; malformed seeds give an empty list
pub fn expand_seed(seed: &str, manifest_path: &str) -> Vec<String> {
    SeedAddress::parse(seed)
        .map(|seed| seed.expand(manifest_path))
        .unwrap_or_default()
}

/// Parse, collapse onto `.1` bases and deduplicate, keeping first-seen order
pub fn normalize_seeds<S: AsRef<str>>(seeds: &[S]) -> Vec<SeedAddress> {
    let mut seen = HashSet::new();
    let mut bases = Vec::new();

    for raw in seeds {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        match SeedAddress::parse(raw) {
            Some(seed) => {
                let base = seed.normalized();
                if seen.insert(base.clone()) {
                    bases.push(base);
                }
            }
            None => debug!("Discarding malformed seed: {}", raw),
        }
    }

    bases
}

/// Read a seed list: one seed per line, blank lines and `#` comments skipped
pub fn read_seed_file(path: &Path) -> AppResult<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| AppError::SeedInput {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
