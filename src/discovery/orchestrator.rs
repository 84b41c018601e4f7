//! Discovery orchestration
//!
//! Drives one full scan in four phases, each finishing before the next:
//!
//! 1. seed normalization
//! 2. expansion and probing over a bounded worker pool
//! 3. manifest harvesting of every live host over the same bound
//! 4. deduplication and reporting
//!
//! Worker tasks only return values. Appending results, inserting into the
//! dedup set and counting progress all happen in the single loop that
//! drains each phase.

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::harvester::ManifestHarvester;
use super::normalizer::ChannelNameNormalizer;
use super::prober::AvailabilityProber;
use super::seed::normalize_seeds;
use crate::config::{Config, ScanConfig};
use crate::errors::AppResult;
use crate::models::{Channel, ScanReport};
use crate::utils::{RetryingHttpClient, ScanHttpClient};

/// Knobs of the orchestrator itself; HTTP behaviour lives in the client
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub max_workers: usize,
    pub manifest_path: String,
    pub probe_progress_interval: usize,
    pub harvest_progress_interval: usize,
}

impl ScanSettings {
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            max_workers: config.max_workers.max(1),
            manifest_path: config.manifest_path.clone(),
            probe_progress_interval: config.probe_progress_interval,
            harvest_progress_interval: config.harvest_progress_interval,
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

/// Logs "<label> n/total <unit>" every `interval` completions
struct ProgressCounter {
    label: &'static str,
    unit: &'static str,
    total: usize,
    interval: usize,
    done: usize,
}

impl ProgressCounter {
    fn new(label: &'static str, unit: &'static str, total: usize, interval: usize) -> Self {
        Self {
            label,
            unit,
            total,
            interval,
            done: 0,
        }
    }

    fn tick(&mut self) {
        self.done += 1;
        if self.interval > 0 && self.done % self.interval == 0 {
            info!("{} {}/{} {}", self.label, self.done, self.total, self.unit);
        }
    }
}

pub struct DiscoveryOrchestrator {
    prober: AvailabilityProber,
    harvester: ManifestHarvester,
    settings: ScanSettings,
}

impl DiscoveryOrchestrator {
    pub fn new(
        client: Arc<dyn ScanHttpClient>,
        normalizer: ChannelNameNormalizer,
        settings: ScanSettings,
    ) -> Self {
        Self {
            prober: AvailabilityProber::new(client.clone()),
            harvester: ManifestHarvester::new(client, Arc::new(normalizer)),
            settings,
        }
    }

    /// Build the production pipeline: reqwest client, configured normalizer
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = RetryingHttpClient::new(&config.scan)?;
        let normalizer = ChannelNameNormalizer::with_rules(&config.normalizer.extra_rules)?;
        Ok(Self::new(
            Arc::new(client),
            normalizer,
            ScanSettings::from_config(&config.scan),
        ))
    }

    /// Run all four phases over `seeds`
    ///
    /// Never fails: unusable seeds, dead hosts and broken manifests only make
    /// the report smaller.
    pub async fn run<S: AsRef<str>>(&self, seeds: &[S]) -> ScanReport {
        let started = Instant::now();

        let bases = normalize_seeds(seeds);
        info!(
            "Normalized {} seeds into {} subnet bases",
            seeds.len(),
            bases.len()
        );

        let candidates: Vec<String> = bases
            .iter()
            .flat_map(|base| base.expand(&self.settings.manifest_path))
            .collect();
        let candidate_count = candidates.len();
        info!("Generated {} candidate urls", candidate_count);

        let live_urls = self.probe_candidates(candidates).await;
        info!("Found {} live hosts", live_urls.len());

        let harvested = self.harvest_hosts(&live_urls).await;
        let harvested_count = harvested.len();
        let channels = deduplicate(harvested);
        info!(
            "Collected {} unique channels ({} before deduplication)",
            channels.len(),
            harvested_count
        );

        ScanReport {
            seed_count: bases.len(),
            candidate_count,
            live_urls,
            channels,
            elapsed: started.elapsed(),
        }
    }

    async fn probe_candidates(&self, candidates: Vec<String>) -> Vec<String> {
        let mut progress = ProgressCounter::new(
            "Probed",
            "candidates",
            candidates.len(),
            self.settings.probe_progress_interval,
        );

        let mut results = stream::iter(candidates)
            .map(|url| {
                let prober = self.prober.clone();
                tokio::spawn(async move { prober.probe(url).await })
            })
            .buffer_unordered(self.settings.max_workers);

        let mut live_urls = Vec::new();
        while let Some(joined) = results.next().await {
            progress.tick();
            match joined {
                Ok(Some(url)) => live_urls.push(url),
                Ok(None) => {}
                Err(e) => warn!("Probe task failed: {}", e),
            }
        }
        live_urls
    }

    async fn harvest_hosts(&self, live_urls: &[String]) -> Vec<Channel> {
        let mut progress = ProgressCounter::new(
            "Harvested",
            "live hosts",
            live_urls.len(),
            self.settings.harvest_progress_interval,
        );

        let mut results = stream::iter(live_urls.iter().cloned())
            .map(|url| {
                let harvester = self.harvester.clone();
                tokio::spawn(async move { harvester.harvest(url).await })
            })
            .buffer_unordered(self.settings.max_workers);

        let mut channels = Vec::new();
        while let Some(joined) = results.next().await {
            progress.tick();
            match joined {
                Ok(found) => channels.extend(found),
                Err(e) => warn!("Harvest task failed: {}", e),
            }
        }
        channels
    }
}

/// Collapse identical (name, url) pairs; sorted so output files are stable
pub fn deduplicate(channels: Vec<Channel>) -> Vec<Channel> {
    let unique: HashSet<Channel> = channels.into_iter().collect();
    let mut channels: Vec<Channel> = unique.into_iter().collect();
    channels.sort();
    channels
}
