//! The discovery pipeline: seeds → candidates → live hosts → channels

pub mod harvester;
pub mod normalizer;
pub mod orchestrator;
pub mod prober;
pub mod seed;

pub use harvester::ManifestHarvester;
pub use normalizer::{normalize_channel_name, ChannelNameNormalizer};
pub use orchestrator::{DiscoveryOrchestrator, ScanSettings};
pub use prober::AvailabilityProber;
pub use seed::{expand_seed, normalize_seeds};
