/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Scan defaults
pub const DEFAULT_MAX_WORKERS: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BACKOFF_FACTOR_MS: u64 = 500;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 10_000;
pub const DEFAULT_RETRY_STATUS_CODES: &[&str] = &["429", "500", "502", "503", "504"];
pub const DEFAULT_ACCEPT_INVALID_CERTS: bool = true;
pub const DEFAULT_USER_AGENT: &str = concat!("iptv-scanner/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_MANIFEST_PATH: &str = "/iptv/live/1000.json?key=txiptv";

// Progress reporting defaults
pub const DEFAULT_PROBE_PROGRESS_INTERVAL: usize = 1000;
pub const DEFAULT_HARVEST_PROGRESS_INTERVAL: usize = 100;

// Output defaults
pub const DEFAULT_IP_LIST_PATH: &str = "ip.txt";
pub const DEFAULT_CHANNEL_LIST_PATH: &str = "tvlist.txt";

// Seed defaults: a handful of known txiptv hosts
pub const DEFAULT_SEED_URLS: &[&str] = &[
    "http://1.192.12.1:9901",
    "http://1.192.248.1:9901",
    "http://1.194.52.1:10086",
    "http://61.184.128.1:9901",
    "http://61.53.90.1:9901",
    "http://61.54.14.1:9901",
];
