//! Utility modules for the iptv-scanner application
//!
//! HTTP plumbing shared by the prober and the harvester.

pub mod http_client;
pub mod status_code_matcher;

// Re-export commonly used types for convenience
pub use http_client::{RetryPolicy, RetryingHttpClient, ScanHttpClient};
