use std::sync::Arc;
use tracing::debug;

use crate::utils::ScanHttpClient;

/// Decides whether a candidate url hosts a manifest server
///
/// Only an exact HTTP 200 counts. Every other outcome, whether a different
/// status, a timeout or a refused connection, means "not live" and is not
/// reported further.
#[derive(Clone)]
pub struct AvailabilityProber {
    client: Arc<dyn ScanHttpClient>,
}

impl AvailabilityProber {
    pub fn new(client: Arc<dyn ScanHttpClient>) -> Self {
        Self { client }
    }

    /// Returns the url unchanged when it answered 200
    pub async fn probe(&self, url: String) -> Option<String> {
        match self.client.get_status(&url).await {
            Ok(200) => Some(url),
            Ok(status) => {
                debug!("Candidate {} answered {}", url, status);
                None
            }
            Err(e) => {
                debug!("Candidate unreachable: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{SourceError, SourceResult};
    use async_trait::async_trait;

    struct FixedOutcome(fn(&str) -> SourceResult<u16>);

    #[async_trait]
    impl ScanHttpClient for FixedOutcome {
        async fn get_status(&self, url: &str) -> SourceResult<u16> {
            (self.0)(url)
        }

        async fn get_body(&self, url: &str) -> SourceResult<Vec<u8>> {
            Err(SourceError::connection(url, "not used"))
        }
    }

    fn prober(outcome: fn(&str) -> SourceResult<u16>) -> AvailabilityProber {
        AvailabilityProber::new(Arc::new(FixedOutcome(outcome)))
    }

    const URL: &str = "http://10.0.0.5:9901/iptv/live/1000.json?key=txiptv";

    #[tokio::test]
    async fn test_ok_is_live() {
        let result = prober(|_| Ok(200)).probe(URL.to_string()).await;
        assert_eq!(result.as_deref(), Some(URL));
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let not_found = prober(|_| Ok(404)).probe(URL.to_string()).await;
        let no_content = prober(|_| Ok(204)).probe(URL.to_string()).await;
        let timeout = prober(|url| Err(SourceError::timeout(url)))
            .probe(URL.to_string())
            .await;
        let refused = prober(|url| Err(SourceError::connection(url, "connection refused")))
            .probe(URL.to_string())
            .await;

        assert_eq!(not_found, None);
        assert_eq!(no_content, None);
        assert_eq!(timeout, None);
        assert_eq!(refused, None);
    }
}
