//! Bounded scrape retry
//!
//! Calls a [`CarrierSource`] until it yields a nonempty result or the
//! attempt budget is spent. Attempts run back to back with no delay; a
//! source error counts the same as an empty answer.

use crate::cidr::CidrSet;
use crate::config::RetryConfig;
use crate::error::{Error, Result};
use crate::traits::CarrierSource;
use tracing::{debug, warn};

/// Retry driver for carrier sources
#[derive(Debug, Clone)]
pub struct Retrier {
    max_attempts: usize,
}

impl Retrier {
    /// Create a retrier from configuration
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
        }
    }

    /// Maximum attempts per carrier
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Scrape one carrier
    ///
    /// # Returns
    ///
    /// - `Ok(set)`: the first nonempty (raw, unsorted) result
    /// - `Err(Error::SourceUnavailable)`: every attempt came back empty
    pub async fn scrape(&self, source: &dyn CarrierSource, short_name: &str) -> Result<CidrSet> {
        for attempt in 1..=self.max_attempts {
            match source.scrape().await {
                Ok(entries) if !entries.is_empty() => {
                    debug!(
                        "Scraped {} entries for {} on attempt {}",
                        entries.len(),
                        short_name,
                        attempt
                    );
                    return Ok(entries);
                }
                Ok(_) => {
                    debug!("Attempt {} for {} returned no entries", attempt, short_name);
                }
                Err(e) => {
                    debug!("Attempt {} for {} failed: {}", attempt, short_name, e);
                }
            }
        }

        warn!(
            "Giving up on {} after {} attempt(s) ({})",
            short_name,
            self.max_attempts,
            source.source_url()
        );
        Err(Error::source_unavailable(short_name, self.max_attempts))
    }
}

impl Default for Retrier {
    fn default() -> Self {
        Self::new(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::CarrierId;
    use crate::cidr::CidrEntry;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Plays back a fixed script of answers, then answers empty
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Vec<CidrEntry>>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Vec<CidrEntry>>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl CarrierSource for ScriptedSource {
        fn carrier(&self) -> CarrierId {
            CarrierId::DoCoMo
        }

        fn source_url(&self) -> &str {
            "http://example.invalid/docomo"
        }

        async fn scrape(&self) -> Result<Vec<CidrEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
        }
    }

    #[tokio::test]
    async fn test_stops_on_first_nonempty() {
        let source = ScriptedSource::new(vec![
            Ok(Vec::new()),
            Ok(vec![CidrEntry::new("1.2.3.0/24")]),
            Ok(vec![CidrEntry::new("9.9.9.0/24")]),
        ]);

        let set = Retrier::default().scrape(&source, "docomo").await.unwrap();

        assert_eq!(set, vec![CidrEntry::new("1.2.3.0/24")]);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_exhaustion_after_four_attempts() {
        let source = ScriptedSource::new(Vec::new());

        let err = Retrier::default().scrape(&source, "docomo").await.unwrap_err();

        assert!(matches!(err, Error::SourceUnavailable { attempts: 4, .. }));
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test]
    async fn test_errors_count_as_empty_attempts() {
        let source = ScriptedSource::new(vec![
            Err(Error::http("connection reset")),
            Err(Error::http("503")),
            Ok(vec![CidrEntry::new("1.2.3.0/24")]),
        ]);

        let set = Retrier::default().scrape(&source, "docomo").await.unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_custom_attempt_budget() {
        let source = ScriptedSource::new(Vec::new());
        let retrier = Retrier::new(&RetryConfig { max_attempts: 1 });

        assert!(retrier.scrape(&source, "docomo").await.is_err());
        assert_eq!(source.calls(), 1);
    }
}
