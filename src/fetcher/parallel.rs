use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::app::{ReadItError, Result};
use crate::domain::{EnrichmentResult, PostInfo, Record};
use crate::fetcher::{EnrichmentCache, EnrichmentConfig, PostInfoSource};

/// A record whose enrichment gave up after its attempt budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichmentFailure {
    pub key: String,
    pub attempts: u32,
    pub error: String,
}

/// Outcome of one enrichment pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnrichmentReport {
    /// Number of records handed in.
    pub requested: usize,
    pub results: Vec<EnrichmentResult>,
    pub failures: Vec<EnrichmentFailure>,
}

impl EnrichmentReport {
    /// Fewer results came back than records went in.
    pub fn is_degraded(&self) -> bool {
        self.results.len() < self.requested
    }
}

/// Fetches post info for many records at once, bounded by a semaphore.
pub struct ParallelEnricher {
    source: Arc<dyn PostInfoSource + Send + Sync>,
    cache: Arc<EnrichmentCache>,
    semaphore: Arc<Semaphore>,
    config: EnrichmentConfig,
}

impl ParallelEnricher {
    pub fn new(
        source: Arc<dyn PostInfoSource + Send + Sync>,
        cache: Arc<EnrichmentCache>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            source,
            cache,
            semaphore: Arc::new(Semaphore::new(config.concurrency.max(1))),
            config,
        }
    }

    pub fn cache(&self) -> &Arc<EnrichmentCache> {
        &self.cache
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Enrich every record and wait for all of them to settle.
    ///
    /// A failing record never aborts its siblings; it shows up in
    /// `failures` and is missing from `results`.
    pub async fn enrich<R: Record>(&self, records: &[R]) -> EnrichmentReport {
        let mut handles = Vec::with_capacity(records.len());

        for record in records {
            let key = record.record_id().to_string();
            let url = record.direct_url().to_string();
            let source = self.source.clone();
            let cache = self.cache.clone();
            let semaphore = self.semaphore.clone();
            let config = self.config.clone();

            let handle = tokio::spawn(async move {
                enrich_single(&source, &cache, &semaphore, &config, key, url).await
            });

            handles.push(handle);
        }

        let mut report = EnrichmentReport {
            requested: records.len(),
            ..Default::default()
        };

        for joined in join_all(handles).await {
            match joined {
                Ok(Ok(result)) => report.results.push(result),
                Ok(Err(failure)) => {
                    tracing::warn!(
                        "Enrichment of {} failed after {} attempts: {}",
                        failure.key,
                        failure.attempts,
                        failure.error
                    );
                    report.failures.push(failure);
                }
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        tracing::info!(
            "Enriched {}/{} records",
            report.results.len(),
            report.requested
        );

        report
    }
}

async fn enrich_single(
    source: &Arc<dyn PostInfoSource + Send + Sync>,
    cache: &EnrichmentCache,
    semaphore: &Semaphore,
    config: &EnrichmentConfig,
    key: String,
    url: String,
) -> std::result::Result<EnrichmentResult, EnrichmentFailure> {
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        if let Some(info) = cache.get(&url).await {
            tracing::trace!("Cache hit for {}", url);
            return Ok(EnrichmentResult::new(key, info));
        }

        match fetch_attempt(source, semaphore, config.timeout(), &url).await {
            Ok(info) => {
                cache.insert(url, info.clone()).await;
                return Ok(EnrichmentResult::new(key, info));
            }
            Err(e) if attempt >= max_attempts => {
                return Err(EnrichmentFailure {
                    key,
                    attempts: attempt,
                    error: e.to_string(),
                });
            }
            Err(e) => {
                let delay = config.backoff_for(attempt);
                tracing::debug!(
                    "Attempt {} for {} failed ({}), retrying in {:?}",
                    attempt,
                    url,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// One fetch under a concurrency slot; the slot is released on return.
async fn fetch_attempt(
    source: &Arc<dyn PostInfoSource + Send + Sync>,
    semaphore: &Semaphore,
    timeout: Duration,
    url: &str,
) -> Result<PostInfo> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|e| ReadItError::Other(e.to_string()))?;

    tokio::time::timeout(timeout, source.fetch_one(url))
        .await
        .map_err(|_| ReadItError::Timeout(timeout))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Comment;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct FakeSource {
        delay: Duration,
        stall_first: Option<Duration>,
        fail_times: usize,
        fail_urls: Vec<String>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        attempts: Mutex<Vec<(String, Instant)>>,
    }

    impl FakeSource {
        fn attempts_for(&self, url: &str) -> Vec<Instant> {
            self.attempts
                .lock()
                .unwrap()
                .iter()
                .filter(|(u, _)| u == url)
                .map(|(_, at)| *at)
                .collect()
        }

        fn total_attempts(&self) -> usize {
            self.attempts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PostInfoSource for FakeSource {
        async fn fetch_one(&self, url: &str) -> Result<PostInfo> {
            let previous = {
                let mut attempts = self.attempts.lock().unwrap();
                let previous = attempts.iter().filter(|(u, _)| u == url).count();
                attempts.push((url.to_string(), Instant::now()));
                previous
            };

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            let delay = match self.stall_first {
                Some(stall) if previous == 0 => stall,
                _ => self.delay,
            };
            tokio::time::sleep(delay).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if previous < self.fail_times || self.fail_urls.iter().any(|u| u == url) {
                return Err(ReadItError::Other(format!("refused {}", url)));
            }

            Ok(PostInfo {
                title: format!("title of {}", url),
                author: "op".to_string(),
            })
        }
    }

    fn record(id: &str, url: &str) -> Comment {
        let mut comment = Comment::new(id, None, 0);
        comment.direct_url = url.to_string();
        comment
    }

    fn config(concurrency: usize) -> EnrichmentConfig {
        EnrichmentConfig {
            concurrency,
            ..Default::default()
        }
    }

    fn enricher(source: Arc<FakeSource>, config: EnrichmentConfig) -> ParallelEnricher {
        ParallelEnricher::new(source, Arc::new(EnrichmentCache::new()), config)
    }

    fn assert_gap(earlier: Instant, later: Instant, expected: Duration) {
        let gap = later - earlier;
        assert!(
            gap >= expected && gap < expected + Duration::from_millis(50),
            "gap {:?}, expected {:?}",
            gap,
            expected
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrency_is_bounded() {
        let source = Arc::new(FakeSource {
            delay: Duration::from_millis(200),
            ..Default::default()
        });
        let enricher = enricher(source.clone(), config(2));

        let records: Vec<Comment> = (0..10)
            .map(|i| record(&format!("t1_{}", i), &format!("https://x/r/a/comments/{}/", i)))
            .collect();
        let report = enricher.enrich(&records).await;

        assert_eq!(report.results.len(), 10);
        assert!(report.failures.is_empty());
        assert!(!report.is_degraded());
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 2);
        assert_eq!(source.total_attempts(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_record_order() {
        let source = Arc::new(FakeSource::default());
        let enricher = enricher(source, config(10));

        let records = vec![record("b", "https://x/b"), record("a", "https://x/a")];
        let report = enricher.enrich(&records).await;

        let keys: Vec<_> = report.results.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(report.results[1].title, "title of https://x/a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_exhaustion() {
        let url = "https://x/r/a/comments/1/";
        let source = Arc::new(FakeSource {
            fail_urls: vec![url.to_string()],
            ..Default::default()
        });
        let enricher = enricher(source.clone(), config(10));

        let report = enricher.enrich(&[record("t1_a", url)]).await;

        assert!(report.results.is_empty());
        assert!(report.is_degraded());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "t1_a");
        assert_eq!(report.failures[0].attempts, 3);

        let attempts = source.attempts_for(url);
        assert_eq!(attempts.len(), 3);
        assert_gap(attempts[0], attempts[1], Duration::from_secs(1));
        assert_gap(attempts[1], attempts[2], Duration::from_secs(2));
        assert!(enricher.cache().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_is_capped() {
        let url = "https://x/r/a/comments/1/";
        let source = Arc::new(FakeSource {
            fail_urls: vec![url.to_string()],
            ..Default::default()
        });
        let config = EnrichmentConfig {
            max_attempts: 4,
            max_backoff_ms: 3000,
            ..Default::default()
        };
        let enricher = enricher(source.clone(), config);

        let report = enricher.enrich(&[record("t1_a", url)]).await;
        assert_eq!(report.failures[0].attempts, 4);

        let attempts = source.attempts_for(url);
        assert_eq!(attempts.len(), 4);
        assert_gap(attempts[0], attempts[1], Duration::from_secs(1));
        assert_gap(attempts[1], attempts[2], Duration::from_secs(2));
        assert_gap(attempts[2], attempts[3], Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_abort_siblings() {
        let source = Arc::new(FakeSource {
            fail_urls: vec!["https://x/bad".to_string()],
            ..Default::default()
        });
        let enricher = enricher(source, config(1));

        let records = vec![
            record("a", "https://x/a"),
            record("bad", "https://x/bad"),
            record("c", "https://x/c"),
        ];
        let report = enricher.enrich(&records).await;

        assert_eq!(report.requested, 3);
        let keys: Vec<_> = report.results.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "c"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key, "bad");
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_retried_with_fresh_budget() {
        let url = "https://x/slow";
        let source = Arc::new(FakeSource {
            stall_first: Some(Duration::from_secs(60)),
            delay: Duration::from_secs(20),
            ..Default::default()
        });
        let enricher = enricher(source.clone(), config(10));

        let report = enricher.enrich(&[record("slow", url)]).await;

        assert_eq!(report.results.len(), 1);
        let attempts = source.attempts_for(url);
        assert_eq!(attempts.len(), 2);
        // 30s timeout, then the first backoff
        assert_gap(attempts[0], attempts[1], Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failures_then_success() {
        let url = "https://x/flaky";
        let source = Arc::new(FakeSource {
            fail_times: 2,
            ..Default::default()
        });
        let enricher = enricher(source.clone(), config(10));

        let report = enricher.enrich(&[record("flaky", url)]).await;

        assert_eq!(report.results.len(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(source.attempts_for(url).len(), 3);
        assert_eq!(
            enricher.cache().get(url).await.map(|info| info.title),
            Some("title of https://x/flaky".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_skips_fetch() {
        let source = Arc::new(FakeSource::default());
        let cache = Arc::new(EnrichmentCache::new());
        cache
            .insert(
                "https://x/cached",
                PostInfo {
                    title: "Cached".into(),
                    author: "someone".into(),
                },
            )
            .await;
        let enricher = ParallelEnricher::new(source.clone(), cache, config(1));

        let report = enricher.enrich(&[record("c", "https://x/cached")]).await;

        assert_eq!(source.total_attempts(), 0);
        assert_eq!(
            report.results,
            vec![EnrichmentResult {
                key: "c".into(),
                title: "Cached".into(),
                author: "someone".into(),
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_hit_does_not_wait_for_a_slot() {
        let source = Arc::new(FakeSource {
            delay: Duration::from_secs(10),
            ..Default::default()
        });
        let cache = Arc::new(EnrichmentCache::new());
        cache
            .insert(
                "https://x/cached",
                PostInfo {
                    title: "Cached".into(),
                    author: "someone".into(),
                },
            )
            .await;
        let enricher = Arc::new(ParallelEnricher::new(source.clone(), cache, config(1)));

        let busy = {
            let enricher = enricher.clone();
            tokio::spawn(async move {
                let report = enricher.enrich(&[record("slow", "https://x/slow")]).await;
                report
            })
        };
        while source.total_attempts() == 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(enricher.semaphore.available_permits(), 0);

        let start = Instant::now();
        let report = enricher.enrich(&[record("c", "https://x/cached")]).await;

        assert_eq!(Instant::now() - start, Duration::ZERO);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].title, "Cached");
        assert!(!busy.is_finished());

        let slow = busy.await.unwrap();
        assert_eq!(slow.results.len(), 1);
        assert_eq!(source.total_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_pass_is_served_from_cache() {
        let source = Arc::new(FakeSource::default());
        let enricher = enricher(source.clone(), config(10));
        let records = vec![record("a", "https://x/a")];

        enricher.enrich(&records).await;
        let report = enricher.enrich(&records).await;

        assert_eq!(report.results.len(), 1);
        assert_eq!(source.total_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_batch() {
        let enricher = enricher(Arc::new(FakeSource::default()), config(10));
        let report = enricher.enrich::<Comment>(&[]).await;
        assert_eq!(report.requested, 0);
        assert!(!report.is_degraded());
    }
}
