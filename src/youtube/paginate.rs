//! Cursor pagination over remote listing endpoints.
//!
//! The Data API returns results in bounded batches with an opaque
//! continuation token. [`collect_all`] drives a [`PageFetcher`] until the
//! requested limit is satisfied or the source runs out of pages, normalizing
//! raw items into entities as they arrive. One generic loop replaces a
//! per-endpoint copy of the same pattern.

use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Largest page size the Data API accepts per call.
pub const MAX_PAGE_SIZE: u32 = 50;

/// One batch returned by a remote listing call.
#[derive(Debug, Clone)]
pub struct Page<R> {
    /// Raw items in source order.
    pub items: Vec<R>,
    /// The source's own result-count estimate for the whole listing.
    pub total_results: u32,
    /// Continuation token; absent means end of pagination.
    pub next_page_token: Option<String>,
}

/// Aggregated listing built across pages.
///
/// Item order is page arrival order, then within-page order.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    /// The source-reported total from the most recent page. This is an
    /// upstream estimate that can fluctuate between pages and routinely
    /// exceeds `items.len()`; each page's value overwrites the previous one.
    pub total_results: u32,
    pub items: Vec<T>,
}

/// Why a raw item could not be normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The item's identifier field was absent. Fatal for the whole call.
    MissingId { field: &'static str },
    /// A required non-identifier field was absent. The item is skipped.
    MissingField { field: &'static str },
}

/// A page-fetching capability bound to one endpoint and a fixed set of
/// filters. `page_size` and `page_token` are the only per-call arguments.
#[async_trait]
pub trait PageFetcher {
    type Raw: Send + Sync;

    async fn fetch_page(
        &mut self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Self::Raw>>;
}

/// Fetch pages until `limit` entities are collected or the source reports no
/// further pages, whichever comes first.
///
/// The per-call page size never exceeds [`MAX_PAGE_SIZE`] nor the remaining
/// quota. Fetches are issued strictly one at a time; errors from the fetcher
/// propagate unchanged and discard anything accumulated so far.
pub async fn collect_all<F, T, N>(fetcher: &mut F, limit: u32, normalize: N) -> Result<Listing<T>>
where
    F: PageFetcher,
    N: Fn(&F::Raw) -> std::result::Result<T, Malformed>,
{
    if limit == 0 {
        return Err(ScoutError::InvalidQuery(
            "result limit must be greater than zero".to_string(),
        ));
    }

    let mut items: Vec<T> = Vec::new();
    let mut total_results = 0;
    let mut page_token: Option<String> = None;

    loop {
        let remaining = limit - items.len() as u32;
        let page_size = MAX_PAGE_SIZE.min(remaining);
        debug!(page_size, collected = items.len(), "fetching page");

        let page = fetcher.fetch_page(page_size, page_token.as_deref()).await?;

        for raw in &page.items {
            match normalize(raw) {
                Ok(entity) => items.push(entity),
                Err(Malformed::MissingId { field }) => {
                    return Err(ScoutError::MalformedRecord {
                        field,
                        index: items.len(),
                    });
                }
                Err(Malformed::MissingField { field }) => {
                    warn!(field, index = items.len(), "skipping record without required field");
                }
            }
        }

        // Last value wins: the API recomputes its estimate per page.
        total_results = page.total_results;
        page_token = page.next_page_token;

        if page_token.is_none() || items.len() as u32 >= limit {
            break;
        }
    }

    // A source may return more items than asked for; the contract is an
    // upper bound either way.
    items.truncate(limit as usize);

    Ok(Listing {
        total_results,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted source: serves `total` items in pages of whatever size is
    /// requested, recording every requested page size.
    struct CountingSource {
        total: u32,
        served: u32,
        totals: Vec<u32>,
        pub requested_sizes: Vec<u32>,
    }

    impl CountingSource {
        fn new(total: u32) -> Self {
            Self {
                total,
                served: 0,
                totals: Vec::new(),
                requested_sizes: Vec::new(),
            }
        }

        /// Report a different `total_results` on each page.
        fn with_totals(mut self, totals: Vec<u32>) -> Self {
            self.totals = totals;
            self
        }
    }

    #[async_trait]
    impl PageFetcher for CountingSource {
        type Raw = u32;

        async fn fetch_page(
            &mut self,
            page_size: u32,
            page_token: Option<&str>,
        ) -> Result<Page<u32>> {
            // The token round-trips the number served so far.
            let start = page_token.map(|t| t.parse().unwrap()).unwrap_or(0u32);
            assert_eq!(start, self.served);
            self.requested_sizes.push(page_size);

            let count = page_size.min(self.total - self.served);
            let items = (start..start + count).collect();
            self.served += count;

            let total_results = self
                .totals
                .get(self.requested_sizes.len() - 1)
                .copied()
                .unwrap_or(self.total);

            Ok(Page {
                items,
                total_results,
                next_page_token: (self.served < self.total).then(|| self.served.to_string()),
            })
        }
    }

    fn identity(raw: &u32) -> std::result::Result<u32, Malformed> {
        Ok(*raw)
    }

    #[tokio::test]
    async fn returns_exactly_limit_from_unlimited_source() {
        let mut source = CountingSource::new(u32::MAX);
        let listing = collect_all(&mut source, 120, identity).await.unwrap();
        assert_eq!(listing.items.len(), 120);
        assert_eq!(listing.items, (0..120).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn short_source_returns_all_available() {
        let mut source = CountingSource::new(7);
        let listing = collect_all(&mut source, 50, identity).await.unwrap();
        assert_eq!(listing.items, (0..7).collect::<Vec<_>>());
        // One page, no continuation token, no further fetches.
        assert_eq!(source.requested_sizes, vec![50]);
    }

    #[tokio::test]
    async fn identical_sources_yield_identical_listings() {
        let mut a = CountingSource::new(130);
        let mut b = CountingSource::new(130);
        let la = collect_all(&mut a, 110, identity).await.unwrap();
        let lb = collect_all(&mut b, 110, identity).await.unwrap();
        assert_eq!(la.items, lb.items);
        assert_eq!(la.total_results, lb.total_results);
    }

    #[tokio::test]
    async fn total_results_takes_last_page_value() {
        // Per-page totals differ, simulating the API updating its estimate.
        let mut source = CountingSource::new(120).with_totals(vec![1000, 998, 997]);
        let listing = collect_all(&mut source, 120, identity).await.unwrap();
        assert_eq!(source.requested_sizes.len(), 3);
        assert_eq!(listing.total_results, 997);
    }

    #[tokio::test]
    async fn page_size_never_exceeds_remaining_quota() {
        let mut source = CountingSource::new(u32::MAX);
        collect_all(&mut source, 73, identity).await.unwrap();
        assert_eq!(source.requested_sizes, vec![50, 23]);
    }

    #[tokio::test]
    async fn zero_limit_fails_before_any_fetch() {
        let mut source = CountingSource::new(10);
        let err = collect_all(&mut source, 0, identity).await.unwrap_err();
        assert!(matches!(err, ScoutError::InvalidQuery(_)));
        assert!(source.requested_sizes.is_empty());
    }

    #[tokio::test]
    async fn missing_identifier_fails_the_page() {
        let mut source = CountingSource::new(5);
        let err = collect_all(&mut source, 5, |raw: &u32| {
            if *raw == 3 {
                Err(Malformed::MissingId { field: "videoId" })
            } else {
                Ok(*raw)
            }
        })
        .await
        .unwrap_err();

        match err {
            ScoutError::MalformedRecord { field, index } => {
                assert_eq!(field, "videoId");
                assert_eq!(index, 3);
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_required_field_skips_the_record() {
        let mut source = CountingSource::new(5);
        let listing = collect_all(&mut source, 5, |raw: &u32| {
            if *raw == 2 {
                Err(Malformed::MissingField { field: "snippet" })
            } else {
                Ok(*raw)
            }
        })
        .await
        .unwrap();

        assert_eq!(listing.items, vec![0, 1, 3, 4]);
    }

    #[tokio::test]
    async fn error_from_fetcher_propagates() {
        struct FailingSource;

        #[async_trait]
        impl PageFetcher for FailingSource {
            type Raw = u32;

            async fn fetch_page(&mut self, _: u32, _: Option<&str>) -> Result<Page<u32>> {
                Err(ScoutError::SourceUnavailable("quota exceeded".to_string()))
            }
        }

        let err = collect_all(&mut FailingSource, 10, identity)
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::SourceUnavailable(_)));
    }
}
