//! Bounded, deadline-capped fan-out over all retailer feeds.

use std::time::Duration;

use futures::{stream, StreamExt};
use tokio_util::sync::CancellationToken;

use pumpwatch_core::Retailer;

use crate::client::FeedClient;
use crate::error::FetchError;
use crate::types::RetailerFeed;

/// Default cap on concurrently in-flight feed fetches.
pub const DEFAULT_MAX_PARALLEL: usize = 5;

/// Default wall-clock deadline for one whole batch.
pub const DEFAULT_BATCH_DEADLINE: Duration = Duration::from_secs(180);

/// Tuning for one batch of feed fetches.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Cap on concurrently in-flight fetches. Zero is treated as one.
    pub max_parallel: usize,
    /// Wall-clock deadline for the whole batch. Fetches not finished when
    /// it expires fail with [`FetchError::Cancelled`].
    pub deadline: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_parallel: DEFAULT_MAX_PARALLEL,
            deadline: DEFAULT_BATCH_DEADLINE,
        }
    }
}

/// A feed fetched and decoded successfully, still paired with the
/// directory entry it came from.
#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub retailer: Retailer,
    pub feed: RetailerFeed,
}

/// A retailer whose feed produced no data this run.
#[derive(Debug)]
pub struct FetchFailure {
    pub retailer: Retailer,
    pub error: FetchError,
}

/// Outcome of one batch. Failures never abort the batch; they are
/// collected here for reporting.
#[derive(Debug)]
pub struct FeedBatch {
    pub fetched: Vec<FetchedFeed>,
    pub failures: Vec<FetchFailure>,
}

/// Fetch every feed with at most `max_parallel` requests in flight,
/// admitting no new work once `deadline` expires.
///
/// The batch never fails as a whole: every retailer resolves to either a
/// [`FetchedFeed`] or a [`FetchFailure`]. A batch with zero successes is
/// logged as a warning, not turned into an error.
pub async fn fetch_all_feeds(
    client: &FeedClient,
    retailers: Vec<Retailer>,
    options: &BatchOptions,
) -> FeedBatch {
    let total = retailers.len();
    let max_parallel = options.max_parallel.max(1);
    tracing::info!(
        total,
        max_parallel,
        deadline_secs = options.deadline.as_secs(),
        "starting feed fetch batch"
    );

    let deadline_token = CancellationToken::new();
    let timer_token = deadline_token.clone();
    let deadline = options.deadline;
    let timer = tokio::spawn(async move {
        tokio::time::sleep(deadline).await;
        timer_token.cancel();
    });

    let outcomes: Vec<Result<FetchedFeed, FetchFailure>> = stream::iter(retailers)
        .map(|retailer| fetch_one(client, &deadline_token, retailer))
        .buffer_unordered(max_parallel)
        .collect()
        .await;

    timer.abort();

    let mut batch = FeedBatch {
        fetched: Vec::new(),
        failures: Vec::new(),
    };
    for outcome in outcomes {
        match outcome {
            Ok(fetched) => batch.fetched.push(fetched),
            Err(failure) => batch.failures.push(failure),
        }
    }

    if batch.fetched.is_empty() && total > 0 {
        tracing::warn!(total, "no retailer feeds could be fetched this run");
    }
    tracing::info!(
        fetched = batch.fetched.len(),
        failed = batch.failures.len(),
        "feed fetch batch complete"
    );
    batch
}

async fn fetch_one(
    client: &FeedClient,
    token: &CancellationToken,
    retailer: Retailer,
) -> Result<FetchedFeed, FetchFailure> {
    // `buffer_unordered` first polls this future when a slot frees up; if
    // the deadline passed while it queued, fail without issuing the
    // request.
    let result = if token.is_cancelled() {
        Err(FetchError::Cancelled {
            url: retailer.source_url.clone(),
        })
    } else {
        tokio::select! {
            () = token.cancelled() => Err(FetchError::Cancelled {
                url: retailer.source_url.clone(),
            }),
            result = client.fetch_feed(&retailer.source_url) => result,
        }
    };

    match result {
        Ok(feed) => {
            tracing::info!(
                retailer = %retailer.name,
                url = %retailer.source_url,
                stations = feed.stations.as_ref().map_or(0, Vec::len),
                last_updated = feed.last_updated.as_deref().unwrap_or("unknown"),
                "fetched retailer feed"
            );
            Ok(FetchedFeed { retailer, feed })
        }
        Err(error) => {
            tracing::warn!(
                retailer = %retailer.name,
                url = %retailer.source_url,
                error = %error,
                "failed to fetch retailer feed"
            );
            Err(FetchFailure { retailer, error })
        }
    }
}
