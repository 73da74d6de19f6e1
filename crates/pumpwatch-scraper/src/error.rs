use thiserror::Error;

/// Per-feed fetch outcomes. One retailer failing never fails the batch;
/// the variant records why that feed produced no data this run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The feed URL no longer resolves. Retailers move their feeds without
    /// updating the scheme page, so this is logged as routine.
    #[error("feed not found (404): {url}")]
    NotFound { url: String },

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    TimedOut { url: String },

    #[error("fetch of {url} cancelled by batch deadline")]
    Cancelled { url: String },

    #[error("failed to decode feed from {url}: {source}")]
    Deserialize {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Fold a transport-level failure into the right variant: reqwest
    /// reports client-side timeouts as errors on the request future, not
    /// as a status.
    pub(crate) fn transport(source: reqwest::Error, url: &str) -> Self {
        if source.is_timeout() {
            FetchError::TimedOut {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Errors discovering the participating-retailers list. Unlike feed
/// fetches these abort the run, since without the list there is nothing
/// to scrape.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to fetch retailer directory page: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} fetching retailer directory page {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no participating retailers table found at {url}")]
    TableMissing { url: String },
}
