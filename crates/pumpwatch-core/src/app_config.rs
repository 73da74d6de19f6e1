use std::path::PathBuf;

/// Runtime configuration for a scrape run, loaded from `PUMPWATCH_*`
/// environment variables by [`crate::config::load_app_config`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL of the scheme page listing participating retailers and their
    /// feed URLs.
    pub cma_fuel_url: String,
    /// `User-Agent` header sent with every request. The scheme asks
    /// scrapers to identify themselves, so there is no baked-in default.
    pub user_agent: String,
    /// Cap on concurrently in-flight feed fetches.
    pub max_parallel_requests: usize,
    /// Per-request HTTP timeout. Must stay below the batch deadline or
    /// fetches admitted late in the batch can be starved.
    pub request_timeout_secs: u64,
    /// Wall-clock deadline for one whole batch of feed fetches.
    pub batch_deadline_secs: u64,
    /// Directory that receives `retailers.jsonl` and `stations.jsonl`.
    pub out_dir: PathBuf,
    /// Default tracing filter. `RUST_LOG` takes precedence when set.
    pub log_level: String,
}
