//! Scraper for the UK CMA fuel price transparency scheme.
//!
//! Discovers the participating retailers from the scheme page, fetches
//! their price feeds under a concurrency cap and a batch deadline, and
//! normalizes the results into flat retailer and station records.

pub mod batch;
pub mod client;
pub mod directory;
pub mod error;
pub mod normalize;
pub mod types;

pub use batch::{
    fetch_all_feeds, BatchOptions, FeedBatch, FetchFailure, FetchedFeed, DEFAULT_BATCH_DEADLINE,
    DEFAULT_MAX_PARALLEL,
};
pub use client::FeedClient;
pub use directory::fetch_participating_retailers;
pub use error::{DirectoryError, FetchError};
pub use normalize::{retailer_record, station_records};
pub use types::{FeedLocation, FeedStation, RetailerFeed};
