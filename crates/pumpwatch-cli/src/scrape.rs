//! The `scrape` command.
//!
//! Orchestrates the full pipeline: discovers the participating retailers
//! from the scheme page, fetches every price feed under the concurrency
//! cap and batch deadline, and writes `retailers.jsonl` and
//! `stations.jsonl` to the output directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use pumpwatch_core::{write_jsonl, AppConfig, Retailer, SinkError};
use pumpwatch_scraper::{
    fetch_all_feeds, fetch_participating_retailers, retailer_record, station_records,
    BatchOptions, FeedClient, FetchedFeed,
};

/// Run one full scrape.
///
/// When `dry_run` is `true`, prints the discovered retailers and returns
/// without fetching any feeds.
///
/// # Errors
///
/// Returns an error when the retailer directory cannot be discovered, the
/// retailer filter matches nothing, or an output file cannot be written.
/// Per-retailer fetch failures are reported and skipped, not propagated.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    retailer_filter: Option<&str>,
    dry_run: bool,
    out_dir_override: Option<PathBuf>,
) -> anyhow::Result<()> {
    if config.request_timeout_secs >= config.batch_deadline_secs {
        tracing::warn!(
            request_timeout_secs = config.request_timeout_secs,
            batch_deadline_secs = config.batch_deadline_secs,
            "request timeout is not below the batch deadline; fetches admitted late will be cut off by the deadline instead of their own timeout"
        );
    }

    let client = FeedClient::new(config.request_timeout_secs, &config.user_agent)
        .context("building HTTP client")?;

    let retailers = fetch_participating_retailers(&client, &config.cma_fuel_url)
        .await
        .context("discovering participating retailers")?;
    println!(
        "Found {} participating retailers on {}",
        retailers.len(),
        config.cma_fuel_url
    );

    let retailers = apply_retailer_filter(retailers, retailer_filter)?;

    if dry_run {
        println!("dry-run: would fetch {} feed(s):", retailers.len());
        for retailer in &retailers {
            println!("  {:<24} {}", retailer.name, retailer.source_url);
        }
        return Ok(());
    }

    let options = BatchOptions {
        max_parallel: config.max_parallel_requests,
        deadline: Duration::from_secs(config.batch_deadline_secs),
    };
    let batch = fetch_all_feeds(&client, retailers, &options).await;

    // Fetches complete in arrival order; sort so the output files are
    // stable between runs.
    let mut fetched = batch.fetched;
    fetched.sort_by(|a, b| a.retailer.name.cmp(&b.retailer.name));

    for feed in &fetched {
        let stations = feed.feed.stations.as_ref().map_or(0, Vec::len);
        println!(
            "  \u{2713} {:<24} {stations:>4} station(s)",
            feed.retailer.name
        );
    }
    for failure in &batch.failures {
        println!("  \u{2717} {:<24} {}", failure.retailer.name, failure.error);
    }

    let out_dir = out_dir_override.unwrap_or_else(|| config.out_dir.clone());
    let (retailer_count, station_count) =
        write_outputs(&out_dir, &fetched).context("writing output files")?;

    println!(
        "Run complete: {retailer_count} retailer record(s), {station_count} station record(s) written to {} ({} fetches failed)",
        out_dir.display(),
        batch.failures.len()
    );

    Ok(())
}

/// Restrict the discovered list to one retailer by case-insensitive name.
fn apply_retailer_filter(
    retailers: Vec<Retailer>,
    filter: Option<&str>,
) -> anyhow::Result<Vec<Retailer>> {
    let Some(name) = filter else {
        return Ok(retailers);
    };

    let filtered: Vec<Retailer> = retailers
        .into_iter()
        .filter(|r| r.name.eq_ignore_ascii_case(name))
        .collect();
    if filtered.is_empty() {
        anyhow::bail!("retailer '{name}' is not in the participating list");
    }
    Ok(filtered)
}

/// Write both output streams from one set of fetched feeds. The station
/// pass re-enumerates the same payloads the retailer pass used, so nothing
/// is refetched or buffered twice.
fn write_outputs(out_dir: &Path, fetched: &[FetchedFeed]) -> Result<(usize, usize), SinkError> {
    let retailer_count = write_jsonl(
        &out_dir.join("retailers.jsonl"),
        fetched.iter().map(|f| retailer_record(&f.retailer, &f.feed)),
    )?;
    let station_count = write_jsonl(
        &out_dir.join("stations.jsonl"),
        fetched
            .iter()
            .flat_map(|f| station_records(&f.retailer.name, &f.feed)),
    )?;
    Ok((retailer_count, station_count))
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
