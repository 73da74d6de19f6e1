//! Pure transforms from a decoded feed to the two output record shapes.
//!
//! Transforms borrow the feed, so both output passes can re-enumerate the
//! same fetched payloads without refetching or caching anything.

use pumpwatch_core::{Retailer, RetailerRecord, StationRecord};

use crate::types::{FeedStation, RetailerFeed};

/// Build the `retailers.jsonl` record for one fetched feed.
#[must_use]
pub fn retailer_record(retailer: &Retailer, feed: &RetailerFeed) -> RetailerRecord {
    RetailerRecord {
        name: retailer.name.clone(),
        source_url: retailer.source_url.clone(),
        last_updated: feed.last_updated.clone(),
    }
}

/// Enumerate the `stations.jsonl` records for one fetched feed.
///
/// Lazy and restartable: calling this again walks the same stations
/// again. A feed whose `stations` key is absent or empty yields nothing.
pub fn station_records<'a>(
    retailer_name: &'a str,
    feed: &'a RetailerFeed,
) -> impl Iterator<Item = StationRecord> + 'a {
    feed.stations
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(move |station| station_record(retailer_name, station))
}

fn station_record(retailer_name: &str, station: &FeedStation) -> StationRecord {
    let prices = station.prices.clone().unwrap_or_default();

    StationRecord {
        retailer_name: retailer_name.to_string(),
        site_id: station.site_id.clone(),
        brand: station.brand.clone(),
        address: station.address.clone(),
        postcode: station.postcode.clone(),
        latitude: station.location.as_ref().map(|loc| loc.latitude),
        longitude: station.location.as_ref().map(|loc| loc.longitude),
        // Null prices stay in the raw map but never reach the output.
        extra_fields: prices
            .iter()
            .filter_map(|(code, price)| price.clone().map(|p| (code.clone(), p)))
            .collect(),
        prices,
    }
}
