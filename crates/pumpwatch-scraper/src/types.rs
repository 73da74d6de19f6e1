//! Wire types for the retailer price feeds.
//!
//! The scheme fixes the feed shape only loosely and live feeds drift from
//! it, so every field is optional, unknown fields are ignored, and nothing
//! here is validated beyond being decodable JSON.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Number;

/// Top-level payload of one retailer feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetailerFeed {
    #[serde(default)]
    pub last_updated: Option<String>,
    /// `None` when the key is absent. Absent and empty both mean the feed
    /// listed no stations; downstream code treats them identically.
    #[serde(default)]
    pub stations: Option<Vec<FeedStation>>,
}

/// One station entry within a feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedStation {
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub location: Option<FeedLocation>,
    /// Fuel code to price in pence per litre. `Number` keeps the feed's
    /// decimal text intact; null prices survive decoding and are dropped
    /// at output time.
    #[serde(default)]
    pub prices: Option<BTreeMap<String, Option<Number>>>,
}

/// Station coordinates. A missing axis decodes as `0.0`, which is how
/// half-filled location objects show up in live feeds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedLocation {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}
