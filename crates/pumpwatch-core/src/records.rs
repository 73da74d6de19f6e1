use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One output line of `retailers.jsonl`: a retailer whose feed was
/// fetched and decoded during the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerRecord {
    pub name: String,
    pub source_url: String,
    /// Feed-reported timestamp, passed through verbatim. The feeds do not
    /// agree on a timestamp format, so no parsing is attempted.
    pub last_updated: Option<String>,
}

/// One output line of `stations.jsonl`: a single station from a fetched
/// feed, tagged with the retailer it came from.
///
/// Prices appear in the JSON as one top-level field per fuel code rather
/// than as a nested object; `extra_fields` holds those flattened entries.
/// The full price map, null entries included, stays available in-process
/// via `prices` and is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub retailer_name: String,
    pub site_id: Option<String>,
    pub brand: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Price map exactly as decoded from the feed.
    #[serde(skip)]
    pub prices: BTreeMap<String, Option<Number>>,
    /// Non-null prices, flattened into the record: `"E10": 141.9`.
    #[serde(flatten)]
    pub extra_fields: BTreeMap<String, Number>,
}
