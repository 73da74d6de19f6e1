use serde::{Deserialize, Serialize};

/// A participating retailer harvested from the scheme page: display name
/// plus the URL of the retailer's own price feed.
///
/// The feed URL identifies a retailer within a run. Names are display
/// text only; the source page does not guarantee they are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retailer {
    pub name: String,
    pub source_url: String,
}
