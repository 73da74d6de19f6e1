//! Discovery of the participating-retailers list from the scheme page.
//!
//! The page carries a heading with id `participating-retailers` followed
//! by a table of retailer name and feed URL. Extraction is regex-based;
//! the page is server-rendered and its markup has been stable for years.

use regex::Regex;

use pumpwatch_core::Retailer;

use crate::client::FeedClient;
use crate::error::DirectoryError;

/// Fetch the scheme page and extract the participating retailers.
///
/// # Errors
///
/// Returns `DirectoryError` when the page cannot be fetched, answers with
/// a non-success status, or contains no usable retailer table. All of
/// these abort the run: without the list there is nothing to scrape.
pub async fn fetch_participating_retailers(
    client: &FeedClient,
    url: &str,
) -> Result<Vec<Retailer>, DirectoryError> {
    tracing::info!(url, "fetching participating retailers page");

    let response = client.client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DirectoryError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let html = response.text().await?;

    let retailers = parse_retailer_table(&html);
    if retailers.is_empty() {
        return Err(DirectoryError::TableMissing {
            url: url.to_string(),
        });
    }

    tracing::info!(count = retailers.len(), "extracted participating retailers");
    Ok(retailers)
}

/// Extract `(name, feed URL)` pairs from the first table after the
/// `participating-retailers` anchor.
///
/// Both values are taken from the cell TEXT, tags stripped: the feed URL
/// is printed in the second column, and the page sometimes wraps it in a
/// link whose href lags behind the printed value. Rows with fewer than
/// two cells or an empty value are skipped, which drops header rows as a
/// side effect.
fn parse_retailer_table(html: &str) -> Vec<Retailer> {
    let anchor_re = Regex::new(r#"(?is)id\s*=\s*["']participating-retailers["']"#)
        .expect("valid section anchor regex");
    let table_re = Regex::new(r"(?is)<table[^>]*>(.*?)</table>").expect("valid table regex");
    let row_re = Regex::new(r"(?is)<tr[^>]*>(.*?)</tr>").expect("valid table row regex");
    let cell_re = Regex::new(r"(?is)<td[^>]*>(.*?)</td>").expect("valid table cell regex");

    let Some(anchor) = anchor_re.find(html) else {
        return Vec::new();
    };
    let Some(table) = table_re
        .captures(&html[anchor.end()..])
        .and_then(|cap| cap.get(1))
    else {
        return Vec::new();
    };

    let mut retailers = Vec::new();
    for row in row_re.captures_iter(table.as_str()) {
        let row_html = row.get(1).map_or("", |m| m.as_str());
        let mut cells = cell_re
            .captures_iter(row_html)
            .map(|cap| cap.get(1).map_or("", |m| m.as_str()));
        let (Some(name_cell), Some(url_cell)) = (cells.next(), cells.next()) else {
            continue;
        };

        let name = clean_text(name_cell);
        let source_url = clean_text(url_cell);
        if name.is_empty() || source_url.is_empty() {
            continue;
        }
        retailers.push(Retailer { name, source_url });
    }
    retailers
}

/// Strip tags, decode the handful of entities the page uses, and collapse
/// whitespace.
fn clean_text(input: &str) -> String {
    let tags = Regex::new(r"(?is)<[^>]+>").expect("valid tag regex");
    let text = tags.replace_all(input, " ");
    // `&amp;` last, so already-decoded entities are not decoded twice.
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
