//! Deterministic pagination without server-side cursor state.
//!
//! Navigation links are derived purely from the inbound request URI plus the
//! result metadata, so repeating a query always yields the same links. The
//! pager index goes the other way: it is recomputed from links a client
//! already holds.

use serde::{Deserialize, Serialize};

use crate::domain::types::SortDir;
use crate::repository::CardsSearchQuery;

/// Page size assumed when deriving the display pager index.
///
/// A display-estimation heuristic, not an authoritative cursor: it is
/// independent of whatever page size the repository actually used, and a
/// mismatch skews the displayed page counts without affecting navigation.
pub const DISPLAY_MAX_PER_PAGE: u64 = 175;

/// Navigation links attached to a search response. Absent sides are omitted
/// from the serialized envelope.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// Human-facing pager position derived from a result's links.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagerIndex {
    pub current_page: u64,
    pub total_pages: u64,
}

/// Rewrites the digits of the first `page=` occurrence, or appends the
/// parameter when absent.
fn set_page_param(url: &str, value: u32) -> String {
    match url.find("page=") {
        None => format!("{url}&page={value}"),
        Some(idx) => {
            let start = idx + "page=".len();
            let end = start
                + url[start..]
                    .chars()
                    .take_while(char::is_ascii_digit)
                    .count();
            format!("{}{}{}", &url[..start], value, &url[end..])
        }
    }
}

// sortdir/orderby writes are idempotent: an existing value wins.
fn set_sort_dir_param(url: &str, value: SortDir) -> String {
    if url.contains("sortdir=") {
        url.to_string()
    } else {
        format!("{url}&sortdir={}", value.as_str())
    }
}

fn set_order_by_param(url: &str, value: &str) -> String {
    if url.contains("orderby=") {
        url.to_string()
    } else {
        format!("{url}&orderby={value}")
    }
}

/// Derives the `next`/`previous` links for a result page.
///
/// The request URI is stripped back to `base_path`, `sortdir` and `orderby`
/// are written if absent, then `previous` is set iff the query is past the
/// first page and `next` iff the upstream reported more results.
pub fn build_links(
    request_uri: &str,
    query: &CardsSearchQuery,
    has_more: bool,
    base_path: &str,
) -> PageLinks {
    let url = request_uri
        .find(base_path)
        .map_or(request_uri, |idx| &request_uri[idx..]);

    let url = set_sort_dir_param(url, query.sort_dir);
    let url = set_order_by_param(&url, &query.order_by);

    let mut links = PageLinks::default();

    if query.page >= 2 {
        links.previous = Some(set_page_param(&url, query.page - 1));
    }

    if has_more {
        links.next = Some(set_page_param(&url, query.page + 1));
    }

    links
}

/// Extracts the `page` parameter value from a link, if it parses.
fn page_value_from(url: &str) -> Option<u64> {
    let idx = url.find("page=")?;
    let digits: String = url[idx + "page=".len()..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Derives the pager position from a result's links.
///
/// `current_page` defaults to 1 and is taken from the `next` link (value − 1)
/// or, with higher precedence, the `previous` link (value + 1). Malformed
/// links degrade silently to the default.
pub fn pager_index(total: u64, max_per_page: u64, links: &PageLinks) -> PagerIndex {
    let mut current_page = 1;

    if let Some(page) = links.next.as_deref().and_then(page_value_from) {
        current_page = page.saturating_sub(1);
    }

    if let Some(page) = links.previous.as_deref().and_then(page_value_from) {
        current_page = page + 1;
    }

    let total_pages = if max_per_page == 0 {
        0
    } else {
        total / max_per_page + u64::from(total % max_per_page != 0)
    };

    PagerIndex {
        current_page,
        total_pages,
    }
}
