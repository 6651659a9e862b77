use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::types::SortDir;
use crate::pagination::PageLinks;
use crate::repository::CardsSearchQuery;

/// Query parameters accepted by the `/search` endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchCardsParams {
    /// Free-form search term; validated by the service layer.
    pub term: String,
    /// Optional page number, defaults to the first page.
    pub page: Option<u32>,
    /// Optional upstream sort field, defaults to `name`.
    pub orderby: Option<String>,
    /// Optional sort direction, defaults to ascending.
    pub sortdir: Option<SortDir>,
}

/// Result payload returned by [`crate::services::search::search_cards`].
#[derive(Debug)]
pub struct SearchOutcome {
    /// Total number of cards matching the term across all pages.
    pub total: u64,
    /// Whether the upstream reports further pages.
    pub has_more: bool,
    /// Projected page of cards.
    pub cards: Vec<Card>,
    /// The validated query the result was produced for.
    pub query: CardsSearchQuery,
}

/// JSON envelope answered by the search endpoint and consumed by clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardsQueryResponse {
    pub total: u64,
    pub data: Vec<Card>,
    #[serde(flatten)]
    pub links: PageLinks,
}
