use async_trait::async_trait;

use crate::domain::types::{SearchTerm, SortDir};
use crate::models::card::RawSearchResult;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod scryfall;

/// One validated search against the upstream repository.
#[derive(Clone, Debug)]
pub struct CardsSearchQuery {
    pub term: SearchTerm,
    pub order_by: String,
    pub sort_dir: SortDir,
    pub page: u32,
}

impl CardsSearchQuery {
    pub fn new(term: SearchTerm) -> Self {
        Self {
            term,
            order_by: "name".to_string(),
            sort_dir: SortDir::default(),
            page: 1,
        }
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    pub fn sort_dir(mut self, sort_dir: SortDir) -> Self {
        self.sort_dir = sort_dir;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Abstract transport to the upstream cards repository.
///
/// One call performs one upstream search attempt; retries live above this
/// seam in the service layer.
#[async_trait]
pub trait CardsRepository: Send + Sync {
    async fn search(&self, query: &CardsSearchQuery) -> RepositoryResult<RawSearchResult>;
}
