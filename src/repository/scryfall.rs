//! Scryfall-compatible implementation of the upstream transport.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::card::RawSearchResult;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CardsRepository, CardsSearchQuery};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ScryfallRepository {
    api_base: String,
    http: reqwest::Client,
}

impl ScryfallRepository {
    pub fn new(api_base: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            api_base: api_base.into(),
            http,
        }
    }
}

#[async_trait]
impl CardsRepository for ScryfallRepository {
    async fn search(&self, query: &CardsSearchQuery) -> RepositoryResult<RawSearchResult> {
        let endpoint = format!("{}/cards/search", self.api_base);

        let params = [
            ("q", query.term.to_string()),
            ("order", query.order_by.to_lowercase()),
            ("dir", query.sort_dir.as_dir_param().to_string()),
            ("page", query.page.to_string()),
        ];

        let response = self.http.get(&endpoint).query(&params).send().await?;

        // Failed vs succeeded is all the retry layer cares about.
        if !response.status().is_success() {
            return Err(RepositoryError::Unreachable(format!(
                "HTTP {}",
                response.status()
            )));
        }

        Ok(response.json::<RawSearchResult>().await?)
    }
}
