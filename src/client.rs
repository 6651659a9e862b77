//! HTTP implementation of the coalescer's issue seam, calling the search
//! gateway the way the browser client does.

use std::time::Duration;

use async_trait::async_trait;

use crate::coalescer::SearchIssuer;
use crate::dto::search::CardsQueryResponse;
use crate::repository::CardsSearchQuery;
use crate::services::{ServiceError, ServiceResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SearchApiClient {
    api_base: String,
    http: reqwest::Client,
}

impl SearchApiClient {
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
impl SearchIssuer for SearchApiClient {
    async fn issue(&self, query: &CardsSearchQuery) -> ServiceResult<CardsQueryResponse> {
        let endpoint = format!("{}/search", self.api_base);

        let params = [
            ("term", query.term.to_string()),
            ("page", query.page.to_string()),
            ("orderby", query.order_by.clone()),
            ("sortdir", query.sort_dir.to_string()),
        ];

        let response = self
            .http
            .get(&endpoint)
            .query(&params)
            .send()
            .await
            .map_err(|e| ServiceError::SearchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::SearchFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json::<CardsQueryResponse>()
            .await
            .map_err(|e| ServiceError::SearchFailed(e.to_string()))
    }
}
