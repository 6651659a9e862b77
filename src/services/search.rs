//! Card search orchestration: validation, resilient upstream calls and the
//! allow-list projection.

use std::time::Duration;

use rand::RngExt;

use crate::domain::card::Card;
use crate::domain::types::SearchTerm;
use crate::dto::search::{SearchCardsParams, SearchOutcome};
use crate::models::card::RawSearchResult;
use crate::repository::{CardsRepository, CardsSearchQuery};
use crate::services::ServiceResult;

const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(250);
const BACKOFF_JITTER_MS: u64 = 50;

/// Bounded exponential backoff settings for one logical search.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Always at least one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles per subsequent attempt.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: DEFAULT_BACKOFF_BASE,
        }
    }

    pub fn base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay applied after the given (1-based) failed attempt.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let shift = (attempt - 1).min(16);
        let jitter = rand::rng().random_range(0..=BACKOFF_JITTER_MS);
        self.base_delay * (1u32 << shift) + Duration::from_millis(jitter)
    }
}

/// Performs one logical card search: validates the inbound parameters, calls
/// the upstream through the retry wrapper and projects the result.
///
/// All-or-nothing: a failed search never yields partial results.
pub async fn search_cards<R>(
    repo: &R,
    params: SearchCardsParams,
    retry: &RetryPolicy,
) -> ServiceResult<SearchOutcome>
where
    R: CardsRepository + ?Sized,
{
    let term = SearchTerm::new(params.term)?;

    let mut query = CardsSearchQuery::new(term);
    if let Some(page) = params.page {
        query = query.page(page);
    }
    if let Some(orderby) = params.orderby {
        query = query.order_by(orderby);
    }
    if let Some(sortdir) = params.sortdir {
        query = query.sort_dir(sortdir);
    }

    let raw = fetch_with_retry(repo, &query, retry).await?;

    log::info!("retrieved cards for term: {}", query.term);

    let cards = raw.data.into_iter().map(Card::from).collect();

    Ok(SearchOutcome {
        total: raw.total_cards,
        has_more: raw.has_more,
        cards,
        query,
    })
}

/// Attempts the upstream call until success or the attempt budget is spent.
async fn fetch_with_retry<R>(
    repo: &R,
    query: &CardsSearchQuery,
    retry: &RetryPolicy,
) -> ServiceResult<RawSearchResult>
where
    R: CardsRepository + ?Sized,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        let err = match repo.search(query).await {
            Ok(result) => return Ok(result),
            Err(err) => err,
        };

        let exhausted = attempt >= retry.max_attempts;
        log::warn!(
            "Calling cards repository failed [{attempt}]. Will {}",
            if exhausted { "no longer retry" } else { "retry" }
        );

        if exhausted {
            return Err(err.into());
        }

        tokio::time::sleep(retry.backoff_delay(attempt)).await;
    }
}
