use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use cardfinder::dto::search::SearchCardsParams;
use cardfinder::models::card::RawSearchResult;
use cardfinder::repository::errors::{RepositoryError, RepositoryResult};
use cardfinder::repository::{CardsRepository, CardsSearchQuery};
use cardfinder::services::ServiceError;
use cardfinder::services::search::{RetryPolicy, search_cards};

fn raw_page() -> RawSearchResult {
    serde_json::from_value(json!({
        "object": "list",
        "total_cards": 350,
        "has_more": true,
        "data": [{
            "id": "0f8d4bfa-4f27-4f65-90a9-57e344cf0e21",
            "object": "card",
            "name": "Pokey Bird",
            "lang": "en",
            "uri": "https://cards.example/cards/0f8d4bfa",
            "released_at": "2019-07-12",
            "rarity": "rare",
            "set_name": "Core Set",
            "mana_cost": "{2}{G}",
            "oracle_text": "Flying",
            "foil": true,
            "nonfoil": null,
            "games": ["paper", "arena"],
            "prices": {"usd": "0.25", "eur": "0.20", "tix": "0.01", "usd_foil": "1.10"},
            "image_uris": {"small": "s", "normal": "n", "large": "l", "art_crop": "a"},
            "collector_number": "204b"
        }]
    }))
    .unwrap()
}

/// Fails the first `fail_first` attempts, then answers with a canned page.
struct FlakyRepo {
    fail_first: u32,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl CardsRepository for FlakyRepo {
    async fn search(&self, _query: &CardsSearchQuery) -> RepositoryResult<RawSearchResult> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.fail_first {
            Err(RepositoryError::Unreachable(
                "connection refused".to_string(),
            ))
        } else {
            Ok(raw_page())
        }
    }
}

fn params(term: &str) -> SearchCardsParams {
    SearchCardsParams {
        term: term.to_string(),
        ..SearchCardsParams::default()
    }
}

fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts).base_delay(Duration::from_millis(5))
}

#[tokio::test]
async fn exhausted_retries_surface_as_repository_unreachable() {
    let calls = Arc::new(AtomicU32::new(0));
    let repo = FlakyRepo {
        fail_first: u32::MAX,
        calls: calls.clone(),
    };

    let result = search_cards(&repo, params("bird"), &fast_retry(3)).await;

    // Exactly three attempts, not one more.
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(matches!(result, Err(ServiceError::RepositoryUnreachable)));
}

#[tokio::test]
async fn recovery_on_second_attempt_returns_projected_cards() {
    let calls = Arc::new(AtomicU32::new(0));
    let repo = FlakyRepo {
        fail_first: 1,
        calls: calls.clone(),
    };

    let outcome = search_cards(&repo, params("bird"), &fast_retry(3))
        .await
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(outcome.total, 350);
    assert!(outcome.has_more);
    assert_eq!(outcome.cards.len(), 1);

    let card = serde_json::to_value(&outcome.cards[0]).unwrap();
    assert_eq!(card["name"], "Pokey Bird");
    assert_eq!(card["uri"], "/0f8d4bfa");
    assert_eq!(card["foil"], true);
    assert_eq!(card["nonfoil"], false);
    assert_eq!(card["collector_number"], 204);
    assert_eq!(card["games"], json!(["paper", "arena"]));
    // Nothing outside the allow-list survives the projection.
    assert!(card.get("mana_cost").is_none());
    assert!(card.get("oracle_text").is_none());
    assert!(card["prices"].get("tix").is_none());
    assert!(card["prices"].get("usd_foil").is_none());
    assert!(card["image_uris"].get("art_crop").is_none());
}

#[tokio::test]
async fn query_defaults_are_applied() {
    let calls = Arc::new(AtomicU32::new(0));
    let repo = FlakyRepo {
        fail_first: 0,
        calls,
    };

    let outcome = search_cards(&repo, params("bird"), &fast_retry(1))
        .await
        .unwrap();

    assert_eq!(outcome.query.page, 1);
    assert_eq!(outcome.query.order_by, "name");
    assert_eq!(
        outcome.query.sort_dir,
        cardfinder::domain::types::SortDir::Asc
    );
}

#[tokio::test]
async fn single_attempt_budget_never_sleeps_or_retries() {
    let calls = Arc::new(AtomicU32::new(0));
    let repo = FlakyRepo {
        fail_first: u32::MAX,
        calls: calls.clone(),
    };

    let result = search_cards(&repo, params("bird"), &fast_retry(1)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(result, Err(ServiceError::RepositoryUnreachable)));
}
