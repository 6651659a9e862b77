use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use cardfinder::coalescer::{CallCoalescer, SearchIssuer};
use cardfinder::domain::types::SearchTerm;
use cardfinder::dto::search::CardsQueryResponse;
use cardfinder::pagination::PageLinks;
use cardfinder::repository::CardsSearchQuery;
use cardfinder::services::{ServiceError, ServiceResult};

const ISSUE_DELAY: Duration = Duration::from_millis(80);
const SUPPRESSION: Duration = Duration::from_millis(30);

struct CountingIssuer {
    calls: Arc<AtomicU32>,
    fail: bool,
}

#[async_trait]
impl SearchIssuer for CountingIssuer {
    async fn issue(&self, _query: &CardsSearchQuery) -> ServiceResult<CardsQueryResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(ISSUE_DELAY).await;

        if self.fail {
            return Err(ServiceError::SearchFailed("boom".to_string()));
        }

        Ok(CardsQueryResponse {
            total: 1,
            data: vec![],
            links: PageLinks::default(),
        })
    }
}

fn query() -> CardsSearchQuery {
    CardsSearchQuery::new(SearchTerm::new("bird").unwrap())
}

#[tokio::test]
async fn single_call_issues_once_and_delivers_once() {
    let calls = Arc::new(AtomicU32::new(0));
    let coalescer = CallCoalescer::new(CountingIssuer {
        calls: calls.clone(),
        fail: false,
    })
    .suppression_delay(SUPPRESSION);

    let delivered = Arc::new(AtomicU32::new(0));
    let sink = delivered.clone();
    coalescer
        .search(query(), move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(delivered.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn burst_collapses_to_exactly_one_trailing_call() {
    let calls = Arc::new(AtomicU32::new(0));
    let coalescer = Arc::new(
        CallCoalescer::new(CountingIssuer {
            calls: calls.clone(),
            fail: false,
        })
        .suppression_delay(SUPPRESSION),
    );

    let delivered = Arc::new(AtomicU32::new(0));
    let started = Instant::now();

    let first = {
        let coalescer = coalescer.clone();
        let sink = delivered.clone();
        tokio::spawn(async move {
            coalescer
                .search(query(), move |_| {
                    sink.fetch_add(1, Ordering::SeqCst);
                })
                .await;
        })
    };

    // Give the first call time to take flight, then burst while it is out.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let suppressed = Arc::new(AtomicU32::new(0));
    for _ in 0..4 {
        let sink = suppressed.clone();
        coalescer
            .search(query(), move |_| {
                sink.fetch_add(1, Ordering::SeqCst);
            })
            .await;
    }

    first.await.unwrap();

    // One original call plus exactly one trailing call, regardless of N.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // Both results went to the original caller's sink.
    assert_eq!(delivered.load(Ordering::SeqCst), 2);
    // Suppressed callers never hear back.
    assert_eq!(suppressed.load(Ordering::SeqCst), 0);

    // The trailing call waited out the full accumulated chain: four
    // obligations on top of two round trips.
    let floor = ISSUE_DELAY * 2 + SUPPRESSION * 4;
    assert!(
        started.elapsed() >= floor,
        "elapsed {:?} below {floor:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn suppressed_calls_return_immediately() {
    let calls = Arc::new(AtomicU32::new(0));
    let coalescer = Arc::new(
        CallCoalescer::new(CountingIssuer {
            calls: calls.clone(),
            fail: false,
        })
        .suppression_delay(SUPPRESSION),
    );

    let first = {
        let coalescer = coalescer.clone();
        tokio::spawn(async move { coalescer.search(query(), |_| {}).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let started = Instant::now();
    coalescer.search(query(), |_| {}).await;
    assert!(started.elapsed() < ISSUE_DELAY);

    first.await.unwrap();
}

#[tokio::test]
async fn failed_calls_deliver_nothing() {
    let calls = Arc::new(AtomicU32::new(0));
    let coalescer = CallCoalescer::new(CountingIssuer {
        calls: calls.clone(),
        fail: true,
    })
    .suppression_delay(SUPPRESSION);

    let delivered = Arc::new(AtomicU32::new(0));
    let sink = delivered.clone();
    coalescer
        .search(query(), move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(delivered.load(Ordering::SeqCst), 0);
}
