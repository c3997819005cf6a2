use std::future::Future;
use std::num::NonZeroUsize;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use scan_api::{Primitive, RawRecord, ScanPage, ScanRequest, StoreError, TableStore, TaggedValue};
use scan_engine::{EngineError, Invocation, ScanHandler, ScanOptions, scan_all};
use storage_memory::MemoryTable;

fn movie(year: u32, title: &str) -> RawRecord {
    [
        ("year", TaggedValue::number(year)),
        ("title", TaggedValue::string(title)),
    ]
    .into_iter()
    .collect()
}

fn movies(n: u32) -> Vec<RawRecord> {
    (0..n).map(|i| movie(2000 + i, &format!("movie {i}"))).collect()
}

/// Store that serves pages from a memory table and fails on one page.
struct FlakyTable {
    inner: MemoryTable,
    fail_on_page: usize,
    requests: AtomicUsize,
}

impl TableStore for FlakyTable {
    type Cursor = usize;

    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    fn scan_page(
        &self,
        request: &ScanRequest<usize>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<usize>, StoreError>> + Send + '_>> {
        let page = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        if page == self.fail_on_page {
            return Box::pin(async { Err(StoreError::io("connection reset by peer")) });
        }
        self.inner.scan_page(request)
    }
}

/// Store that never reports completion.
struct EndlessTable;

impl TableStore for EndlessTable {
    type Cursor = u64;

    fn table_name(&self) -> &str {
        "endless"
    }

    fn scan_page(
        &self,
        request: &ScanRequest<u64>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<u64>, StoreError>> + Send + '_>> {
        let next = request.start.unwrap_or(0) + 1;
        Box::pin(async move {
            Ok(ScanPage {
                records: vec![movie(1900, "again")],
                next: Some(next),
            })
        })
    }
}

#[tokio::test]
async fn scan_returns_every_record_once_in_store_order() {
    let rows = movies(7);
    let table = MemoryTable::with_rows("movies", 3, rows.clone());

    let outcome = scan_all(&table, ScanOptions::default()).await.unwrap();

    assert_eq!(outcome.records, rows);
    assert_eq!(outcome.pages, 3);
}

#[tokio::test]
async fn three_pages_of_two_records() {
    let table = MemoryTable::with_rows("movies", 2, movies(6));

    let outcome = scan_all(&table, ScanOptions::default()).await.unwrap();

    assert_eq!(table.scan_requests(), 3);
    assert_eq!(outcome.records.len(), 6);
}

#[tokio::test]
async fn empty_table_returns_empty_array() {
    let handler = ScanHandler::new(MemoryTable::new("movies", 10), ScanOptions::default());

    let envelope = handler.handle(&Invocation::default()).await.unwrap();

    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.body, "[]");
    assert_eq!(envelope.headers.len(), 1);
    assert_eq!(envelope.headers["Content-Type"], "application/json");
}

#[tokio::test]
async fn handler_body_is_normalized_json_array() {
    let nested: RawRecord = [
        ("year", TaggedValue::number(2013)),
        ("title", TaggedValue::string("Rush")),
        (
            "info",
            TaggedValue::record([
                ("rating", TaggedValue::number("8.3")),
                (
                    "actors",
                    TaggedValue::ScalarList(vec![
                        Primitive::String("Daniel Bruhl".into()),
                        Primitive::String("Chris Hemsworth".into()),
                    ]),
                ),
                ("awards", TaggedValue::List(Vec::new())),
            ]),
        ),
    ]
    .into_iter()
    .collect();
    let table = MemoryTable::with_rows("movies", 1, vec![movie(1994, "Heat"), nested]);
    let handler = ScanHandler::new(table, ScanOptions::default());

    let envelope = handler
        .handle(&Invocation::with_request_id("req-1"))
        .await
        .unwrap();

    assert!(envelope.body.contains('\n'), "body should be indented");
    let body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
    assert_eq!(
        body,
        json!([
            {"year": 1994, "title": "Heat"},
            {
                "year": 2013,
                "title": "Rush",
                "info": {
                    "rating": 8.3,
                    "actors": ["Daniel Bruhl", "Chris Hemsworth"],
                    "awards": []
                }
            }
        ])
    );
}

#[tokio::test]
async fn handler_body_keeps_full_precision_numbers() {
    let row: RawRecord = [
        ("id", TaggedValue::number("12345678901234567890123456789012345678")),
        ("ratio", TaggedValue::number("0.12345678901234567890")),
    ]
    .into_iter()
    .collect();
    let handler = ScanHandler::new(MemoryTable::with_rows("movies", 10, vec![row]), ScanOptions::default());

    let envelope = handler.handle(&Invocation::default()).await.unwrap();

    assert!(
        envelope.body.contains(r#""id": 12345678901234567890123456789012345678"#),
        "{}",
        envelope.body
    );
    assert!(envelope.body.contains(r#""ratio": 0.12345678901234567890"#), "{}", envelope.body);
}

#[tokio::test]
async fn failure_on_second_page_fails_the_invocation() {
    let store = FlakyTable {
        inner: MemoryTable::with_rows("movies", 2, movies(6)),
        fail_on_page: 2,
        requests: AtomicUsize::new(0),
    };
    let handler = ScanHandler::new(store, ScanOptions::default());

    let err = handler.handle(&Invocation::default()).await.unwrap_err();

    match err {
        EngineError::StoreUnavailable(e) => {
            assert_eq!(e.kind(), scan_api::ErrorKind::Io);
            assert!(e.message().contains("scan page 2"), "{e}");
            assert!(e.message().contains("connection reset by peer"), "{e}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(handler.store().requests.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn page_ceiling_stops_a_store_that_never_finishes() {
    let options = ScanOptions {
        max_pages: NonZeroUsize::new(5),
    };

    let err = scan_all(&EndlessTable, options).await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::PageLimitExceeded { limit: 5, .. }
    ));
}

#[tokio::test]
async fn page_ceiling_does_not_trip_on_a_finished_scan() {
    let table = MemoryTable::with_rows("movies", 2, movies(6));
    let options = ScanOptions {
        max_pages: NonZeroUsize::new(3),
    };

    let outcome = scan_all(&table, options).await.unwrap();
    assert_eq!(outcome.records.len(), 6);
}

#[tokio::test]
async fn concurrent_invocations_share_the_store_only() {
    let table = Arc::new(MemoryTable::with_rows("movies", 2, movies(5)));
    let handler = Arc::new(ScanHandler::new(table.clone(), ScanOptions::default()));

    let inv_a = Invocation::with_request_id("a");
    let inv_b = Invocation::with_request_id("b");
    let (a, b) = tokio::join!(handler.handle(&inv_a), handler.handle(&inv_b),);

    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(table.scan_requests(), 6);
}
