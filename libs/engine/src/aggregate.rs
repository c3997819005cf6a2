use std::num::NonZeroUsize;

use scan_api::{RawRecord, ScanRequest, TableStore};

use crate::error::EngineError;

/// Knobs of a full-table scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Upper bound on page requests. `None` trusts the store's completion
    /// signal alone: a store that never reports completion is scanned forever.
    pub max_pages: Option<NonZeroUsize>,
}

/// Outcome of `scan_all`.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Every record of the table, in the store's scan order.
    pub records: Vec<RawRecord>,
    /// Number of page requests issued.
    pub pages: usize,
}

/// Read the whole table, page by page, until the store reports completion.
///
/// Pages are fetched strictly one after another. Any page failure aborts
/// the scan; records gathered so far are dropped.
pub async fn scan_all<S>(store: &S, options: ScanOptions) -> Result<ScanOutcome, EngineError>
where
    S: TableStore + ?Sized,
{
    let mut outcome = ScanOutcome::default();
    let mut request = ScanRequest::<S::Cursor>::full_table();

    loop {
        if let Some(limit) = options.max_pages {
            if outcome.pages >= limit.get() {
                tracing::warn!(
                    table = store.table_name(),
                    limit = limit.get(),
                    records = outcome.records.len(),
                    "page limit reached before scan completed"
                );
                return Err(EngineError::PageLimitExceeded {
                    table: store.table_name().to_string(),
                    limit: limit.get(),
                });
            }
        }

        let page = store
            .scan_page(&request)
            .await
            .map_err(|e| e.with_context(format!("scan page {}", outcome.pages + 1)))?;
        outcome.pages += 1;

        tracing::debug!(
            table = store.table_name(),
            page = outcome.pages,
            records = page.records.len(),
            more = !page.is_done(),
            "scan page received"
        );

        outcome.records.extend(page.records);

        match page.next {
            Some(cursor) => request = request.resume(cursor),
            None => break,
        }
    }

    Ok(outcome)
}
