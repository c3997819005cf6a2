use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::StoreError;
use crate::value::RawRecord;

/// Parameters of one scan page request.
#[derive(Debug, Clone)]
pub struct ScanRequest<C> {
    /// Backend-specific filter expression. Full-table reads leave it `None`.
    pub filter: Option<String>,
    /// Continuation cursor from the previous page. `None` starts at the
    /// beginning of the table.
    pub start: Option<C>,
}

impl<C> ScanRequest<C> {
    /// First page of an unfiltered full-table read.
    pub fn full_table() -> Self {
        Self { filter: None, start: None }
    }

    /// Next page of the same read, resuming from `cursor`.
    pub fn resume(&self, cursor: C) -> Self {
        Self {
            filter: self.filter.clone(),
            start: Some(cursor),
        }
    }
}

/// One batch of records returned by a scan page request.
#[derive(Debug, Clone)]
pub struct ScanPage<C> {
    /// Records in the store's scan order.
    pub records: Vec<RawRecord>,
    /// Cursor for the next page. `None` means the scan is complete.
    pub next: Option<C>,
}

impl<C> ScanPage<C> {
    pub fn last(records: Vec<RawRecord>) -> Self {
        Self { records, next: None }
    }

    pub fn is_done(&self) -> bool {
        self.next.is_none()
    }
}

/// Backend for a single table.
///
/// The caller doesn't know concrete implementations; for the scan loop
/// a table is just this trait. Implementations are read-only and shared
/// between concurrent invocations, so `scan_page` takes `&self`.
pub trait TableStore: Send + Sync {
    /// Opaque continuation state handed back by the store.
    type Cursor: Send + Sync + Clone;

    /// Table name, for logs.
    fn table_name(&self) -> &str;

    /// Fetch one page of a scan.
    fn scan_page(
        &self,
        request: &ScanRequest<Self::Cursor>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<Self::Cursor>, StoreError>> + Send + '_>>;
}

impl<T: TableStore + ?Sized> TableStore for Arc<T> {
    type Cursor = T::Cursor;

    fn table_name(&self) -> &str {
        (**self).table_name()
    }

    fn scan_page(
        &self,
        request: &ScanRequest<Self::Cursor>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<Self::Cursor>, StoreError>> + Send + '_>> {
        (**self).scan_page(request)
    }
}
