use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use scan_api::{RawRecord, ScanPage, ScanRequest, StoreError, TableStore};

// ═══════════════════════════════════════════════════════════════
//  MemoryTableConfig
// ═══════════════════════════════════════════════════════════════

fn default_page_size() -> usize {
    100
}

#[derive(Debug, serde::Deserialize)]
pub struct MemoryTableConfig {
    pub table: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for MemoryTableConfig {
    fn default() -> Self {
        Self {
            table: "memory".to_string(),
            page_size: default_page_size(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  MemoryTable
// ═══════════════════════════════════════════════════════════════

/// In-memory table that pages its rows like a remote store would.
/// The cursor is the offset of the first row of the next page.
pub struct MemoryTable {
    name: String,
    rows: RwLock<Vec<RawRecord>>,
    page_size: usize,
    scan_requests: AtomicUsize,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>, page_size: usize) -> Self {
        Self {
            name: name.into(),
            rows: RwLock::new(Vec::new()),
            page_size: page_size.max(1),
            scan_requests: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &MemoryTableConfig) -> Self {
        Self::new(config.table.clone(), config.page_size)
    }

    /// Build a table already holding `rows`, in that scan order.
    pub fn with_rows(name: impl Into<String>, page_size: usize, rows: Vec<RawRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::new(name, page_size)
        }
    }

    pub async fn put(&self, records: impl IntoIterator<Item = RawRecord>) {
        self.rows.write().await.extend(records);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Number of `scan_page` calls served so far.
    pub fn scan_requests(&self) -> usize {
        self.scan_requests.load(Ordering::Relaxed)
    }
}

impl TableStore for MemoryTable {
    type Cursor = usize;

    fn table_name(&self) -> &str {
        &self.name
    }

    fn scan_page(
        &self,
        request: &ScanRequest<usize>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<usize>, StoreError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(async move {
            self.scan_requests.fetch_add(1, Ordering::Relaxed);

            if request.filter.is_some() {
                return Err(StoreError::config("memory table does not support filters"));
            }

            let buf = self.rows.read().await;
            let offset = request.start.unwrap_or(0);
            if offset > buf.len() {
                return Err(StoreError::format_err(format!(
                    "cursor {offset} past end of table ({} rows)",
                    buf.len()
                )));
            }

            let end = offset.saturating_add(self.page_size).min(buf.len());
            let records = buf[offset..end].to_vec();
            let next = (end < buf.len()).then_some(end);
            Ok(ScanPage { records, next })
        })
    }
}
