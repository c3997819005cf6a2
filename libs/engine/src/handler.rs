use scan_api::TableStore;

use crate::aggregate::{ScanOptions, scan_all};
use crate::envelope::ResponseEnvelope;
use crate::error::EngineError;
use crate::normalize::record_to_plain_mapping;

/// Per-invocation context. Only used for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub request_id: Option<String>,
}

impl Invocation {
    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
        }
    }
}

/// Full-table dump handler.
///
/// Holds the store handle shared by all invocations. Each call to `handle`
/// owns its own accumulator, so concurrent invocations never see each
/// other's scan state.
pub struct ScanHandler<S> {
    store: S,
    options: ScanOptions,
}

impl<S: TableStore> ScanHandler<S> {
    pub fn new(store: S, options: ScanOptions) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Scan the table and return every record as an indented JSON array.
    pub async fn handle(&self, invocation: &Invocation) -> Result<ResponseEnvelope, EngineError> {
        let table = self.store.table_name();
        tracing::info!(
            table,
            request_id = invocation.request_id.as_deref().unwrap_or("-"),
            "received request to scan table"
        );

        let outcome = scan_all(&self.store, self.options)
            .await
            .map_err(|e| e.with_context(format!("table '{table}'")))?;

        let items: Vec<serde_json::Map<String, serde_json::Value>> =
            outcome.records.iter().map(record_to_plain_mapping).collect();
        let body = serde_json::to_string_pretty(&items)?;

        tracing::info!(
            table,
            records = items.len(),
            pages = outcome.pages,
            "table scan complete"
        );
        Ok(ResponseEnvelope::json(body))
    }
}
