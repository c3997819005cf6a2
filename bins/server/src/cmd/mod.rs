pub mod dump;
pub mod lambda;
pub mod serve;

use scan_engine::{ScanHandler, ScanOptions};
use storage_dynamodb::DynamoTable;

use crate::config::ServerConfig;

/// Connect to the configured table and wrap it in a handler.
/// The client is built once and shared by every invocation.
pub(crate) async fn build_handler(config: &ServerConfig) -> ScanHandler<DynamoTable> {
    let store = DynamoTable::connect(&config.dynamodb).await;
    tracing::info!(
        table = %config.dynamodb.table,
        region = %config.dynamodb.region,
        max_pages = ?config.max_pages,
        "scan handler ready"
    );
    ScanHandler::new(
        store,
        ScanOptions {
            max_pages: config.max_pages,
        },
    )
}
