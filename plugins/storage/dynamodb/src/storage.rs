use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::scan::ScanError;
use aws_sdk_dynamodb::types::AttributeValue;

use scan_api::{ScanPage, ScanRequest, StoreError, TableStore};

use super::config::DynamoTableConfig;
use super::convert::item_to_record;

// ════════════════════════════════════════════════════════════════
//  DynamoTable
// ════════════════════════════════════════════════════════════════

/// DynamoDB `TableStore` backend.
///
/// Pages come from the `Scan` API; the cursor is the service's
/// `LastEvaluatedKey`, passed back as `ExclusiveStartKey`.
/// The `Client` is cheap to clone and shared between invocations.
#[derive(Clone)]
pub struct DynamoTable {
    client: Client,
    table: String,
}

impl DynamoTable {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Build a client from the default AWS provider chain (credentials,
    /// profile) with the configured region and optional endpoint.
    pub async fn connect(config: &DynamoTableConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url.clone());
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            table = %config.table,
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "dynamodb client ready"
        );
        Self::new(Client::new(&sdk_config), config.table.clone())
    }

    async fn do_scan(
        &self,
        request: ScanRequest<HashMap<String, AttributeValue>>,
    ) -> Result<ScanPage<HashMap<String, AttributeValue>>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .set_filter_expression(request.filter)
            .set_exclusive_start_key(request.start)
            .send()
            .await
            .map_err(scan_error)?;

        let records = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_record)
            .collect();
        let next = output.last_evaluated_key.filter(|key| !key.is_empty());

        Ok(ScanPage { records, next })
    }
}

// ════════════════════════════════════════════════════════════════
//  TableStore impl
// ════════════════════════════════════════════════════════════════

impl TableStore for DynamoTable {
    type Cursor = HashMap<String, AttributeValue>;

    fn table_name(&self) -> &str {
        &self.table
    }

    fn scan_page(
        &self,
        request: &ScanRequest<Self::Cursor>,
    ) -> Pin<Box<dyn Future<Output = Result<ScanPage<Self::Cursor>, StoreError>> + Send + '_>> {
        let request = request.clone();
        Box::pin(self.do_scan(request))
    }
}

// ════════════════════════════════════════════════════════════════
//  Helpers
// ════════════════════════════════════════════════════════════════

/// Map an SDK failure onto a `StoreError` kind.
fn scan_error<R: std::fmt::Debug + 'static>(err: SdkError<ScanError, R>) -> StoreError {
    let message = format!("dynamodb scan: {}", DisplayErrorContext(&err));
    match &err {
        SdkError::ServiceError(service) => match service.err() {
            ScanError::ProvisionedThroughputExceededException(_)
            | ScanError::RequestLimitExceeded(_) => StoreError::throttled(message),
            ScanError::ResourceNotFoundException(_) => StoreError::config(message),
            _ => StoreError::new(message),
        },
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            StoreError::io(message)
        }
        SdkError::ConstructionFailure(_) => StoreError::config(message),
        _ => StoreError::new(message),
    }
}
