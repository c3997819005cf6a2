mod config;
mod convert;
mod storage;

pub use config::DynamoTableConfig;
pub use storage::DynamoTable;
