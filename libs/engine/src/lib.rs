pub mod aggregate;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod normalize;

pub use aggregate::{ScanOptions, ScanOutcome, scan_all};
pub use envelope::ResponseEnvelope;
pub use error::EngineError;
pub use handler::{Invocation, ScanHandler};
pub use normalize::{record_to_plain_mapping, to_plain};
