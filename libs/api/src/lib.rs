pub mod error;
pub mod store;
pub mod value;

pub use error::{ErrorKind, StoreError};
pub use store::{ScanPage, ScanRequest, TableStore};
pub use value::{Primitive, PrimitiveKind, RawRecord, TaggedValue};
