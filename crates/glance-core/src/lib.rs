pub mod error;
pub mod id;
pub mod mode;
pub mod record;

pub use error::CoreError;
pub use id::ObjectId;
pub use mode::FileMode;
pub use record::{RecordKind, TreeRecord};
