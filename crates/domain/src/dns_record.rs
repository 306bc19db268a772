pub mod record;
pub mod record_type;

pub use record::{RData, ResourceRecord};
pub use record_type::RecordType;
