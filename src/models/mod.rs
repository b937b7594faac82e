pub mod change_type;
pub mod decision;
pub mod diff;
pub mod record;
pub mod snapshot;
pub mod value;

pub use change_type::ChangeType;
pub use decision::{ApprovalDecision, Verdict};
pub use diff::{DiffEntry, DiffOutput, DiffRecord};
pub use record::Record;
pub use snapshot::Snapshot;
pub use value::Value;
