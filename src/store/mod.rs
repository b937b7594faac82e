pub mod approval_log;
pub mod canonical;
pub mod csv_io;
pub mod discovery;
pub(crate) mod fs_utils;

pub use canonical::CanonicalStore;
