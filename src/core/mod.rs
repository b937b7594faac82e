pub mod clean;
pub mod diff;
pub mod identity;
pub mod log;
pub mod merge;
pub mod normalize;
pub mod pipeline;
pub mod review;
