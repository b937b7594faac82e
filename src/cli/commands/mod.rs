pub mod approve;
pub mod backup;
pub mod clean;
pub mod config;
pub mod diff;
pub mod init;
pub mod log;
pub mod run;
