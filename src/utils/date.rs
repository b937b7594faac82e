use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date stamp used in staged, diff and approved file names (`YYYY-MM-DD`).
pub fn today_str() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// Timestamp used in backup file names (`YYYYMMDD_HHMMSS_ffffff`).
pub fn backup_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S_%6f").to_string()
}

/// Timestamp written into the approval log.
pub fn log_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
