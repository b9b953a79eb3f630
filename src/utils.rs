use crate::errors::HeapError;
use chrono::{Local, NaiveDate, TimeZone};
use std::path::Path;
use std::time::SystemTime;

pub const DEFAULT_EXTENSIONS: &[&str] = &[".py", ".js", ".jsx", ".css", ".json", ".md"];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// Parses `YYYY-MM-DD` into local midnight of that day.
pub fn parse_modified_after(date: &str) -> Result<SystemTime, HeapError> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| HeapError::InvalidDate(date.to_owned()))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| HeapError::InvalidDate(date.to_owned()))?;

    // DST gaps can skip midnight; the earliest valid instant still bounds the day.
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| HeapError::InvalidDate(date.to_owned()))?;

    Ok(local.into())
}

pub fn has_allowed_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

/// Forward-slash rendering used in log output and the summary tree.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
