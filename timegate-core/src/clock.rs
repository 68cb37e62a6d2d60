use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};

/// `ctime()`-shaped calendar rendering: weekday, month, space-padded day,
/// time of day, year. The names are fixed English, exactly as libc prints
/// them regardless of locale.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

pub fn now() -> DateTime<Local> {
    Local::now()
}

#[must_use]
pub fn ctime_string(stamp: &DateTime<Local>) -> String {
    stamp.format(CTIME_FORMAT).to_string()
}

pub fn parse_ctime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), CTIME_FORMAT)
        .with_context(|| format!("Failed to parse calendar time: {text:?}"))
}
