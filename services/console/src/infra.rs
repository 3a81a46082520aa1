use chrono::{DateTime, NaiveDateTime, Utc};

/// Accepts RFC 3339 or `YYYY-MM-DD HH:MM[:SS]`, the latter read as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD HH:MM[:SS]"))
}

pub(crate) fn format_clock(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}
