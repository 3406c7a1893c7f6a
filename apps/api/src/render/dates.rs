use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::render::RenderError;

/// Sentinel for an ongoing role or course. Printed verbatim.
pub const PRESENT: &str = "Present";

/// Parses the date shapes résumé editors send.
///
/// Accepted: `2023-01-15`, `2023-01`, `2023`, `01/15/2023`, `Jan 15, 2023`,
/// `January 15, 2023`, `Jan 2023`, `January 2023`, RFC 3339 timestamps and
/// offset-less `2023-01-15T00:00:00`. A bare year means January.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Some(d) = ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    let with_day = format!("1 {s}");
    ["%d %b %Y", "%d %B %Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&with_day, fmt).ok())
}

/// Formats a date as abbreviated month and four-digit year, e.g. `Jan 2023`.
pub fn format_date(raw: &str) -> Result<String, RenderError> {
    let trimmed = raw.trim();
    if trimmed == PRESENT {
        return Ok(PRESENT.to_string());
    }
    parse_date(trimmed)
        .map(|d| d.format("%b %Y").to_string())
        .ok_or_else(|| RenderError::DateParse {
            value: raw.to_string(),
        })
}

/// Formats `start - end`. An absent side is left out; `None` when both are absent.
pub fn format_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<String>, RenderError> {
    let parts = [start, end]
        .into_iter()
        .flatten()
        .map(format_date)
        .collect::<Result<Vec<_>, _>>()?;
    Ok((!parts.is_empty()).then(|| parts.join(" - ")))
}
