use chrono::NaiveDate;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%B %d, %Y";

/// Canonical `YYYY-MM-DD` date of an ISO-8601 timestamp: everything before the first `T`.
pub fn date_from_timestamp(generated_at: &str) -> &str {
    generated_at
        .split_once('T')
        .map_or(generated_at, |(date, _)| date)
}

/// `2025-12-24` -> `December 24, 2025`. Strings that are not a calendar date come back as-is.
pub fn display_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, CANONICAL_FORMAT) {
        Ok(d) => d.format(DISPLAY_FORMAT).to_string(),
        Err(_) => date.to_string(),
    }
}
