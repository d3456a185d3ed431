use chrono::{DateTime, NaiveDate, NaiveDateTime};

// Parse a human date like "May 5, 2024", "2024-05-05", or RFC3339 into
// ISO "YYYY-MM-DD". Returns None if unparseable.
pub fn parse_date_str(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(nd) = NaiveDate::parse_from_str(s, fmt) {
            return Some(nd.format("%Y-%m-%d").to_string());
        }
    }
    // subtitle strings sometimes carry a time component
    for fmt in ["%B %d, %Y %I:%M %p", "%b %d, %Y %I:%M %p"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.date().format("%Y-%m-%d").to_string());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_month() {
        assert_eq!(parse_date_str("May 5, 2024").as_deref(), Some("2024-05-05"));
    }

    #[test]
    fn short_month_with_time() {
        assert_eq!(parse_date_str("Jan 2, 2023 3:45 PM").as_deref(), Some("2023-01-02"));
    }

    #[test]
    fn iso_and_rfc3339() {
        assert_eq!(parse_date_str("2023-11-09").as_deref(), Some("2023-11-09"));
        assert_eq!(parse_date_str("2023-11-09T10:00:00Z").as_deref(), Some("2023-11-09"));
    }

    #[test]
    fn unparseable() {
        assert_eq!(parse_date_str(""), None);
        assert_eq!(parse_date_str("not a date"), None);
    }
}
