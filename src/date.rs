//! Long-form French dates for post headers and the index.

use chrono::{Datelike, Local, NaiveDate};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Formats an ISO `YYYY-MM-DD` date as e.g. `8 janvier 2026` (no
/// leading zero on the day). Anything that fails to parse is returned
/// unchanged; the caller never sees an error.
pub fn format_long(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => format!(
            "{} {} {}",
            parsed.day(),
            MONTHS[parsed.month0() as usize],
            parsed.year()
        ),
        Err(_) => date.to_owned(),
    }
}

/// The current local date in ISO form, used when a post's frontmatter
/// carries no `date` key.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_long() {
        assert_eq!(format_long("2026-01-08"), "8 janvier 2026");
        assert_eq!(format_long("2026-03-01"), "1 mars 2026");
        assert_eq!(format_long("1999-12-31"), "31 décembre 1999");
    }

    #[test]
    fn test_unparseable_dates_pass_through() {
        assert_eq!(format_long("demain"), "demain");
        assert_eq!(format_long("2026-13-01"), "2026-13-01");
        assert_eq!(format_long(""), "");
    }

    #[test]
    fn test_today_is_iso() {
        let today = today();
        assert!(NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
