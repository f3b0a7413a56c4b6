//! Multi-format date parsing.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};

/// Years a `%Y` pattern may produce. chrono reads any digit count for `%Y`,
/// so `15/03/24` would otherwise match `%d/%m/%Y` as the year 24.
const FOUR_DIGIT_YEARS: RangeInclusive<i32> = 1000..=9999;

/// Parses `value` with each chrono pattern in turn; the first match wins.
///
/// Returns `None` when the value is blank or no pattern matches. A `%Y`
/// pattern only matches a four-digit year. The order of
/// `formats` decides ambiguous values: with day-first slash listed before
/// year-first slash, `01/02/2024` is the 1st of February.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ventas_transform::normalization::parse_date_with_formats;
///
/// let formats = ["%Y-%m-%d", "%d/%m/%Y"];
/// assert_eq!(
///     parse_date_with_formats("15/03/2024", &formats),
///     NaiveDate::from_ymd_opt(2024, 3, 15)
/// );
/// assert_eq!(parse_date_with_formats("ayer", &formats), None);
/// ```
pub fn parse_date_with_formats<S: AsRef<str>>(value: &str, formats: &[S]) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| {
        let format = format.as_ref();
        let date = NaiveDate::parse_from_str(trimmed, format).ok()?;
        (!format.contains("%Y") || FOUR_DIGIT_YEARS.contains(&date.year())).then_some(date)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%b %d, %y", "%b %d %Y"];

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_each_format() {
        assert_eq!(parse_date_with_formats("2024-03-15", &FORMATS), ymd(2024, 3, 15));
        assert_eq!(parse_date_with_formats("15/03/2024", &FORMATS), ymd(2024, 3, 15));
        assert_eq!(parse_date_with_formats("2024/03/15", &FORMATS), ymd(2024, 3, 15));
        assert_eq!(parse_date_with_formats("Mar 15, 24", &FORMATS), ymd(2024, 3, 15));
        assert_eq!(parse_date_with_formats("Mar 15 2024", &FORMATS), ymd(2024, 3, 15));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(parse_date_with_formats(" 2024-01-05 ", &FORMATS), ymd(2024, 1, 5));
    }

    #[test]
    fn test_invalid_dates() {
        assert_eq!(parse_date_with_formats("", &FORMATS), None);
        assert_eq!(parse_date_with_formats("31/02/2024", &FORMATS), None);
        assert_eq!(parse_date_with_formats("2024-13-01", &FORMATS), None);
        assert_eq!(parse_date_with_formats("mañana", &FORMATS), None);
    }

    #[test]
    fn test_two_digit_year_needs_two_digit_pattern() {
        assert_eq!(parse_date_with_formats("15/03/24", &FORMATS), None);
        assert_eq!(parse_date_with_formats("24-03-15", &FORMATS), None);
        assert_eq!(parse_date_with_formats("24/03/15", &FORMATS), None);
        assert_eq!(parse_date_with_formats("15/03/20245", &FORMATS), None);
        assert_eq!(parse_date_with_formats("Mar 15, 2024", &FORMATS), None);
    }

    #[test]
    fn test_trailing_time_is_rejected() {
        assert_eq!(parse_date_with_formats("2024-03-15T10:00", &FORMATS), None);
        assert_eq!(parse_date_with_formats("2024-03-15 10:00:00", &FORMATS), None);
        assert_eq!(parse_date_with_formats("15/03/2024 10:00", &FORMATS), None);
    }
}
