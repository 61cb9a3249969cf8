use chrono::{DateTime, Datelike, Duration, Local, Month, NaiveDate, NaiveDateTime};
use anyhow::{anyhow, Result};

/// Parses the date a sheet was filed under. The backend stores it either as a
/// plain `YYYY-MM-DD` or as a full timestamp.
pub fn parse_data_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        // Stored as midnight of the data date; keep the calendar date as written.
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }

    Err(anyhow!("Could not parse date: {}", input))
}

/// Date given on the command line for an upload: `today`, `yesterday` or `YYYY-MM-DD`.
pub fn parse_upload_date(input: &str) -> Result<NaiveDate> {
    let today = Local::now().date_naive();
    match input.trim().to_lowercase().as_str() {
        "today" | "tod" => Ok(today),
        "yesterday" | "yest" => Ok(today - Duration::days(1)),
        _ => NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|_| anyhow!("Invalid date '{}': expected YYYY-MM-DD", input)),
    }
}

/// "30 Sep 2025"
pub fn display_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn parse_month(input: &str) -> Result<Month> {
    let input = input.trim();
    if let Ok(n) = input.parse::<u8>() {
        return Month::try_from(n).map_err(|_| anyhow!("Invalid month number: {}", n));
    }
    input
        .parse::<Month>()
        .map_err(|_| anyhow!("Invalid month: '{}'", input))
}

pub fn current_year() -> i32 {
    Local::now().year()
}

pub fn current_month() -> Month {
    Month::try_from(Local::now().month() as u8).unwrap_or(Month::January)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_date_plain() {
        assert_eq!(
            parse_data_date("2025-09-30").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()
        );
    }

    #[test]
    fn test_parse_data_date_rejects_garbage() {
        assert!(parse_data_date("").is_err());
        assert!(parse_data_date("30/09/2025").is_err());
    }

    #[test]
    fn test_display_date_has_no_padding() {
        let d = NaiveDate::from_ymd_opt(2025, 9, 2).unwrap();
        assert_eq!(display_date(d), "2 Sep 2025");
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("September").unwrap(), Month::September);
        assert_eq!(parse_month("sep").unwrap(), Month::September);
        assert_eq!(parse_month("12").unwrap(), Month::December);
        assert!(parse_month("13").is_err());
        assert!(parse_month("Smarch").is_err());
    }

    #[test]
    fn test_parse_upload_date() {
        let today = Local::now().date_naive();
        assert_eq!(parse_upload_date("today").unwrap(), today);
        assert_eq!(parse_upload_date("yesterday").unwrap(), today - Duration::days(1));
        assert!(parse_upload_date("2025-13-01").is_err());
    }
}
