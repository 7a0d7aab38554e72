use chrono::{Local, NaiveDateTime};

/// Layout of every boss timestamp, e.g. `2025/08/29-10:00`.
pub const BOSS_TIME_FORMAT: &str = "%Y/%m/%d-%H:%M";

/// Formats a local wall-clock time as a boss timestamp.
pub fn format_boss_time(dt: NaiveDateTime) -> String {
    dt.format(BOSS_TIME_FORMAT).to_string()
}

/// Returns the current local time as a boss timestamp.
pub fn current_boss_time() -> String {
    format_boss_time(Local::now().naive_local())
}

/// Parses a boss timestamp back into a `NaiveDateTime`, if it has the expected shape.
pub fn parse_boss_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, BOSS_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn formats_with_zero_padding() {
        let dt = NaiveDate::from_ymd_opt(2025, 8, 9)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(format_boss_time(dt), "2025/08/09-07:05");
    }

    #[test]
    fn current_time_parses_back() {
        let stamp = current_boss_time();
        assert_eq!(stamp.len(), 16);
        assert!(parse_boss_time(&stamp).is_some(), "bad stamp {}", stamp);
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse_boss_time("2025-08-29 10:00").is_none());
        assert!(parse_boss_time("tomorrow").is_none());
    }
}
