//! Working hours and the café clock.
//!
//! All open/closed decisions run on a fixed UTC+3 clock. Hours are whole-hour
//! boundaries within a single day; overnight spans are not supported and read
//! as always closed.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Offset of the café clock from UTC, in seconds.
const CAFE_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Current time on the café clock.
#[must_use]
pub fn now_local() -> DateTime<FixedOffset> {
    match FixedOffset::east_opt(CAFE_UTC_OFFSET_SECS) {
        Some(offset) => Utc::now().with_timezone(&offset),
        // In-range constant; this arm is never taken.
        None => Utc::now().fixed_offset(),
    }
}

/// Daily working hours, `start <= hour < end` on the café clock.
///
/// Degenerate pairs (`start == end` or an inverted range) make the
/// comparison unsatisfiable, so the café reads as always closed rather
/// than always open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkingHours {
    start: u32,
    end: u32,
}

impl WorkingHours {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Opening hour, `0..=23`.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// First hour past closing (exclusive bound).
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// True when `now` falls inside the working hours.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{FixedOffset, TimeZone};
    /// use ordering::WorkingHours;
    ///
    /// let hours = WorkingHours::new(9, 21);
    /// let msk = FixedOffset::east_opt(3 * 3600).unwrap();
    /// let morning = msk.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
    /// assert!(hours.is_open_at(morning));
    /// ```
    #[must_use]
    pub fn is_open_at(&self, now: DateTime<FixedOffset>) -> bool {
        let hour = now.hour();
        self.start <= hour && hour < self.end
    }

    /// One-line open/closed status: hours left until closing when open,
    /// the next opening hour when closed.
    #[must_use]
    pub fn status_at(&self, now: DateTime<FixedOffset>) -> String {
        if self.is_open_at(now) {
            let remaining = self.end.saturating_sub(now.hour());
            format!("🟢 <b>Открыто</b> (ещё {remaining} ч.)")
        } else {
            format!("🔴 <b>Закрыто</b>\n🕐 Открываемся: {}:00 (МСК)", self.start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_hour(hour: u32) -> DateTime<FixedOffset> {
        let msk = FixedOffset::east_opt(CAFE_UTC_OFFSET_SECS).unwrap();
        msk.with_ymd_and_hms(2024, 6, 1, hour, 30, 0).unwrap()
    }

    #[test]
    fn open_exactly_within_configured_hours() {
        let hours = WorkingHours::new(9, 21);
        for hour in 0..24 {
            let expected = (9..21).contains(&hour);
            assert_eq!(hours.is_open_at(at_hour(hour)), expected, "hour {hour}");
        }
    }

    #[test]
    fn boundary_hours() {
        let hours = WorkingHours::new(9, 21);
        assert!(hours.is_open_at(at_hour(9)));
        assert!(hours.is_open_at(at_hour(20)));
        assert!(!hours.is_open_at(at_hour(21)));
        assert!(!hours.is_open_at(at_hour(8)));
    }

    #[test]
    fn equal_hours_always_closed() {
        let hours = WorkingHours::new(12, 12);
        for hour in 0..24 {
            assert!(!hours.is_open_at(at_hour(hour)), "hour {hour}");
        }
    }

    #[test]
    fn inverted_hours_always_closed() {
        let hours = WorkingHours::new(22, 2);
        for hour in 0..24 {
            assert!(!hours.is_open_at(at_hour(hour)), "hour {hour}");
        }
    }

    #[test]
    fn status_reports_remaining_hours_when_open() {
        let hours = WorkingHours::new(9, 21);
        let status = hours.status_at(at_hour(19));
        assert!(status.contains("Открыто"), "{status}");
        assert!(status.contains("ещё 2 ч."), "{status}");
    }

    #[test]
    fn status_reports_opening_hour_when_closed() {
        let hours = WorkingHours::new(9, 21);
        let status = hours.status_at(at_hour(23));
        assert!(status.contains("Закрыто"), "{status}");
        assert!(status.contains("Открываемся: 9:00"), "{status}");
    }
}
