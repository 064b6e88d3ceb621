//! Wall-clock service and calendar helpers.

use std::cell::Cell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// A simple wall-clock timestamp (UTC unless shifted by the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl SystemTime {
    /// Break a Unix timestamp in milliseconds into calendar fields.
    pub fn from_epoch_millis(millis: u64) -> Self {
        let secs = millis / 1000;
        let days = secs / 86400;
        let time_of_day = secs % 86400;
        let (year, month, day) = days_to_ymd(days);
        Self {
            year,
            month,
            day,
            hour: (time_of_day / 3600) as u8,
            minute: ((time_of_day % 3600) / 60) as u8,
            second: (time_of_day % 60) as u8,
        }
    }

    /// `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// `HH:MM:SS`.
    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl std::fmt::Display for SystemTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.date_string(), self.time_string())
    }
}

/// Abstraction over the wall clock.
pub trait TimeService {
    /// Milliseconds since the Unix epoch.
    fn epoch_millis(&self) -> u64;

    /// Current UTC wall-clock time.
    fn now(&self) -> SystemTime {
        SystemTime::from_epoch_millis(self.epoch_millis())
    }

    /// Current wall-clock time shifted by a UTC offset in minutes.
    fn now_with_offset(&self, offset_minutes: i32) -> SystemTime {
        let shifted = self.epoch_millis() as i64 + i64::from(offset_minutes) * 60_000;
        SystemTime::from_epoch_millis(shifted.max(0) as u64)
    }
}

/// The host's real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeService for SystemClock {
    fn epoch_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// session and keep another to advance it.
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.set(millis);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.set(self.millis.get().saturating_add(millis));
    }
}

impl Clone for ManualClock {
    fn clone(&self) -> Self {
        Self {
            millis: Rc::clone(&self.millis),
        }
    }
}

impl TimeService for ManualClock {
    fn epoch_millis(&self) -> u64 {
        self.millis.get()
    }
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// Convert days since Unix epoch to (year, month, day).
pub fn days_to_ymd(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let year_days = if is_leap(year) { 366 } else { 365 };
        if days < year_days {
            break;
        }
        days -= year_days;
        year += 1;
    }
    let mut month = 12u8;
    for m in 1..=12u8 {
        let md = u64::from(days_in_month(year, m));
        if days < md {
            month = m;
            break;
        }
        days -= md;
    }
    (year, month, (days + 1) as u8)
}

/// Days since 1970-01-01 for a proleptic Gregorian date. Negative before
/// the epoch.
pub fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Returns day of week (0=Sunday) for given date.
pub fn day_of_week(year: i32, month: u8, day: u8) -> u8 {
    // Tomohiko Sakamoto's algorithm.
    let t = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    (y + y / 4 - y / 100 + y / 400 + t[(month - 1) as usize] + i32::from(day)).rem_euclid(7) as u8
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap(year) => 29,
        2 => 28,
        _ => 30,
    }
}

pub fn is_leap(y: u16) -> bool {
    (y.is_multiple_of(4) && !y.is_multiple_of(100)) || y.is_multiple_of(400)
}
