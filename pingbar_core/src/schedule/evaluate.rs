use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::ScheduleText;

/// Length of the clock used by [`CanonicalTimeRange`], in minutes.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Open and close as minutes since midnight.
///
/// `close < open` means the range crosses midnight; this is kept as-is and
/// only resolved in [`CanonicalTimeRange::is_open_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalTimeRange {
    pub open: u16,
    pub close: u16,
}

impl CanonicalTimeRange {
    /// Build a range from two canonical `HH:MM` strings.
    ///
    /// Returns `None` unless both are valid clock times. `24:00` is read as
    /// midnight.
    #[must_use]
    pub fn parse(open: &str, close: &str) -> Option<Self> {
        Some(Self {
            open: parse_minutes(open)?,
            close: parse_minutes(close)?,
        })
    }

    #[must_use]
    pub const fn crosses_midnight(self) -> bool {
        self.close < self.open
    }

    /// Whether `now` (minutes since midnight) falls in `[open, close)`.
    #[must_use]
    pub const fn is_open_at(self, now: u16) -> bool {
        let open = self.open;
        let mut close = self.close;
        let mut now = now;

        if self.crosses_midnight() {
            close += MINUTES_PER_DAY;
            if now < open {
                now += MINUTES_PER_DAY;
            }
        }

        open <= now && now < close
    }
}

fn parse_minutes(hhmm: &str) -> Option<u16> {
    let (hour, minute) = hhmm.split_once(':')?;
    let hour: u16 = hour.parse().ok()?;
    let minute: u16 = minute.parse().ok()?;

    match (hour, minute) {
        (24, 0) => Some(0),
        (0..=23, 0..=59) => Some(hour * 60 + minute),
        _ => None,
    }
}

/// Minutes since midnight of a wall-clock time.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "hour * 60 + minute never exceeds 1439"
)]
pub fn minutes_of(time: NaiveTime) -> u16 {
    (time.hour() * 60 + time.minute()) as u16
}

/// Open, closed, or unknown when no usable schedule was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Open,
    Closed,
    Unknown,
}

impl Availability {
    #[must_use]
    pub const fn from_open(is_open: bool) -> Self {
        if is_open { Self::Open } else { Self::Closed }
    }

    /// `Some(true)`/`Some(false)` for a known state, `None` for unknown.
    #[must_use]
    pub const fn is_open(self) -> Option<bool> {
        match self {
            Self::Open => Some(true),
            Self::Closed => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Decide whether a business is open at `now` given what was extracted.
#[must_use]
pub fn evaluate(schedule: Option<&ScheduleText>, now: NaiveTime) -> Availability {
    match schedule {
        Some(ScheduleText::AlwaysOpen) => Availability::Open,
        Some(schedule) => schedule
            .time_range()
            .map_or(Availability::Unknown, |range| {
                Availability::from_open(range.is_open_at(minutes_of(now)))
            }),
        None => Availability::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn range(open: &str, close: &str) -> ScheduleText {
        ScheduleText::Range {
            matched: format!("{open} - {close}"),
            open: open.to_string(),
            close: close.to_string(),
        }
    }

    #[test]
    fn same_day_range() {
        let schedule = range("09:00", "18:00");
        assert_eq!(evaluate(Some(&schedule), at(12, 0)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(20, 0)), Availability::Closed);
    }

    #[test]
    fn bounds_are_half_open() {
        let schedule = range("09:00", "18:00");
        assert_eq!(evaluate(Some(&schedule), at(9, 0)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(17, 59)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(18, 0)), Availability::Closed);
        assert_eq!(evaluate(Some(&schedule), at(8, 59)), Availability::Closed);
    }

    #[test]
    fn crosses_midnight() {
        let schedule = range("22:00", "02:00");
        assert_eq!(evaluate(Some(&schedule), at(23, 30)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(1, 0)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(12, 0)), Availability::Closed);
        assert_eq!(evaluate(Some(&schedule), at(2, 0)), Availability::Closed);
    }

    #[test]
    fn midnight_close_written_as_24() {
        let schedule = range("10:00", "24:00");
        assert_eq!(evaluate(Some(&schedule), at(23, 59)), Availability::Open);
        assert_eq!(evaluate(Some(&schedule), at(0, 30)), Availability::Closed);
    }

    #[test]
    fn always_open_ignores_clock() {
        for hour in [0, 6, 12, 18, 23] {
            assert_eq!(
                evaluate(Some(&ScheduleText::AlwaysOpen), at(hour, 17)),
                Availability::Open
            );
        }
    }

    #[test]
    fn unknown_is_not_closed() {
        assert_eq!(evaluate(None, at(12, 0)), Availability::Unknown);

        let phrase = ScheduleText::Phrase {
            text: "abierto de lunes a sábado".to_string(),
        };
        assert_eq!(evaluate(Some(&phrase), at(12, 0)), Availability::Unknown);

        let invalid = range("27:00", "18:00");
        assert_eq!(evaluate(Some(&invalid), at(12, 0)), Availability::Unknown);
        assert_ne!(Availability::Unknown, Availability::Closed);
    }

    #[test]
    fn parse_rejects_out_of_range() {
        assert!(CanonicalTimeRange::parse("09:00", "18:60").is_none());
        assert!(CanonicalTimeRange::parse("1030:00", "18:00").is_none());
        assert!(CanonicalTimeRange::parse("abc", "18:00").is_none());
        assert_eq!(
            CanonicalTimeRange::parse("00:00", "23:59"),
            Some(CanonicalTimeRange {
                open: 0,
                close: 1439
            })
        );
    }

    #[test]
    fn availability_tristate() {
        assert_eq!(Availability::Open.is_open(), Some(true));
        assert_eq!(Availability::Closed.is_open(), Some(false));
        assert_eq!(Availability::Unknown.is_open(), None);
        assert_eq!(Availability::from_open(true), Availability::Open);
    }
}
