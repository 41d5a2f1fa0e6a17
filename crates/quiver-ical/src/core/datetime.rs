//! Date, time, duration and period value types (RFC 5545 §3.3).

use serde::Serialize;

/// A DATE value (RFC 5545 §3.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl Date {
    /// Formats as the xCal extended form `YYYY-MM-DD` (RFC 6321).
    #[must_use]
    pub fn to_xcal(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A TIME value (RFC 5545 §3.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub is_utc: bool,
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.is_utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

impl Time {
    /// Formats as the xCal extended form `HH:MM:SS[Z]` (RFC 6321).
    #[must_use]
    pub fn to_xcal(&self) -> String {
        let mut s = format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        if self.is_utc {
            s.push('Z');
        }
        s
    }
}

/// How a DATE-TIME is anchored (RFC 5545 §3.3.5 forms 1-3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DateTimeForm {
    /// Form 2: UTC time (trailing `Z`).
    Utc,
    /// Form 1: floating local time.
    Floating,
    /// Form 3: local time with a `TZID` reference.
    Zoned { tzid: String },
}

/// A DATE-TIME value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub form: DateTimeForm,
}

impl DateTime {
    /// Returns the TZID when this is a zoned date-time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            DateTimeForm::Utc | DateTimeForm::Floating => None,
        }
    }

    /// Returns the date portion.
    #[must_use]
    pub fn date(&self) -> Date {
        Date {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// ## Summary
    /// Resolves this date-time to a UTC instant. UTC forms resolve
    /// directly; zoned forms resolve through the IANA timezone database.
    /// Floating times and unknown TZIDs have no instant.
    #[must_use]
    pub fn to_instant(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        use chrono::TimeZone;

        match &self.form {
            DateTimeForm::Utc => chrono::Utc
                .with_ymd_and_hms(
                    i32::from(self.year),
                    u32::from(self.month),
                    u32::from(self.day),
                    u32::from(self.hour),
                    u32::from(self.minute),
                    u32::from(self.second),
                )
                .single(),
            DateTimeForm::Zoned { tzid } => {
                let tz: chrono_tz::Tz = tzid.parse().ok()?;
                tz.with_ymd_and_hms(
                    i32::from(self.year),
                    u32::from(self.month),
                    u32::from(self.day),
                    u32::from(self.hour),
                    u32::from(self.minute),
                    u32::from(self.second),
                )
                .single()
                .map(|dt| dt.with_timezone(&chrono::Utc))
            }
            DateTimeForm::Floating => None,
        }
    }

    /// Formats as the xCal extended form `YYYY-MM-DDTHH:MM:SS[Z]` (RFC 6321).
    #[must_use]
    pub fn to_xcal(&self) -> String {
        let mut s = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        );
        if self.form == DateTimeForm::Utc {
            s.push('Z');
        }
        s
    }
}

impl std::fmt::Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.form == DateTimeForm::Utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// A UTC-OFFSET value (RFC 5545 §3.3.14), stored as signed seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    /// Creates an offset from signed seconds east of UTC.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    /// Returns the offset in signed seconds.
    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }
}

impl std::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.abs();
        let hours = abs / 3600;
        let minutes = (abs % 3600) / 60;
        let secs = abs % 60;
        write!(f, "{sign}{hours:02}{minutes:02}")?;
        if secs != 0 {
            write!(f, "{secs:02}")?;
        }
        Ok(())
    }
}

impl UtcOffset {
    /// Formats as the xCal extended form `±HH:MM[:SS]` (RFC 6321).
    #[must_use]
    pub fn to_xcal(self) -> String {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.abs();
        let mut s = format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60);
        if abs % 60 != 0 {
            s.push_str(&format!(":{:02}", abs % 60));
        }
        s
    }
}

/// A DURATION value (RFC 5545 §3.3.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Duration {
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    /// The zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Returns the total signed length in seconds.
    #[must_use]
    pub fn total_seconds(&self) -> i64 {
        let magnitude = i64::from(self.weeks) * 7 * 86_400
            + i64::from(self.days) * 86_400
            + i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);
        if self.negative { -magnitude } else { magnitude }
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
        {
            return write!(f, "{}W", self.weeks);
        }

        let days = self.days + self.weeks * 7;
        if days > 0 {
            write!(f, "{days}D")?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if days == 0 {
            // P alone is not valid; emit an explicit zero time
            write!(f, "T0S")?;
        } else {
            // Date-only duration
        }
        Ok(())
    }
}

/// How a PERIOD ends: explicit end or duration (RFC 5545 §3.3.9).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum PeriodEnd {
    End(DateTime),
    Duration(Duration),
}

/// A PERIOD value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    pub start: DateTime,
    pub end: PeriodEnd,
}

impl Period {
    /// Returns the start date-time.
    #[must_use]
    pub fn start(&self) -> &DateTime {
        &self.start
    }

    /// ## Summary
    /// Resolves the end of the period to a UTC instant when the start is
    /// anchored; duration ends are added to the start instant.
    #[must_use]
    pub fn end_instant(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        match &self.end {
            PeriodEnd::End(dt) => dt.to_instant(),
            PeriodEnd::Duration(d) => {
                let start = self.start.to_instant()?;
                Some(start + chrono::Duration::seconds(d.total_seconds()))
            }
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.end {
            PeriodEnd::End(dt) => write!(f, "{}/{}", self.start, dt),
            PeriodEnd::Duration(d) => write!(f, "{}/{}", self.start, d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display() {
        let d = Date {
            year: 2026,
            month: 1,
            day: 5,
        };
        assert_eq!(d.to_string(), "20260105");
        assert_eq!(d.to_xcal(), "2026-01-05");
    }

    #[test]
    fn datetime_utc_display() {
        let dt = DateTime {
            year: 2026,
            month: 3,
            day: 15,
            hour: 9,
            minute: 30,
            second: 0,
            form: DateTimeForm::Utc,
        };
        assert_eq!(dt.to_string(), "20260315T093000Z");
        assert_eq!(dt.to_xcal(), "2026-03-15T09:30:00Z");
    }

    #[test]
    fn datetime_instants_cross_zones() {
        let utc = DateTime {
            year: 2026,
            month: 3,
            day: 15,
            hour: 14,
            minute: 0,
            second: 0,
            form: DateTimeForm::Utc,
        };
        let zoned = DateTime {
            year: 2026,
            month: 3,
            day: 15,
            hour: 10,
            minute: 0,
            second: 0,
            form: DateTimeForm::Zoned {
                tzid: "America/New_York".to_string(),
            },
        };
        assert_eq!(utc.to_instant(), zoned.to_instant());
    }

    #[test]
    fn floating_has_no_instant() {
        let dt = DateTime {
            year: 2026,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            form: DateTimeForm::Floating,
        };
        assert_eq!(dt.to_instant(), None);
    }

    #[test]
    fn utc_offset_display() {
        assert_eq!(UtcOffset::from_seconds(19800).to_string(), "+0530");
        assert_eq!(UtcOffset::from_seconds(-28800).to_string(), "-0800");
        assert_eq!(UtcOffset::from_seconds(3630).to_string(), "+010030");
        assert_eq!(UtcOffset::from_seconds(-28800).to_xcal(), "-08:00");
    }

    #[test]
    fn duration_display() {
        let week = Duration {
            weeks: 2,
            ..Duration::zero()
        };
        assert_eq!(week.to_string(), "P2W");

        let mixed = Duration {
            days: 1,
            hours: 2,
            minutes: 30,
            ..Duration::zero()
        };
        assert_eq!(mixed.to_string(), "P1DT2H30M");

        let negative = Duration {
            negative: true,
            minutes: 15,
            ..Duration::zero()
        };
        assert_eq!(negative.to_string(), "-PT15M");
        assert_eq!(negative.total_seconds(), -900);

        assert_eq!(Duration::zero().to_string(), "PT0S");
    }
}
