//! Property value types (RFC 5545 §3.3).

use serde::Serialize;

use super::datetime::{Date, DateTime, Duration, Period, Time, UtcOffset};
use super::recur::Recur;

/// A typed iCalendar property value.
///
/// Every value type from RFC 5545 §3.3 is represented, plus list forms
/// for the multi-valued date/period properties (EXDATE, RDATE, FREEBUSY).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// BINARY (§3.3.1), decoded from Base64.
    Binary(Vec<u8>),
    /// BOOLEAN (§3.3.2).
    Boolean(bool),
    /// CAL-ADDRESS (§3.3.3).
    CalAddress(String),
    /// DATE (§3.3.4).
    Date(Date),
    /// Comma-separated DATE list.
    DateList(Vec<Date>),
    /// DATE-TIME (§3.3.5).
    DateTime(DateTime),
    /// Comma-separated DATE-TIME list.
    DateTimeList(Vec<DateTime>),
    /// DURATION (§3.3.6).
    Duration(Duration),
    /// FLOAT (§3.3.7).
    Float(f64),
    /// INTEGER (§3.3.8).
    Integer(i32),
    /// PERIOD (§3.3.9).
    Period(Period),
    /// Comma-separated PERIOD list.
    PeriodList(Vec<Period>),
    /// RECUR (§3.3.10).
    Recur(Box<Recur>),
    /// TEXT (§3.3.11), unescaped.
    Text(String),
    /// TIME (§3.3.12).
    Time(Time),
    /// URI (§3.3.13).
    Uri(String),
    /// UTC-OFFSET (§3.3.14).
    UtcOffset(UtcOffset),
    /// Unrecognized value, preserved verbatim.
    Unknown(String),
}

impl Value {
    /// Returns the xCal value element name for this value (RFC 6321 §3.6).
    #[must_use]
    pub const fn xcal_element(&self) -> &'static str {
        match self {
            Self::Binary(_) => "binary",
            Self::Boolean(_) => "boolean",
            Self::CalAddress(_) => "cal-address",
            Self::Date(_) | Self::DateList(_) => "date",
            Self::DateTime(_) | Self::DateTimeList(_) => "date-time",
            Self::Duration(_) => "duration",
            Self::Float(_) => "float",
            Self::Integer(_) => "integer",
            Self::Period(_) | Self::PeriodList(_) => "period",
            Self::Recur(_) => "recur",
            Self::Text(_) => "text",
            Self::Time(_) => "time",
            Self::Uri(_) => "uri",
            Self::UtcOffset(_) => "utc-offset",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Returns the value as text if it is a text or unknown value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an integer if applicable.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a date-time if applicable.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the value as a date if applicable.
    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a duration if applicable.
    #[must_use]
    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the value as a recurrence rule if applicable.
    #[must_use]
    pub fn as_recur(&self) -> Option<&Recur> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the date-time list if applicable.
    #[must_use]
    pub fn as_datetime_list(&self) -> Option<&[DateTime]> {
        match self {
            Self::DateTimeList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the date list if applicable.
    #[must_use]
    pub fn as_date_list(&self) -> Option<&[Date]> {
        match self {
            Self::DateList(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the period list if applicable.
    #[must_use]
    pub fn as_period_list(&self) -> Option<&[Period]> {
        match self {
            Self::PeriodList(list) => Some(list),
            _ => None,
        }
    }
}
