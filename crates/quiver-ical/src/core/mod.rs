//! iCalendar core models (RFC 5545).
//!
//! The model keeps both the parsed value and the original raw string for
//! every property, so documents round-trip and the diff engine can fall
//! back to raw comparison for unknown extensions.

mod component;
mod datetime;
mod parameter;
mod property;
mod recur;
mod value;

pub use component::{Component, ComponentKey, ComponentKind, ICalendar};
pub use datetime::{Date, DateTime, DateTimeForm, Duration, Period, PeriodEnd, Time, UtcOffset};
pub use parameter::Parameter;
pub use property::Property;
pub use recur::{Frequency, Recur, RecurUntil, Weekday, WeekdayNum};
pub use value::Value;
