//! iCalendar properties (RFC 5545 §3.8).

use serde::Serialize;

use super::parameter::Parameter;
use super::value::Value;

/// A parsed iCalendar property.
///
/// Carries the typed value and the original raw value string, so the
/// serializer can round-trip exactly what was parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Typed value.
    pub value: Value,
    /// Original raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl Property {
    /// Creates a property from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: Vec<Parameter>,
        value: Value,
        raw_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params,
            value,
            raw_value: raw_value.into(),
        }
    }

    /// Creates a text property. The raw value is escaped per RFC 5545
    /// §3.3.11, so the property serializes as a valid content line.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let raw = crate::build::escape_text(&value);
        Self::new(name, Vec::new(), Value::Text(value), raw)
    }

    /// Creates an integer property.
    #[must_use]
    pub fn integer(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, Vec::new(), Value::Integer(value), value.to_string())
    }

    /// Creates a date-time property.
    #[must_use]
    pub fn datetime(name: impl Into<String>, dt: super::DateTime) -> Self {
        let raw = dt.to_string();
        let params = match dt.tzid() {
            Some(tzid) => vec![Parameter::tzid(tzid)],
            None => Vec::new(),
        };
        Self::new(name, params, Value::DateTime(dt), raw)
    }

    /// Creates a date property (with a `VALUE=DATE` parameter).
    #[must_use]
    pub fn date(name: impl Into<String>, d: super::Date) -> Self {
        let raw = d.to_string();
        Self::new(
            name,
            vec![Parameter::value_type("DATE")],
            Value::Date(d),
            raw,
        )
    }

    /// Creates a duration property.
    #[must_use]
    pub fn duration(name: impl Into<String>, d: super::Duration) -> Self {
        let raw = d.to_string();
        Self::new(name, Vec::new(), Value::Duration(d), raw)
    }

    /// Creates a cal-address property (ATTENDEE, ORGANIZER).
    #[must_use]
    pub fn cal_address(name: impl Into<String>, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self::new(name, Vec::new(), Value::CalAddress(uri.clone()), uri)
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param_value("TZID")
    }

    /// Adds a parameter.
    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Sets a parameter, replacing any existing parameter with that name.
    pub fn set_param(&mut self, param: Parameter) {
        self.params.retain(|p| p.name != param.name);
        self.params.push(param);
    }

    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Returns the value as an integer if applicable.
    #[must_use]
    pub fn as_integer(&self) -> Option<i32> {
        self.value.as_integer()
    }

    /// Returns the value as a date-time if applicable.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&super::DateTime> {
        self.value.as_datetime()
    }
}

/// Common property names as constants.
pub mod names {
    pub const ACTION: &str = "ACTION";
    pub const ATTACH: &str = "ATTACH";
    pub const ATTENDEE: &str = "ATTENDEE";
    pub const CALSCALE: &str = "CALSCALE";
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const CLASS: &str = "CLASS";
    pub const COMMENT: &str = "COMMENT";
    pub const COMPLETED: &str = "COMPLETED";
    pub const CONTACT: &str = "CONTACT";
    pub const CREATED: &str = "CREATED";
    pub const DESCRIPTION: &str = "DESCRIPTION";
    pub const DTEND: &str = "DTEND";
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const DTSTART: &str = "DTSTART";
    pub const DUE: &str = "DUE";
    pub const DURATION: &str = "DURATION";
    pub const EXDATE: &str = "EXDATE";
    pub const FREEBUSY: &str = "FREEBUSY";
    pub const GEO: &str = "GEO";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const LOCATION: &str = "LOCATION";
    pub const METHOD: &str = "METHOD";
    pub const ORGANIZER: &str = "ORGANIZER";
    pub const PERCENT_COMPLETE: &str = "PERCENT-COMPLETE";
    pub const PRIORITY: &str = "PRIORITY";
    pub const PRODID: &str = "PRODID";
    pub const RDATE: &str = "RDATE";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const RELATED_TO: &str = "RELATED-TO";
    pub const REPEAT: &str = "REPEAT";
    pub const RESOURCES: &str = "RESOURCES";
    pub const RRULE: &str = "RRULE";
    pub const SEQUENCE: &str = "SEQUENCE";
    pub const STATUS: &str = "STATUS";
    pub const SUMMARY: &str = "SUMMARY";
    pub const TRANSP: &str = "TRANSP";
    pub const TRIGGER: &str = "TRIGGER";
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
    pub const TZURL: &str = "TZURL";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";
    pub const VERSION: &str = "VERSION";
}
