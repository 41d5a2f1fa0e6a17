//! iCalendar document parser (RFC 5545).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, parse_content_line, split_lines};
use super::values::{
    parse_binary, parse_boolean, parse_date, parse_datetime, parse_duration, parse_float,
    parse_integer, parse_period, parse_recur, parse_time, parse_utc_offset, split_value_list,
    unescape_text,
};
use crate::core::{Component, ComponentKind, ICalendar, Property, Value};

/// Parses an iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not a well-formed VCALENDAR.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let lines = split_lines(input);
    if lines.is_empty() {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    tracing::debug!(lines = lines.len(), "parsing calendar stream");

    let mut iter = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)));

    let (line_num, begin) = iter
        .next()
        .transpose()?
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))?;
    if begin.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1));
    }

    let root_name = begin.raw_value.trim().to_ascii_uppercase();
    if root_name != "VCALENDAR" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context(format!("expected VCALENDAR, got {root_name}")));
    }

    let root = parse_component(&mut iter, &root_name, line_num)?;

    if let Some(extra) = iter.next().transpose()? {
        tracing::warn!(line = extra.0, "content after END:VCALENDAR ignored");
    }

    Ok(ICalendar { root })
}

/// Parses one component body given its already-consumed BEGIN line,
/// recursing into nested components.
fn parse_component(
    iter: &mut impl Iterator<Item = ParseResult<(usize, ContentLine)>>,
    name: &str,
    begin_line: usize,
) -> ParseResult<Component> {
    let mut component = Component::custom(name);

    loop {
        let Some((line_num, cl)) = iter.next().transpose()? else {
            return Err(ParseError::new(ParseErrorKind::MissingEnd, begin_line, 1)
                .with_context(format!("missing END:{name}")));
        };

        match cl.name.as_str() {
            "BEGIN" => {
                let nested_name = cl.raw_value.trim().to_ascii_uppercase();
                component
                    .children
                    .push(parse_component(iter, &nested_name, line_num)?);
            }
            "END" => {
                let end_name = cl.raw_value.trim().to_ascii_uppercase();
                if end_name != name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!("expected END:{name}, got END:{end_name}")),
                    );
                }
                return Ok(component);
            }
            _ => component.properties.push(parse_property(cl, line_num)?),
        }
    }
}

/// Resolves the value type and parses the raw value of one content line.
fn parse_property(cl: ContentLine, line_num: usize) -> ParseResult<Property> {
    let value_type = resolve_value_type(&cl);
    let tzid = cl
        .params
        .iter()
        .find(|p| p.name == "TZID")
        .and_then(|p| p.value().map(str::to_owned));

    let value = parse_value(&cl.raw_value, value_type, tzid.as_deref(), line_num)?;

    Ok(Property {
        name: cl.name,
        params: cl.params,
        value,
        raw_value: cl.raw_value,
    })
}

/// ## Summary
/// Determines the value type of a property: an explicit `VALUE` parameter
/// wins; otherwise the RFC 5545 per-property default applies, with a
/// shape check for the properties that allow several types (EXDATE,
/// RDATE, TRIGGER).
fn resolve_value_type(cl: &ContentLine) -> ValueType {
    if let Some(explicit) = cl
        .params
        .iter()
        .find(|p| p.name == "VALUE")
        .and_then(|p| p.value())
    {
        return ValueType::from_param(explicit);
    }

    match cl.name.as_str() {
        "DTSTART" | "DTEND" | "DTSTAMP" | "DUE" | "COMPLETED" | "CREATED" | "LAST-MODIFIED"
        | "RECURRENCE-ID" => ValueType::DateTime,

        "EXDATE" | "RDATE" => {
            let first = cl.raw_value.split(',').next().unwrap_or("");
            if first.contains('/') {
                ValueType::Period
            } else if first.len() == 8 && !first.contains('T') {
                ValueType::Date
            } else {
                ValueType::DateTime
            }
        }

        "DURATION" => ValueType::Duration,
        "TRIGGER" => {
            if cl.raw_value.starts_with(['P', '-', '+']) {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }

        "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => ValueType::Integer,
        "RRULE" | "EXRULE" => ValueType::Recur,
        "TZOFFSETFROM" | "TZOFFSETTO" => ValueType::UtcOffset,
        "URL" | "TZURL" | "SOURCE" | "ATTACH" => ValueType::Uri,
        "ATTENDEE" | "ORGANIZER" => ValueType::CalAddress,
        "FREEBUSY" => ValueType::Period,

        _ => ValueType::Text,
    }
}

/// Resolved value type for a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    Unknown,
}

impl ValueType {
    fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Unknown,
        }
    }
}

fn parse_value(
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line: usize,
) -> ParseResult<Value> {
    match value_type {
        ValueType::Text => Ok(Value::Text(unescape_text(raw))),
        ValueType::Uri => Ok(Value::Uri(raw.to_string())),
        ValueType::CalAddress => Ok(Value::CalAddress(raw.to_string())),
        ValueType::Date => {
            let dates = split_value_list(raw)
                .into_iter()
                .map(|s| parse_date(s.trim(), line, 1))
                .collect::<ParseResult<Vec<_>>>()?;
            match <[_; 1]>::try_from(dates) {
                Ok([single]) => Ok(Value::Date(single)),
                Err(list) => Ok(Value::DateList(list)),
            }
        }
        ValueType::DateTime => {
            let dts = split_value_list(raw)
                .into_iter()
                .map(|s| parse_datetime(s.trim(), tzid, line, 1))
                .collect::<ParseResult<Vec<_>>>()?;
            match <[_; 1]>::try_from(dts) {
                Ok([single]) => Ok(Value::DateTime(single)),
                Err(list) => Ok(Value::DateTimeList(list)),
            }
        }
        ValueType::Period => {
            let periods = split_value_list(raw)
                .into_iter()
                .map(|s| parse_period(s.trim(), tzid, line, 1))
                .collect::<ParseResult<Vec<_>>>()?;
            match <[_; 1]>::try_from(periods) {
                Ok([single]) => Ok(Value::Period(single)),
                Err(list) => Ok(Value::PeriodList(list)),
            }
        }
        ValueType::Time => Ok(Value::Time(parse_time(raw, line, 1)?)),
        ValueType::Duration => Ok(Value::Duration(parse_duration(raw, line, 1)?)),
        ValueType::Integer => Ok(Value::Integer(parse_integer(raw, line, 1)?)),
        ValueType::Float => Ok(Value::Float(parse_float(raw, line, 1)?)),
        ValueType::Boolean => Ok(Value::Boolean(parse_boolean(raw, line, 1)?)),
        ValueType::Recur => Ok(Value::Recur(Box::new(parse_recur(raw, line, 1)?))),
        ValueType::UtcOffset => Ok(Value::UtcOffset(parse_utc_offset(raw, line, 1)?)),
        ValueType::Binary => Ok(Value::Binary(parse_binary(raw, line, 1)?)),
        ValueType::Unknown => Ok(Value::Unknown(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Frequency;

    const SIMPLE_VEVENT: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VEVENT\r\n\
UID:test-uid-123@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART:20260123T140000Z\r\n\
DTEND:20260123T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    #[test_log::test]
    fn simple_vevent() {
        let ical = parse(SIMPLE_VEVENT).unwrap();
        assert_eq!(ical.version(), Some("2.0"));
        assert_eq!(ical.prodid(), Some("-//Test//Test//EN"));

        let events = ical.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid(), Some("test-uid-123@example.com"));
        assert_eq!(events[0].summary(), Some("Test Event"));
    }

    #[test]
    fn zoned_dtstart() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:tz@example.com\r\n\
DTSTART;TZID=America/New_York:20260123T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let dt = ical.events()[0]
            .get_property("DTSTART")
            .unwrap()
            .as_datetime()
            .unwrap()
            .clone();
        assert_eq!(dt.tzid(), Some("America/New_York"));
        assert_eq!(dt.hour, 9);
    }

    #[test]
    fn rrule_value() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:recurring@example.com\r\n\
DTSTART:20260123T090000Z\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let rule = ical.events()[0]
            .get_property("RRULE")
            .unwrap()
            .value
            .as_recur()
            .unwrap()
            .clone();
        assert_eq!(rule.freq, Some(Frequency::Weekly));
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.by_day.len(), 3);
    }

    #[test_log::test]
    fn nested_valarm() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:alarm@example.com\r\n\
DTSTART:20260123T090000Z\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-PT15M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let alarms = ical.events()[0].alarms();
        assert_eq!(alarms.len(), 1);
        assert_eq!(
            alarms[0].get_property("ACTION").unwrap().as_text(),
            Some("DISPLAY")
        );
        let trigger = alarms[0].get_property("TRIGGER").unwrap();
        assert_eq!(trigger.value.as_duration().unwrap().minutes, 15);
    }

    #[test]
    fn escaped_text() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:escaped@example.com\r\n\
SUMMARY:Meeting\\, important\r\n\
DESCRIPTION:Line 1\\nLine 2\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let event = &ical.events()[0];
        assert_eq!(event.summary(), Some("Meeting, important"));
        assert_eq!(
            event.get_property("DESCRIPTION").unwrap().as_text(),
            Some("Line 1\nLine 2")
        );
    }

    #[test]
    fn folded_summary() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:folded@example.com\r\n\
SUMMARY:A long summary folded acro\r\n\
\x20ss physical lines\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        assert_eq!(
            ical.events()[0].summary(),
            Some("A long summary folded across physical lines")
        );
    }

    #[test]
    fn missing_begin() {
        assert!(parse("VERSION:2.0\r\n").is_err());
    }

    #[test]
    fn mismatched_end() {
        let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VEVENT\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
    }

    #[test]
    fn unterminated_component() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:x@y\r\nEND:VEVENT\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    }

    #[test]
    fn x_properties_preserved() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:xprop@example.com\r\n\
X-CUSTOM-PROP:Custom Value\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let prop = ical.events()[0].get_property("X-CUSTOM-PROP").unwrap();
        assert_eq!(prop.raw_value, "Custom Value");
    }

    #[test]
    fn exdate_datetime_list() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:exdate@example.com\r\n\
EXDATE:20260125T090000Z,20260127T090000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let list = ical.events()[0]
            .get_property("EXDATE")
            .unwrap()
            .value
            .as_datetime_list()
            .unwrap()
            .to_vec();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].day, 25);
        assert_eq!(list[1].day, 27);
    }

    #[test]
    fn rdate_date_list() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:rdate@example.com\r\n\
RDATE;VALUE=DATE:20260125,20260127,20260130\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let list = ical.events()[0]
            .get_property("RDATE")
            .unwrap()
            .value
            .as_date_list()
            .unwrap()
            .to_vec();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2].day, 30);
    }

    #[test]
    fn freebusy_period_list() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VFREEBUSY\r\n\
UID:fb@example.com\r\n\
FREEBUSY:20260123T090000Z/20260123T100000Z,20260123T140000Z/PT2H\r\n\
END:VFREEBUSY\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        let list = ical.freebusy()[0]
            .get_property("FREEBUSY")
            .unwrap()
            .value
            .as_period_list()
            .unwrap()
            .to_vec();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].start().hour, 9);
        assert_eq!(list[1].start().hour, 14);
    }

    #[test]
    fn binary_attach() {
        let input = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:bin@example.com\r\n\
ATTACH;ENCODING=BASE64;VALUE=BINARY:SGVsbG8gV29ybGQ=\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let ical = parse(input).unwrap();
        match &ical.events()[0].get_property("ATTACH").unwrap().value {
            Value::Binary(data) => assert_eq!(data, b"Hello World"),
            other => panic!("expected Binary, got {other:?}"),
        }
    }
}
