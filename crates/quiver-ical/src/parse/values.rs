//! Value type parsers (RFC 5545 §3.3).

use base64::Engine;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, Period, PeriodEnd, Recur, RecurUntil, Time,
    UtcOffset, Weekday, WeekdayNum,
};

fn digits<T: std::str::FromStr>(
    s: &str,
    kind: ParseErrorKind,
    line: usize,
    col: usize,
) -> ParseResult<T> {
    s.parse::<T>()
        .map_err(|_| ParseError::new(kind, line, col))
}

/// Parses a DATE value, `YYYYMMDD`.
///
/// ## Errors
/// Returns an error unless the string is exactly eight digits forming a
/// plausible calendar date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    let year = digits(&s[0..4], ParseErrorKind::InvalidDate, line, col)?;
    let month: u8 = digits(&s[4..6], ParseErrorKind::InvalidDate, line, col)?;
    let day: u8 = digits(&s[6..8], ParseErrorKind::InvalidDate, line, col)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value, `HHMMSS[Z]`.
///
/// ## Errors
/// Returns an error unless the string is six digits plus an optional `Z`.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let (body, is_utc) = match s.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if body.len() != 6 || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    let hour: u8 = digits(&body[0..2], ParseErrorKind::InvalidTime, line, col)?;
    let minute: u8 = digits(&body[2..4], ParseErrorKind::InvalidTime, line, col)?;
    let second: u8 = digits(&body[4..6], ParseErrorKind::InvalidTime, line, col)?;

    // second 60 allowed for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    Ok(Time {
        hour,
        minute,
        second,
        is_utc,
    })
}

/// Parses a DATE-TIME value, `YYYYMMDD"T"HHMMSS[Z]`.
///
/// The TZID comes from the property parameter, not the value: a trailing
/// `Z` wins, then the TZID, then floating.
///
/// ## Errors
/// Returns an error if either half is malformed or the `T` is missing.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let (date_str, time_str) = s
        .split_once('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(date_str, line, col)?;
    let time = parse_time(time_str, line, col + date_str.len() + 1)?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Parses a UTC-OFFSET value, `(+|-)HHMM[SS]`.
///
/// ## Errors
/// Returns an error if the sign is missing or the digits are malformed.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let sign = match s.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col)),
    };

    let body = &s[1..];
    if body.len() != 4 && body.len() != 6 {
        return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col));
    }

    let hours: i32 = digits(&body[0..2], ParseErrorKind::InvalidUtcOffset, line, col)?;
    let minutes: i32 = digits(&body[2..4], ParseErrorKind::InvalidUtcOffset, line, col)?;
    let seconds: i32 = if body.len() == 6 {
        digits(&body[4..6], ParseErrorKind::InvalidUtcOffset, line, col)?
    } else {
        0
    };

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Parses a DURATION value, `[+|-]P[nW]` or `[+|-]P[nD][T[nH][nM][nS]]`.
///
/// ## Errors
/// Returns an error on a missing `P`, out-of-order designators, or a
/// designator with no preceding number.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let mut dur = Duration::zero();
    let mut rest = s;
    if let Some(stripped) = rest.strip_prefix('-') {
        dur.negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    rest = rest.strip_prefix('P').ok_or_else(err)?;
    if rest.is_empty() {
        return Err(err());
    }

    let mut in_time = false;
    let mut number = String::new();
    for c in rest.chars() {
        match c {
            '0'..='9' => number.push(c),
            'T' if number.is_empty() && !in_time => in_time = true,
            'W' | 'D' | 'H' | 'M' | 'S' => {
                let n: u32 = number.parse().map_err(|_| err())?;
                number.clear();
                match c {
                    'W' if !in_time => dur.weeks = n,
                    'D' if !in_time => dur.days = n,
                    'H' if in_time => dur.hours = n,
                    'M' if in_time => dur.minutes = n,
                    'S' if in_time => dur.seconds = n,
                    _ => return Err(err()),
                }
            }
            _ => return Err(err()),
        }
    }

    if !number.is_empty() {
        // trailing digits with no designator
        return Err(err());
    }

    Ok(dur)
}

/// Parses a PERIOD value, `start "/" (end | duration)`.
///
/// ## Errors
/// Returns an error if the slash is missing or either side is malformed.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let (start_str, end_str) = s
        .split_once('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;

    let start = parse_datetime(start_str, tzid, line, col)?;
    let end_col = col + start_str.len() + 1;

    let end = if end_str.starts_with(['P', '+', '-']) {
        PeriodEnd::Duration(parse_duration(end_str, line, end_col)?)
    } else {
        PeriodEnd::End(parse_datetime(end_str, tzid, line, end_col)?)
    };

    Ok(Period { start, end })
}

/// Parses a RECUR value (RFC 5545 §3.3.10).
///
/// Unknown rule parts are ignored; repeated parts keep the last value.
///
/// ## Errors
/// Returns an error on a part with no `=`, an unknown FREQ or weekday,
/// or a malformed number list.
pub fn parse_recur(s: &str, line: usize, col: usize) -> ParseResult<Recur> {
    let err = || ParseError::new(ParseErrorKind::InvalidRecur, line, col);
    let mut recur = Recur::default();

    for part in s.split(';') {
        let (key, value) = part.split_once('=').ok_or_else(err)?;
        match key.to_ascii_uppercase().as_str() {
            "FREQ" => {
                recur.freq = Some(
                    Frequency::parse(value)
                        .ok_or_else(|| err().with_context(format!("unknown FREQ {value}")))?,
                );
            }
            "UNTIL" => {
                recur.until = Some(if value.contains('T') {
                    RecurUntil::DateTime(parse_datetime(value, None, line, col)?)
                } else {
                    RecurUntil::Date(parse_date(value, line, col)?)
                });
            }
            "COUNT" => recur.count = Some(digits(value, ParseErrorKind::InvalidRecur, line, col)?),
            "INTERVAL" => {
                recur.interval = Some(digits(value, ParseErrorKind::InvalidRecur, line, col)?);
            }
            "BYSECOND" => recur.by_second = parse_num_list(value, line, col)?,
            "BYMINUTE" => recur.by_minute = parse_num_list(value, line, col)?,
            "BYHOUR" => recur.by_hour = parse_num_list(value, line, col)?,
            "BYDAY" => {
                recur.by_day = value
                    .split(',')
                    .map(|v| parse_weekday_num(v.trim(), line, col))
                    .collect::<ParseResult<_>>()?;
            }
            "BYMONTHDAY" => recur.by_month_day = parse_num_list(value, line, col)?,
            "BYYEARDAY" => recur.by_year_day = parse_num_list(value, line, col)?,
            "BYWEEKNO" => recur.by_week_no = parse_num_list(value, line, col)?,
            "BYMONTH" => recur.by_month = parse_num_list(value, line, col)?,
            "BYSETPOS" => recur.by_set_pos = parse_num_list(value, line, col)?,
            "WKST" => {
                recur.week_start = Some(
                    Weekday::parse(value)
                        .ok_or_else(|| err().with_context(format!("unknown WKST {value}")))?,
                );
            }
            _ => {}
        }
    }

    if recur.count.is_some() && recur.until.is_some() {
        return Err(err().with_context("COUNT and UNTIL are mutually exclusive"));
    }

    Ok(recur)
}

fn parse_num_list<T: std::str::FromStr>(
    s: &str,
    line: usize,
    col: usize,
) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| digits(v.trim(), ParseErrorKind::InvalidRecur, line, col))
        .collect()
}

/// Parses a BYDAY entry: a weekday token with an optional signed ordinal
/// (`MO`, `2MO`, `-1FR`).
fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    let err = || ParseError::new(ParseErrorKind::InvalidRecur, line, col);

    if s.len() < 2 {
        return Err(err());
    }
    let (ordinal_str, weekday_str) = s.split_at(s.len() - 2);

    let weekday = Weekday::parse(weekday_str).ok_or_else(err)?;
    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        Some(ordinal_str.parse().map_err(|_| err())?)
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Parses a BOOLEAN value, `TRUE` or `FALSE` (case-insensitive).
///
/// ## Errors
/// Returns an error for any other token.
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidValue, line, col)),
    }
}

/// Parses an INTEGER value.
///
/// ## Errors
/// Returns an error if the string is not a valid signed integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i32> {
    let s = s.strip_prefix('+').unwrap_or(s);
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidValue, line, col))
}

/// Parses a FLOAT value.
///
/// ## Errors
/// Returns an error if the string is not a valid floating-point number.
pub fn parse_float(s: &str, line: usize, col: usize) -> ParseResult<f64> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidValue, line, col))
}

/// Decodes a BINARY value from standard Base64.
///
/// ## Errors
/// Returns an error if the string is not valid Base64.
pub fn parse_binary(s: &str, line: usize, col: usize) -> ParseResult<Vec<u8>> {
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|e| {
            ParseError::new(ParseErrorKind::InvalidValue, line, col).with_context(e.to_string())
        })
}

/// Unescapes a TEXT value (RFC 5545 §3.3.11).
///
/// Sequences: `\\` `\,` `\;` `\n` `\N`. Invalid escapes are preserved.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// ## Summary
/// Splits a multi-valued raw value on unescaped commas, keeping escaped
/// commas (`\,`) inside values.
#[must_use]
pub fn split_value_list(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ',' {
            parts.push(&s[start..i]);
            start = i + 1;
        }
    }
    parts.push(&s[start..]);

    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_basic() {
        let d = parse_date("20260123", 1, 1).unwrap();
        assert_eq!((d.year, d.month, d.day), (2026, 1, 23));
    }

    #[test]
    fn date_invalid() {
        assert!(parse_date("2026012", 1, 1).is_err());
        assert!(parse_date("20261301", 1, 1).is_err());
        assert!(parse_date("2026012a", 1, 1).is_err());
    }

    #[test]
    fn time_utc_marker() {
        let t = parse_time("120000Z", 1, 1).unwrap();
        assert!(t.is_utc);
        let t = parse_time("133000", 1, 1).unwrap();
        assert!(!t.is_utc);
        assert_eq!(t.hour, 13);
    }

    #[test]
    fn datetime_forms() {
        let utc = parse_datetime("20260123T120000Z", None, 1, 1).unwrap();
        assert_eq!(utc.form, DateTimeForm::Utc);

        let floating = parse_datetime("20260123T120000", None, 1, 1).unwrap();
        assert_eq!(floating.form, DateTimeForm::Floating);

        let zoned = parse_datetime("20260123T120000", Some("Europe/Paris"), 1, 1).unwrap();
        assert_eq!(zoned.tzid(), Some("Europe/Paris"));
    }

    #[test]
    fn datetime_z_wins_over_tzid() {
        let dt = parse_datetime("20260123T120000Z", Some("Europe/Paris"), 1, 1).unwrap();
        assert_eq!(dt.form, DateTimeForm::Utc);
    }

    #[test]
    fn utc_offset_forms() {
        assert_eq!(parse_utc_offset("+0530", 1, 1).unwrap().seconds(), 19800);
        assert_eq!(parse_utc_offset("-0800", 1, 1).unwrap().seconds(), -28800);
        assert_eq!(parse_utc_offset("+010030", 1, 1).unwrap().seconds(), 3630);
        assert!(parse_utc_offset("0530", 1, 1).is_err());
    }

    #[test]
    fn duration_forms() {
        assert_eq!(parse_duration("P2W", 1, 1).unwrap().weeks, 2);

        let d = parse_duration("P1DT2H30M", 1, 1).unwrap();
        assert_eq!((d.days, d.hours, d.minutes), (1, 2, 30));

        let neg = parse_duration("-PT15M", 1, 1).unwrap();
        assert!(neg.negative);
        assert_eq!(neg.minutes, 15);

        assert!(parse_duration("X1D", 1, 1).is_err());
        assert!(parse_duration("P1D2", 1, 1).is_err());
        assert!(parse_duration("PT1W", 1, 1).is_err());
    }

    #[test]
    fn period_forms() {
        let explicit = parse_period("20260123T090000Z/20260123T170000Z", None, 1, 1).unwrap();
        assert!(matches!(explicit.end, PeriodEnd::End(_)));

        let by_duration = parse_period("20260123T090000Z/PT8H", None, 1, 1).unwrap();
        match by_duration.end {
            PeriodEnd::Duration(d) => assert_eq!(d.hours, 8),
            PeriodEnd::End(_) => panic!("expected duration end"),
        }
    }

    #[test]
    fn recur_basic() {
        let r = parse_recur("FREQ=WEEKLY;COUNT=10;BYDAY=MO,WE,FR", 1, 1).unwrap();
        assert_eq!(r.freq, Some(Frequency::Weekly));
        assert_eq!(r.count, Some(10));
        assert_eq!(r.by_day.len(), 3);
    }

    #[test]
    fn recur_negative_ordinal() {
        let r = parse_recur("FREQ=MONTHLY;BYDAY=-1FR", 1, 1).unwrap();
        assert_eq!(r.by_day[0].ordinal, Some(-1));
        assert_eq!(r.by_day[0].weekday, Weekday::Friday);
    }

    #[test]
    fn recur_count_until_conflict() {
        assert!(parse_recur("FREQ=DAILY;COUNT=10;UNTIL=20260131", 1, 1).is_err());
    }

    #[test]
    fn text_unescaping() {
        assert_eq!(unescape_text("hello\\, world"), "hello, world");
        assert_eq!(unescape_text("line1\\nline2"), "line1\nline2");
        assert_eq!(unescape_text("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn value_list_respects_escapes() {
        assert_eq!(split_value_list("a,b\\,c,d"), vec!["a", "b\\,c", "d"]);
        assert_eq!(split_value_list("single"), vec!["single"]);
    }

    #[test]
    fn binary_decodes_base64() {
        assert_eq!(parse_binary("aGVsbG8=", 1, 1).unwrap(), b"hello");
        assert!(parse_binary("not base64!!", 1, 1).is_err());
    }
}
