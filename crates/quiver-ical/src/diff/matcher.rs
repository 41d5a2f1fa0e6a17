//! Value equivalence for the diff engine.
//!
//! Two values may differ textually but mean the same thing: a zoned
//! local time and the equivalent UTC time, a recurrence rule with its
//! parts reordered, a float with trailing zeros. Matching normalizes
//! per value type before comparing.

use crate::core::{DateTime, Period, Recur, Value};

const FLOAT_EPSILON: f64 = 1e-9;

/// ## Summary
/// Compares two property values for semantic equality. Values of
/// different types never match except through their instant forms
/// (a zoned date-time can equal a UTC date-time at the same instant).
/// List values compare order-insensitively.
#[must_use]
pub fn values_match(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Text(x), Value::Text(y)) => x == y,
        (Value::Uri(x), Value::Uri(y)) | (Value::Unknown(x), Value::Unknown(y)) => x == y,
        (Value::CalAddress(x), Value::CalAddress(y)) => cal_addresses_match(x, y),
        (Value::Binary(x), Value::Binary(y)) => x == y,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Integer(x), Value::Integer(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => (x - y).abs() < FLOAT_EPSILON,
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Time(x), Value::Time(y)) => x == y,
        (Value::DateTime(x), Value::DateTime(y)) => datetimes_match(x, y),
        (Value::Duration(x), Value::Duration(y)) => x.total_seconds() == y.total_seconds(),
        (Value::UtcOffset(x), Value::UtcOffset(y)) => x == y,
        (Value::Period(x), Value::Period(y)) => periods_match(x, y),
        (Value::Recur(x), Value::Recur(y)) => recurs_match(x, y),
        (Value::DateList(x), Value::DateList(y)) => unordered_match(x, y, |a, b| a == b),
        (Value::DateTimeList(x), Value::DateTimeList(y)) => {
            unordered_match(x, y, datetimes_match)
        }
        (Value::PeriodList(x), Value::PeriodList(y)) => unordered_match(x, y, periods_match),
        _ => false,
    }
}

/// Date-times match when they resolve to the same instant; floating
/// times have no instant and compare field-wise.
fn datetimes_match(a: &DateTime, b: &DateTime) -> bool {
    match (a.to_instant(), b.to_instant()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn periods_match(a: &Period, b: &Period) -> bool {
    datetimes_match(&a.start, &b.start)
        && match (a.end_instant(), b.end_instant()) {
            (Some(x), Some(y)) => x == y,
            _ => a.end == b.end,
        }
}

/// Recur rules are already structural; field equality ignores the
/// original part order.
fn recurs_match(a: &Recur, b: &Recur) -> bool {
    a == b
}

/// The mailto: scheme is case-insensitive; the address part is not
/// (local parts may be case-sensitive per RFC 5321).
fn cal_addresses_match(a: &str, b: &str) -> bool {
    match (a.split_once(':'), b.split_once(':')) {
        (Some((scheme_a, rest_a)), Some((scheme_b, rest_b))) => {
            scheme_a.eq_ignore_ascii_case(scheme_b) && rest_a == rest_b
        }
        _ => a == b,
    }
}

fn unordered_match<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|item| {
        b.iter().enumerate().any(|(i, candidate)| {
            if !used[i] && eq(item, candidate) {
                used[i] = true;
                true
            } else {
                false
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::values::{parse_datetime, parse_recur};

    fn dt(s: &str, tzid: Option<&str>) -> Value {
        Value::DateTime(parse_datetime(s, tzid, 1, 1).unwrap())
    }

    #[test]
    fn zoned_and_utc_match_on_instant() {
        let ny = dt("20260315T100000", Some("America/New_York"));
        let utc = dt("20260315T140000Z", None);
        assert!(values_match(&ny, &utc));

        let off = dt("20260315T150000Z", None);
        assert!(!values_match(&ny, &off));
    }

    #[test]
    fn floating_compares_fieldwise() {
        let a = dt("20260315T100000", None);
        let b = dt("20260315T100000", None);
        let c = dt("20260315T110000", None);
        assert!(values_match(&a, &b));
        assert!(!values_match(&a, &c));
    }

    #[test]
    fn recur_order_insensitive() {
        let a = Value::Recur(Box::new(parse_recur("FREQ=WEEKLY;BYDAY=MO,FR", 1, 1).unwrap()));
        let b = Value::Recur(Box::new(parse_recur("BYDAY=MO,FR;FREQ=WEEKLY", 1, 1).unwrap()));
        assert!(values_match(&a, &b));
    }

    #[test]
    fn float_epsilon() {
        assert!(values_match(&Value::Float(1.0), &Value::Float(1.0 + 1e-12)));
        assert!(!values_match(&Value::Float(1.0), &Value::Float(1.1)));
    }

    #[test]
    fn cal_address_scheme_case() {
        let a = Value::CalAddress("MAILTO:jane@example.com".into());
        let b = Value::CalAddress("mailto:jane@example.com".into());
        assert!(values_match(&a, &b));

        let c = Value::CalAddress("mailto:Jane@example.com".into());
        assert!(!values_match(&b, &c));
    }

    #[test]
    fn datetime_list_order_insensitive() {
        let a = Value::DateTimeList(vec![
            parse_datetime("20260101T000000Z", None, 1, 1).unwrap(),
            parse_datetime("20260102T000000Z", None, 1, 1).unwrap(),
        ]);
        let b = Value::DateTimeList(vec![
            parse_datetime("20260102T000000Z", None, 1, 1).unwrap(),
            parse_datetime("20260101T000000Z", None, 1, 1).unwrap(),
        ]);
        assert!(values_match(&a, &b));
    }

    #[test]
    fn different_types_do_not_match() {
        assert!(!values_match(
            &Value::Text("20260101".into()),
            &Value::Uri("20260101".into())
        ));
    }
}
