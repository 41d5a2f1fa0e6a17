//! xCal emission (RFC 6321).
//!
//! Renders a calendar tree as the XML representation: components nest
//! through `<properties>`/`<components>` groups, every property value is
//! wrapped in a typed value element, and dates/times use the extended
//! forms (`2026-01-23`, `09:30:00`).

use base64::Engine;
use quiver_xml::emit::XmlWriter;
use quiver_xml::tags::xcal;
use quiver_xml::XmlResult;

use crate::core::{Component, ICalendar, Period, PeriodEnd, Property, Recur, RecurUntil, Value};
use crate::error::IcalResult;

/// Renders a full calendar as an xCal document with an XML declaration.
///
/// ## Errors
/// Returns an error if document assembly fails.
pub fn to_xml(ical: &ICalendar) -> IcalResult<String> {
    let mut w = XmlWriter::new();
    w.declaration();
    w.open(&xcal::icalendar());
    write_component(&mut w, &ical.root)?;
    w.close()?;
    Ok(w.into_string()?)
}

/// Writes one component (element, properties group, components group)
/// into an open writer. Reused by delta rendering.
///
/// ## Errors
/// Returns an error if element nesting is violated.
pub fn write_component(w: &mut XmlWriter, component: &Component) -> XmlResult<()> {
    w.open(&xcal::element_for(&component.name));

    if !component.properties.is_empty() {
        w.open(&xcal::properties());
        for property in &component.properties {
            write_property(w, property)?;
        }
        w.close()?;
    }

    if !component.children.is_empty() {
        w.open(&xcal::components());
        for child in &component.children {
            write_component(w, child)?;
        }
        w.close()?;
    }

    w.close()
}

/// Writes one property: its element, a `<parameters>` block when any
/// parameter besides `VALUE` is present, and the typed value element(s).
///
/// ## Errors
/// Returns an error if element nesting is violated.
pub fn write_property(w: &mut XmlWriter, property: &Property) -> XmlResult<()> {
    w.open(&xcal::element_for(&property.name));

    // VALUE is implied by the value element and not carried over.
    let params: Vec<_> = property
        .params
        .iter()
        .filter(|p| p.name != "VALUE")
        .collect();
    if !params.is_empty() {
        w.open(&xcal::parameters());
        for param in params {
            w.open(&xcal::element_for(&param.name));
            for value in &param.values {
                w.text_element(&xcal::text(), value);
            }
            w.close()?;
        }
        w.close()?;
    }

    write_value(w, &property.value)?;
    w.close()
}

fn write_value(w: &mut XmlWriter, value: &Value) -> XmlResult<()> {
    match value {
        Value::Binary(data) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(data);
            w.text_element(&xcal::binary(), &encoded);
        }
        Value::Boolean(b) => w.text_element(&xcal::boolean(), if *b { "true" } else { "false" }),
        Value::CalAddress(uri) => w.text_element(&xcal::cal_address(), uri),
        Value::Date(d) => w.text_element(&xcal::date(), &d.to_xcal()),
        Value::DateList(dates) => {
            for d in dates {
                w.text_element(&xcal::date(), &d.to_xcal());
            }
        }
        Value::DateTime(dt) => w.text_element(&xcal::date_time(), &dt.to_xcal()),
        Value::DateTimeList(dts) => {
            for dt in dts {
                w.text_element(&xcal::date_time(), &dt.to_xcal());
            }
        }
        Value::Duration(d) => w.text_element(&xcal::duration(), &d.to_string()),
        Value::Float(f) => w.text_element(&xcal::float(), &f.to_string()),
        Value::Integer(i) => w.text_element(&xcal::integer(), &i.to_string()),
        Value::Period(p) => write_period(w, p)?,
        Value::PeriodList(periods) => {
            for p in periods {
                write_period(w, p)?;
            }
        }
        Value::Recur(rule) => write_recur(w, rule)?,
        Value::Text(s) => w.text_element(&xcal::text(), s),
        Value::Time(t) => w.text_element(&xcal::time(), &t.to_xcal()),
        Value::Uri(uri) => w.text_element(&xcal::uri(), uri),
        Value::UtcOffset(offset) => w.text_element(&xcal::utc_offset(), &offset.to_xcal()),
        Value::Unknown(s) => w.text_element(&xcal::unknown(), s),
    }
    Ok(())
}

fn write_period(w: &mut XmlWriter, period: &Period) -> XmlResult<()> {
    w.open(&xcal::period());
    w.text_element(&xcal::start(), &period.start.to_xcal());
    match &period.end {
        PeriodEnd::End(dt) => w.text_element(&xcal::end(), &dt.to_xcal()),
        PeriodEnd::Duration(d) => w.text_element(&xcal::duration(), &d.to_string()),
    }
    w.close()
}

fn write_recur(w: &mut XmlWriter, rule: &Recur) -> XmlResult<()> {
    fn each<T: std::fmt::Display>(
        w: &mut XmlWriter,
        tag: &quiver_xml::namespace::QName,
        items: &[T],
    ) {
        for item in items {
            w.text_element(tag, &item.to_string());
        }
    }

    w.open(&xcal::recur());
    if let Some(freq) = rule.freq {
        w.text_element(&xcal::freq(), freq.as_str());
    }
    if let Some(until) = &rule.until {
        let text = match until {
            RecurUntil::Date(d) => d.to_xcal(),
            RecurUntil::DateTime(dt) => dt.to_xcal(),
        };
        w.text_element(&xcal::until(), &text);
    }
    if let Some(count) = rule.count {
        w.text_element(&xcal::count(), &count.to_string());
    }
    if let Some(interval) = rule.interval {
        w.text_element(&xcal::interval(), &interval.to_string());
    }
    each(w, &xcal::bysecond(), &rule.by_second);
    each(w, &xcal::byminute(), &rule.by_minute);
    each(w, &xcal::byhour(), &rule.by_hour);
    each(w, &xcal::byday(), &rule.by_day);
    each(w, &xcal::bymonthday(), &rule.by_month_day);
    each(w, &xcal::byyearday(), &rule.by_year_day);
    each(w, &xcal::byweekno(), &rule.by_week_no);
    each(w, &xcal::bymonth(), &rule.by_month);
    each(w, &xcal::bysetpos(), &rule.by_set_pos);
    if let Some(wkst) = rule.week_start {
        w.text_element(&xcal::wkst(), wkst.as_str());
    }
    w.close()
}
