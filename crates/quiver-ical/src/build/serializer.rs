//! Document serialization (RFC 5545 §3.4).
//!
//! Serialization renders from `raw_value`, so a parsed document writes
//! back byte-for-byte apart from folding.

use super::escape::escape_param_value;
use super::fold::fold_line;
use crate::core::{Component, ICalendar, Property};

/// Serializes a full calendar to iCalendar text with CRLF line endings.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    let mut out = String::new();
    write_component(&mut out, &ical.root);
    out
}

/// Serializes a single component subtree.
#[must_use]
pub fn serialize_component(component: &Component) -> String {
    let mut out = String::new();
    write_component(&mut out, component);
    out
}

/// Serializes one property as a folded content line.
#[must_use]
pub fn serialize_property(property: &Property) -> String {
    let mut line = property.name.clone();
    for param in &property.params {
        line.push(';');
        line.push_str(&param.name);
        line.push('=');
        let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
        line.push_str(&values.join(","));
    }
    line.push(':');
    line.push_str(&property.raw_value);

    let mut folded = fold_line(&line);
    folded.push_str("\r\n");
    folded
}

fn write_component(out: &mut String, component: &Component) {
    out.push_str("BEGIN:");
    out.push_str(&component.name);
    out.push_str("\r\n");

    for property in &component.properties {
        out.push_str(&serialize_property(property));
    }
    for child in &component.children {
        write_component(out, child);
    }

    out.push_str("END:");
    out.push_str(&component.name);
    out.push_str("\r\n");
}
