//! Structural diff between two calendar object trees.
//!
//! The diff walks both trees together: components pair up by key
//! (name, UID, RECURRENCE-ID), properties pair up by name and then by
//! matching value, parameters by name. Everything left unpaired becomes
//! an add or remove; paired items with differences become changes. The
//! result is a [`ComponentDelta`] tree.

mod matcher;
mod update;

use std::collections::HashSet;

pub use matcher::values_match;
pub use update::{ComponentDelta, ParameterUpdate, PropertyUpdate};

use crate::core::{Component, ICalendar, Property};

/// Properties excluded from deltas by default: server-maintained
/// bookkeeping that changes on every write without meaning a real edit.
const DEFAULT_IGNORED: [&str; 6] = [
    "DTSTAMP",
    "LAST-MODIFIED",
    "SEQUENCE",
    "PRODID",
    "CALSCALE",
    "VERSION",
];

/// Options controlling a diff run.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    ignored: HashSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignored: DEFAULT_IGNORED.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl DiffOptions {
    /// Options that ignore nothing: every property participates.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            ignored: HashSet::new(),
        }
    }

    /// Adds a property name to the ignored set.
    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored.insert(name.into().to_ascii_uppercase());
        self
    }

    /// Returns whether a property is excluded from the diff.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored.contains(name)
    }
}

/// Diffs two calendars, producing the delta for their root components.
#[must_use]
#[tracing::instrument(skip_all)]
pub fn diff(old: &ICalendar, new: &ICalendar, options: &DiffOptions) -> ComponentDelta {
    diff_components(&old.root, &new.root, options)
}

/// Diffs two components assumed to correspond (same key).
#[must_use]
pub fn diff_components(old: &Component, new: &Component, options: &DiffOptions) -> ComponentDelta {
    let mut delta = ComponentDelta::new(new.key());
    delta.property_updates = diff_properties(old, new, options);

    let (added, removed, updated) = diff_children(&old.children, &new.children, options);
    delta.added_components = added;
    delta.removed_components = removed;
    delta.updated_components = updated;

    delta
}

/// ## Summary
/// Pairs properties of two matched components. First pass pairs each old
/// property with an unused new property of the same name and matching
/// value, so reordered or duplicated identical properties produce no
/// delta. Second pass pairs leftovers by name as value changes. What
/// remains unpaired is an add or remove.
fn diff_properties(old: &Component, new: &Component, options: &DiffOptions) -> Vec<PropertyUpdate> {
    let old_props: Vec<&Property> = old
        .properties
        .iter()
        .filter(|p| !options.is_ignored(&p.name))
        .collect();
    let new_props: Vec<&Property> = new
        .properties
        .iter()
        .filter(|p| !options.is_ignored(&p.name))
        .collect();

    let mut new_used = vec![false; new_props.len()];
    let mut updates = Vec::new();
    let mut old_unmatched: Vec<&Property> = Vec::new();

    for prop in &old_props {
        let found = (0..new_props.len()).find(|&j| {
            !new_used[j]
                && new_props[j].name == prop.name
                && values_match(&new_props[j].value, &prop.value)
        });
        match found {
            Some(j) => {
                new_used[j] = true;
                let params = diff_parameters(prop, new_props[j]);
                if !params.is_empty() {
                    updates.push(PropertyUpdate::Change {
                        old: (*prop).clone(),
                        new: new_props[j].clone(),
                        params,
                    });
                }
            }
            None => old_unmatched.push(prop),
        }
    }

    for prop in old_unmatched {
        let found = (0..new_props.len()).find(|&j| !new_used[j] && new_props[j].name == prop.name);
        match found {
            Some(j) => {
                new_used[j] = true;
                let params = diff_parameters(prop, new_props[j]);
                updates.push(PropertyUpdate::Change {
                    old: prop.clone(),
                    new: new_props[j].clone(),
                    params,
                });
            }
            None => updates.push(PropertyUpdate::Remove(prop.clone())),
        }
    }

    for (j, prop) in new_props.iter().enumerate() {
        if !new_used[j] {
            updates.push(PropertyUpdate::Add((*prop).clone()));
        }
    }

    updates
}

/// Pairs parameters of two matched properties by name.
fn diff_parameters(old: &Property, new: &Property) -> Vec<ParameterUpdate> {
    let mut updates = Vec::new();

    for param in &new.params {
        match old.get_param(&param.name) {
            None => updates.push(ParameterUpdate::Add(param.clone())),
            Some(previous) if !previous.same_values(param) => {
                updates.push(ParameterUpdate::Change {
                    old: previous.clone(),
                    new: param.clone(),
                });
            }
            Some(_) => {}
        }
    }

    for param in &old.params {
        if new.get_param(&param.name).is_none() {
            updates.push(ParameterUpdate::Remove {
                name: param.name.clone(),
            });
        }
    }

    updates
}

/// ## Summary
/// Pairs child components by key. Semantically identical subtrees pair
/// first regardless of position, so reordering children produces no
/// delta; remaining same-key children pair as updates; the rest become
/// component adds and removes.
fn diff_children(
    old: &[Component],
    new: &[Component],
    options: &DiffOptions,
) -> (
    Vec<Component>,
    Vec<crate::core::ComponentKey>,
    Vec<ComponentDelta>,
) {
    let mut new_used = vec![false; new.len()];
    let mut updated = Vec::new();
    let mut old_remaining: Vec<usize> = (0..old.len()).collect();

    old_remaining.retain(|&i| {
        let found = (0..new.len()).find(|&j| {
            !new_used[j]
                && new[j].key() == old[i].key()
                && diff_components(&old[i], &new[j], options).is_empty()
        });
        match found {
            Some(j) => {
                new_used[j] = true;
                false
            }
            None => true,
        }
    });

    old_remaining.retain(|&i| {
        let found = (0..new.len()).find(|&j| !new_used[j] && new[j].key() == old[i].key());
        match found {
            Some(j) => {
                new_used[j] = true;
                let delta = diff_components(&old[i], &new[j], options);
                if !delta.is_empty() {
                    updated.push(delta);
                }
                false
            }
            None => true,
        }
    });

    let removed = old_remaining.iter().map(|&i| old[i].key()).collect();
    let added = new
        .iter()
        .enumerate()
        .filter(|(j, _)| !new_used[*j])
        .map(|(_, c)| c.clone())
        .collect();

    (added, removed, updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn calendar(body: &str) -> ICalendar {
        let input = format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//T//T//EN\r\n{body}END:VCALENDAR\r\n"
        );
        parse(&input).unwrap()
    }

    fn event(lines: &str) -> ICalendar {
        calendar(&format!("BEGIN:VEVENT\r\n{lines}END:VEVENT\r\n"))
    }

    #[test_log::test]
    fn identical_calendars_empty_delta() {
        let a = event("UID:e1\r\nDTSTART:20260101T100000Z\r\nSUMMARY:Standup\r\n");
        let b = event("UID:e1\r\nDTSTART:20260101T100000Z\r\nSUMMARY:Standup\r\n");
        assert!(diff(&a, &b, &DiffOptions::default()).is_empty());
    }

    #[test]
    fn ignorable_only_changes_are_empty() {
        let a = event("UID:e1\r\nDTSTAMP:20260101T000000Z\r\nSEQUENCE:1\r\nSUMMARY:S\r\n");
        let b = event("UID:e1\r\nDTSTAMP:20260201T000000Z\r\nSEQUENCE:2\r\nSUMMARY:S\r\n");
        assert!(diff(&a, &b, &DiffOptions::default()).is_empty());
        assert!(!diff(&a, &b, &DiffOptions::strict()).is_empty());
    }

    #[test]
    fn summary_change_reported() {
        let a = event("UID:e1\r\nSUMMARY:Old title\r\n");
        let b = event("UID:e1\r\nSUMMARY:New title\r\n");

        let delta = diff(&a, &b, &DiffOptions::default());
        assert_eq!(delta.updated_components.len(), 1);

        let event_delta = &delta.updated_components[0];
        assert_eq!(event_delta.property_updates.len(), 1);
        match &event_delta.property_updates[0] {
            PropertyUpdate::Change { old, new, params } => {
                assert_eq!(old.as_text(), Some("Old title"));
                assert_eq!(new.as_text(), Some("New title"));
                assert!(params.is_empty());
            }
            other => panic!("expected Change, got {other:?}"),
        }
    }

    #[test]
    fn property_add_and_remove() {
        let a = event("UID:e1\r\nLOCATION:Room 4\r\n");
        let b = event("UID:e1\r\nDESCRIPTION:Agenda\r\n");

        let delta = diff(&a, &b, &DiffOptions::default());
        let updates = &delta.updated_components[0].property_updates;
        assert_eq!(updates.len(), 2);
        assert!(updates
            .iter()
            .any(|u| matches!(u, PropertyUpdate::Remove(p) if p.name == "LOCATION")));
        assert!(updates
            .iter()
            .any(|u| matches!(u, PropertyUpdate::Add(p) if p.name == "DESCRIPTION")));
    }

    #[test]
    fn equivalent_zoned_and_utc_times_match() {
        let a = event("UID:e1\r\nDTSTART;TZID=America/New_York:20260315T100000\r\n");
        let b = event("UID:e1\r\nDTSTART:20260315T140000Z\r\n");
        assert!(diff(&a, &b, &DiffOptions::default()).is_empty());
    }

    #[test_log::test]
    fn attendee_matched_by_value_among_candidates() {
        let a = event(
            "UID:e1\r\nATTENDEE:mailto:a@example.com\r\nATTENDEE:mailto:b@example.com\r\n",
        );
        let b = event(
            "UID:e1\r\nATTENDEE:mailto:b@example.com\r\nATTENDEE:mailto:c@example.com\r\n",
        );

        let delta = diff(&a, &b, &DiffOptions::default());
        let updates = &delta.updated_components[0].property_updates;
        // a@ and c@ pair up as the single unmatched change
        assert_eq!(updates.len(), 1);
        match &updates[0] {
            PropertyUpdate::Change { old, new, .. } => {
                assert_eq!(old.raw_value, "mailto:a@example.com");
                assert_eq!(new.raw_value, "mailto:c@example.com");
            }
            other => panic!("expected Change, got {other:?}"),
        }
    }

    #[test]
    fn parameter_change_on_matched_value() {
        let a = event("UID:e1\r\nATTENDEE;PARTSTAT=NEEDS-ACTION:mailto:a@example.com\r\n");
        let b = event("UID:e1\r\nATTENDEE;PARTSTAT=ACCEPTED:mailto:a@example.com\r\n");

        let delta = diff(&a, &b, &DiffOptions::default());
        let updates = &delta.updated_components[0].property_updates;
        match &updates[0] {
            PropertyUpdate::Change { params, .. } => {
                assert_eq!(params.len(), 1);
                match &params[0] {
                    ParameterUpdate::Change { old, new } => {
                        assert_eq!(old.value(), Some("NEEDS-ACTION"));
                        assert_eq!(new.value(), Some("ACCEPTED"));
                    }
                    other => panic!("expected parameter Change, got {other:?}"),
                }
            }
            other => panic!("expected Change, got {other:?}"),
        }
    }

    #[test]
    fn component_added_and_removed() {
        let a = calendar(
            "BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:Keep\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e2\r\nSUMMARY:Drop\r\nEND:VEVENT\r\n",
        );
        let b = calendar(
            "BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:Keep\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e3\r\nSUMMARY:Fresh\r\nEND:VEVENT\r\n",
        );

        let delta = diff(&a, &b, &DiffOptions::default());
        assert_eq!(delta.removed_components.len(), 1);
        assert_eq!(delta.removed_components[0].uid.as_deref(), Some("e2"));
        assert_eq!(delta.added_components.len(), 1);
        assert_eq!(delta.added_components[0].uid(), Some("e3"));
        assert!(delta.updated_components.is_empty());
    }

    #[test]
    fn child_order_is_irrelevant() {
        let a = calendar(
            "BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:A\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e2\r\nSUMMARY:B\r\nEND:VEVENT\r\n",
        );
        let b = calendar(
            "BEGIN:VEVENT\r\nUID:e2\r\nSUMMARY:B\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:A\r\nEND:VEVENT\r\n",
        );
        assert!(diff(&a, &b, &DiffOptions::default()).is_empty());
    }

    #[test]
    fn recurrence_override_matched_by_recurrence_id() {
        let a = calendar(
            "BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:Master\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e1\r\nRECURRENCE-ID:20260110T100000Z\r\nSUMMARY:Moved\r\nEND:VEVENT\r\n",
        );
        let b = calendar(
            "BEGIN:VEVENT\r\nUID:e1\r\nSUMMARY:Master\r\nEND:VEVENT\r\n\
             BEGIN:VEVENT\r\nUID:e1\r\nRECURRENCE-ID:20260110T100000Z\r\nSUMMARY:Moved again\r\nEND:VEVENT\r\n",
        );

        let delta = diff(&a, &b, &DiffOptions::default());
        assert_eq!(delta.updated_components.len(), 1);
        assert_eq!(
            delta.updated_components[0].recurrence_id.as_deref(),
            Some("20260110T100000Z")
        );
    }

    #[test]
    fn alarm_change_nests_in_event_delta() {
        let a = event(
            "UID:e1\r\nSUMMARY:S\r\n\
             BEGIN:VALARM\r\nACTION:DISPLAY\r\nTRIGGER:-PT15M\r\nEND:VALARM\r\n",
        );
        let b = event(
            "UID:e1\r\nSUMMARY:S\r\n\
             BEGIN:VALARM\r\nACTION:DISPLAY\r\nTRIGGER:-PT30M\r\nEND:VALARM\r\n",
        );

        let delta = diff(&a, &b, &DiffOptions::default());
        let event_delta = &delta.updated_components[0];
        assert_eq!(event_delta.updated_components.len(), 1);
        assert_eq!(event_delta.updated_components[0].name, "VALARM");
    }

    #[test]
    fn value_type_change_is_a_change() {
        let a = event("UID:e1\r\nDTSTART:20260101T000000Z\r\n");
        let b = event("UID:e1\r\nDTSTART;VALUE=DATE:20260101\r\n");

        let delta = diff(&a, &b, &DiffOptions::default());
        let updates = &delta.updated_components[0].property_updates;
        assert_eq!(updates.len(), 1);
        assert!(matches!(updates[0], PropertyUpdate::Change { .. }));
    }

    #[test]
    fn delta_renders_to_xml_and_json() {
        let a = event("UID:e1\r\nSUMMARY:Old\r\n");
        let b = event("UID:e1\r\nSUMMARY:New\r\n");

        let delta = diff(&a, &b, &DiffOptions::default());
        let xml = delta.to_xcal_xml().unwrap();
        assert!(xml.contains("propertyChange"));
        assert!(xml.contains("<X:text>New</X:text>"));

        let json = delta.to_json().unwrap();
        assert!(json.contains("\"SUMMARY\""));
    }
}
