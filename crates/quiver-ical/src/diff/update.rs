//! Update delta model.
//!
//! A diff produces a tree of deltas mirroring the component tree:
//! property adds/removes/changes with nested parameter updates, plus
//! component adds/removes and recursive updates. Deltas render to the
//! SOAP-style update XML (property payloads in xCal) and to JSON.

use quiver_xml::emit::XmlWriter;
use quiver_xml::namespace::{Namespace, QName};
use quiver_xml::XmlResult;
use serde::Serialize;

use crate::core::{Component, ComponentKey, Parameter, Property};
use crate::error::IcalResult;
use crate::xcal;

fn calws(local: &'static str) -> QName {
    QName::new(Namespace::CALWS, local)
}

/// A change to one parameter of a matched property.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterUpdate {
    /// Parameter present only in the new property.
    Add(Parameter),
    /// Parameter present only in the old property.
    Remove { name: String },
    /// Parameter present in both with different values.
    Change { old: Parameter, new: Parameter },
}

/// A change to one property of a matched component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyUpdate {
    /// Property present only in the new component.
    Add(Property),
    /// Property present only in the old component.
    Remove(Property),
    /// Property present in both; the value or parameters changed.
    Change {
        old: Property,
        new: Property,
        params: Vec<ParameterUpdate>,
    },
}

/// The delta between two matched components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDelta {
    /// Component name (VEVENT, VTODO, ...).
    pub name: String,
    /// UID of the matched pair, when present.
    pub uid: Option<String>,
    /// RECURRENCE-ID of the matched pair, when present.
    pub recurrence_id: Option<String>,
    /// Property-level changes.
    pub property_updates: Vec<PropertyUpdate>,
    /// Child components present only in the new tree.
    pub added_components: Vec<Component>,
    /// Keys of child components present only in the old tree.
    pub removed_components: Vec<ComponentKey>,
    /// Matched children whose subtrees changed.
    pub updated_components: Vec<ComponentDelta>,
}

impl ComponentDelta {
    /// Creates an empty delta for a component key.
    #[must_use]
    pub fn new(key: ComponentKey) -> Self {
        Self {
            name: key.name,
            uid: key.uid,
            recurrence_id: key.recurrence_id,
            property_updates: Vec::new(),
            added_components: Vec::new(),
            removed_components: Vec::new(),
            updated_components: Vec::new(),
        }
    }

    /// Returns true when the two trees were semantically equal.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_updates.is_empty()
            && self.added_components.is_empty()
            && self.removed_components.is_empty()
            && self.updated_components.is_empty()
    }

    /// Renders the delta as an update document, property payloads in xCal.
    ///
    /// ## Errors
    /// Returns an error if document assembly fails.
    pub fn to_xcal_xml(&self) -> IcalResult<String> {
        let mut w = XmlWriter::new();
        w.declaration();
        self.write(&mut w)?;
        Ok(w.into_string()?)
    }

    /// Renders the delta as JSON.
    ///
    /// ## Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> IcalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn write(&self, w: &mut XmlWriter) -> XmlResult<()> {
        let mut attrs = vec![("name", self.name.as_str())];
        if let Some(uid) = &self.uid {
            attrs.push(("uid", uid.as_str()));
        }
        if let Some(rid) = &self.recurrence_id {
            attrs.push(("recurrence-id", rid.as_str()));
        }
        w.open_with_attrs(&calws("componentUpdate"), &attrs);

        for update in &self.property_updates {
            update.write(w)?;
        }

        for component in &self.added_components {
            w.open(&calws("componentAdd"));
            xcal::write_component(w, component)?;
            w.close()?;
        }
        for key in &self.removed_components {
            let mut attrs = vec![("name", key.name.as_str())];
            if let Some(uid) = &key.uid {
                attrs.push(("uid", uid.as_str()));
            }
            if let Some(rid) = &key.recurrence_id {
                attrs.push(("recurrence-id", rid.as_str()));
            }
            w.open_with_attrs(&calws("componentRemove"), &attrs);
            w.close()?;
        }
        for delta in &self.updated_components {
            delta.write(w)?;
        }

        w.close()
    }
}

impl PropertyUpdate {
    fn write(&self, w: &mut XmlWriter) -> XmlResult<()> {
        match self {
            Self::Add(property) => {
                w.open(&calws("propertyAdd"));
                xcal::write_property(w, property)?;
                w.close()
            }
            Self::Remove(property) => {
                w.open(&calws("propertyRemove"));
                xcal::write_property(w, property)?;
                w.close()
            }
            Self::Change { old, new, params } => {
                w.open(&calws("propertyChange"));
                w.open(&calws("removedValue"));
                xcal::write_property(w, old)?;
                w.close()?;
                w.open(&calws("newValue"));
                xcal::write_property(w, new)?;
                w.close()?;
                for param in params {
                    param.write(w)?;
                }
                w.close()
            }
        }
    }
}

impl ParameterUpdate {
    fn write(&self, w: &mut XmlWriter) -> XmlResult<()> {
        match self {
            Self::Add(param) => {
                w.open_with_attrs(&calws("parameterAdd"), &[("name", param.name.as_str())]);
                for value in &param.values {
                    w.text_element(&calws("value"), value);
                }
                w.close()
            }
            Self::Remove { name } => {
                w.open_with_attrs(&calws("parameterRemove"), &[("name", name.as_str())]);
                w.close()
            }
            Self::Change { old, new } => {
                w.open_with_attrs(&calws("parameterChange"), &[("name", new.name.as_str())]);
                w.open(&calws("removedValue"));
                for value in &old.values {
                    w.text_element(&calws("value"), value);
                }
                w.close()?;
                w.open(&calws("newValue"));
                for value in &new.values {
                    w.text_element(&calws("value"), value);
                }
                w.close()?;
                w.close()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_delta() {
        let delta = ComponentDelta::new(ComponentKey {
            name: "VEVENT".into(),
            uid: Some("e1".into()),
            recurrence_id: None,
        });
        assert!(delta.is_empty());

        let xml = delta.to_xcal_xml().unwrap();
        assert!(xml.contains("componentUpdate"));
        assert!(xml.contains("uid=\"e1\""));
        assert!(xml.contains("http://docs.oasis-open.org/ws-calendar/ns/soap"));
    }

    #[test]
    fn property_add_renders_xcal_payload() {
        let mut delta = ComponentDelta::new(ComponentKey {
            name: "VEVENT".into(),
            uid: None,
            recurrence_id: None,
        });
        delta
            .property_updates
            .push(PropertyUpdate::Add(Property::text("SUMMARY", "New title")));

        let xml = delta.to_xcal_xml().unwrap();
        assert!(xml.contains("<CW:propertyAdd>"));
        assert!(xml.contains("<X:summary>"));
        assert!(xml.contains("<X:text>New title</X:text>"));
        assert!(!delta.is_empty());
    }

    #[test]
    fn json_rendering() {
        let mut delta = ComponentDelta::new(ComponentKey {
            name: "VEVENT".into(),
            uid: Some("e1".into()),
            recurrence_id: None,
        });
        delta
            .property_updates
            .push(PropertyUpdate::Remove(Property::text("LOCATION", "Room 4")));

        let json = delta.to_json().unwrap();
        assert!(json.contains("\"VEVENT\""));
        assert!(json.contains("\"LOCATION\""));
    }
}
