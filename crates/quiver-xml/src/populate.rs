//! XML-to-object population.
//!
//! The populator drives a target object from an XML document: leaf
//! elements arrive as `(QName, text)` pairs and container elements as
//! enter/leave notifications. Targets implement [`Populate`] and decide
//! which names they accept; anything unhandled is surfaced through
//! [`Populate::unknown`] so targets can ignore or reject it.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{XmlError, XmlResult};
use crate::namespace::{Namespace, QName};

/// A target object that can be populated from XML.
pub trait Populate {
    /// Receives a leaf element's qualified name and text content.
    /// Returns `Ok(false)` if the element is not recognized.
    ///
    /// ## Errors
    /// Implementations return an error for recognized elements with
    /// invalid values.
    fn set(&mut self, name: &QName, text: &str) -> XmlResult<bool>;

    /// Called when a container element (one with child elements) opens.
    ///
    /// ## Errors
    /// Implementations may reject containers they do not allow.
    fn enter(&mut self, name: &QName) -> XmlResult<()> {
        let _ = name;
        Ok(())
    }

    /// Called when a container element closes.
    ///
    /// ## Errors
    /// Implementations may fail when a container is incomplete.
    fn leave(&mut self, name: &QName) -> XmlResult<()> {
        let _ = name;
        Ok(())
    }

    /// Called for leaf elements `set` did not recognize. The default
    /// ignores them.
    ///
    /// ## Errors
    /// Implementations may treat unknown elements as errors.
    fn unknown(&mut self, name: &QName) -> XmlResult<()> {
        tracing::debug!(element = %name, "Ignoring unknown element");
        Ok(())
    }
}

/// Per-element parse state.
struct Frame {
    name: QName,
    text: String,
    has_children: bool,
    /// Namespace binding count when this element opened.
    ns_mark: usize,
}

/// ## Summary
/// Populates `target` from an XML document. The document (root) element
/// itself is reported through `enter`/`leave` like any other container.
///
/// ## Errors
/// Returns an error if the XML is malformed or the target rejects an
/// element or value.
#[tracing::instrument(skip(xml, target), fields(xml_len = xml.len()))]
pub fn populate<T: Populate>(xml: &[u8], target: &mut T) -> XmlResult<()> {
    let mut reader = Reader::from_reader(xml);

    let mut buf = Vec::new();
    let mut namespaces: Vec<(String, String)> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let ns_mark = namespaces.len();
                collect_namespaces(e, &mut namespaces)?;
                let name = resolve_qname(e, &namespaces)?;

                if let Some(parent) = stack.last_mut()
                    && !parent.has_children
                {
                    parent.has_children = true;
                    target.enter(&parent.name)?;
                }

                stack.push(Frame {
                    name,
                    text: String::new(),
                    has_children: false,
                    ns_mark,
                });
            }
            Ok(Event::Empty(ref e)) => {
                let ns_mark = namespaces.len();
                collect_namespaces(e, &mut namespaces)?;
                let name = resolve_qname(e, &namespaces)?;
                namespaces.truncate(ns_mark);

                if let Some(parent) = stack.last_mut()
                    && !parent.has_children
                {
                    parent.has_children = true;
                    target.enter(&parent.name)?;
                }

                if !target.set(&name, "")? {
                    target.unknown(&name)?;
                }
            }
            Ok(Event::Text(ref t)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&reader.decoder().decode(t.as_ref())?);
                }
            }
            Ok(Event::GeneralRef(ref r)) => {
                if let Some(frame) = stack.last_mut() {
                    let name = reader.decoder().decode(r.as_ref())?;
                    frame.text.push(resolve_reference(&name)?);
                }
            }
            Ok(Event::CData(ref t)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(std::str::from_utf8(t.as_ref())?);
                }
            }
            Ok(Event::End(_)) => {
                let Some(frame) = stack.pop() else {
                    return Err(XmlError::UnexpectedElement(
                        "end tag with no open element".to_string(),
                    ));
                };
                namespaces.truncate(frame.ns_mark);

                if frame.has_children {
                    target.leave(&frame.name)?;
                } else if !target.set(&frame.name, frame.text.trim())? {
                    target.unknown(&frame.name)?;
                } else {
                    // Handled leaf element.
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
        buf.clear();
    }

    if let Some(frame) = stack.last() {
        return Err(XmlError::MissingElement(format!(
            "unclosed element: {}",
            frame.name
        )));
    }

    Ok(())
}

/// Resolves a general entity reference to its character: the five
/// predefined XML entities plus decimal and hexadecimal character
/// references.
fn resolve_reference(name: &str) -> XmlResult<char> {
    match name {
        "amp" => return Ok('&'),
        "lt" => return Ok('<'),
        "gt" => return Ok('>'),
        "apos" => return Ok('\''),
        "quot" => return Ok('"'),
        _ => {}
    }

    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };

    code.and_then(char::from_u32)
        .ok_or_else(|| XmlError::invalid_value("entity reference", name))
}

/// Collects namespace declarations from an element's attributes.
fn collect_namespaces(
    e: &quick_xml::events::BytesStart<'_>,
    namespaces: &mut Vec<(String, String)>,
) -> XmlResult<()> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        if let Some(prefix) = key.strip_prefix("xmlns:") {
            namespaces.push((prefix.to_string(), value.to_string()));
        } else if key == "xmlns" {
            namespaces.push((String::new(), value.to_string()));
        } else {
            // Other attributes ignored
        }
    }
    Ok(())
}

/// Resolves a `QName` from an element, using namespace declarations.
fn resolve_qname(
    e: &quick_xml::events::BytesStart<'_>,
    namespaces: &[(String, String)],
) -> XmlResult<QName> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())?.to_owned();

    let (prefix, local_name) = if let Some(colon_pos) = name.find(':') {
        (
            name[..colon_pos].to_owned(),
            name[colon_pos + 1..].to_owned(),
        )
    } else {
        (String::new(), name)
    };

    let namespace = namespaces
        .iter()
        .rev()
        .find(|(p, _)| *p == prefix)
        .map_or("", |(_, ns)| ns.as_str());

    Ok(QName::new(Namespace::new(namespace.to_string()), local_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::DAV_NS;

    #[derive(Default)]
    struct CollectionProps {
        displayname: Option<String>,
        description: Option<String>,
        containers: Vec<String>,
        unknown: Vec<String>,
    }

    impl Populate for CollectionProps {
        fn set(&mut self, name: &QName, text: &str) -> XmlResult<bool> {
            if !name.is_dav() {
                return Ok(false);
            }
            match name.local_name() {
                "displayname" => {
                    self.displayname = Some(text.to_string());
                    Ok(true)
                }
                "description" => {
                    self.description = Some(text.to_string());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }

        fn enter(&mut self, name: &QName) -> XmlResult<()> {
            self.containers.push(name.local_name().to_string());
            Ok(())
        }

        fn unknown(&mut self, name: &QName) -> XmlResult<()> {
            self.unknown.push(name.to_string());
            Ok(())
        }
    }

    #[test_log::test]
    fn populates_leaf_fields() {
        let xml = br#"<D:prop xmlns:D="DAV:">
            <D:displayname>Home</D:displayname>
            <D:description>My calendar</D:description>
        </D:prop>"#;

        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");

        assert_eq!(props.displayname.as_deref(), Some("Home"));
        assert_eq!(props.description.as_deref(), Some("My calendar"));
        assert_eq!(props.containers, vec!["prop"]);
    }

    #[test_log::test]
    fn unknown_elements_surface() {
        let xml = br#"<D:prop xmlns:D="DAV:" xmlns:Z="urn:example:z">
            <D:displayname>Home</D:displayname>
            <Z:mystery>hm</Z:mystery>
        </D:prop>"#;

        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");

        assert_eq!(props.unknown, vec!["{urn:example:z}mystery"]);
    }

    #[test]
    fn empty_elements_are_leaves() {
        let xml = br#"<D:prop xmlns:D="DAV:"><D:displayname/></D:prop>"#;

        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");

        assert_eq!(props.displayname.as_deref(), Some(""));
    }

    #[test]
    fn nested_namespace_scoping() {
        // Inner binding shadows the prefix, then goes out of scope.
        let xml = br#"<prop xmlns="DAV:">
            <outer><displayname xmlns="urn:example:z">x</displayname></outer>
            <displayname>y</displayname>
        </prop>"#;

        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");

        assert_eq!(props.displayname.as_deref(), Some("y"));
        assert_eq!(props.unknown, vec!["{urn:example:z}displayname"]);
        assert!(props.containers.contains(&"outer".to_string()));
    }

    #[test_log::test]
    fn entity_references_decode() {
        let xml = br#"<D:prop xmlns:D="DAV:">
            <D:displayname>Tom &amp; Jerry &#x21;</D:displayname>
            <D:description>a &lt;b&gt; &#99;</D:description>
        </D:prop>"#;

        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");

        assert_eq!(props.displayname.as_deref(), Some("Tom & Jerry !"));
        assert_eq!(props.description.as_deref(), Some("a <b> c"));
    }

    #[test]
    fn unknown_entity_is_error() {
        let xml = br#"<D:prop xmlns:D="DAV:"><D:displayname>&nosuch;</D:displayname></D:prop>"#;
        let mut props = CollectionProps::default();
        assert!(populate(xml, &mut props).is_err());
    }

    #[test]
    fn malformed_is_error() {
        let xml = br#"<D:prop xmlns:D="DAV:"><D:displayname>"#;
        let mut props = CollectionProps::default();
        assert!(populate(xml, &mut props).is_err());
    }

    #[test]
    fn default_namespace_applies() {
        let xml = br#"<prop xmlns="DAV:"><displayname>Home</displayname></prop>"#;
        let mut props = CollectionProps::default();
        populate(xml, &mut props).expect("populate");
        assert_eq!(props.displayname.as_deref(), Some("Home"));
        assert_eq!(QName::dav("x").namespace_uri(), DAV_NS);
    }
}
