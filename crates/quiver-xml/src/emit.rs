//! Scoped XML emission with namespace/prefix management.
//!
//! `XmlWriter` keeps a stack of open elements and the namespace bindings
//! declared at each level. Namespaces are declared lazily: the first element
//! written in a namespace not yet bound declares it, using the conventional
//! prefix when free and a generated one otherwise.

use crate::error::{XmlError, XmlResult};
use crate::namespace::QName;

/// Escapes XML text content.
#[must_use]
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes XML attribute values (double-quoted).
#[must_use]
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A streaming XML writer with namespace scope management.
#[derive(Debug)]
pub struct XmlWriter {
    buf: String,
    /// Prefix bindings declared per open element.
    scopes: Vec<Vec<(String, String)>>,
    /// Prefixed names of open elements.
    open: Vec<String>,
    /// Whether each open element has child elements.
    had_children: Vec<bool>,
    next_auto: u32,
    indent: bool,
}

impl XmlWriter {
    /// Creates a compact writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            scopes: Vec::new(),
            open: Vec::new(),
            had_children: Vec::new(),
            next_auto: 0,
            indent: false,
        }
    }

    /// Creates a writer that indents nested elements by two spaces.
    #[must_use]
    pub fn new_indented() -> Self {
        Self {
            indent: true,
            ..Self::new()
        }
    }

    /// Writes the XML declaration. Must be called before any element.
    pub fn declaration(&mut self) {
        if self.buf.is_empty() {
            self.buf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        }
    }

    /// Opens an element.
    pub fn open(&mut self, name: &QName) {
        self.open_with_attrs(name, &[]);
    }

    /// Opens an element with attributes.
    pub fn open_with_attrs(&mut self, name: &QName, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs, false);
    }

    /// Writes an empty element.
    pub fn empty_element(&mut self, name: &QName) {
        self.start_tag(name, &[], true);
    }

    /// Writes an element containing only text.
    pub fn text_element(&mut self, name: &QName, text: &str) {
        self.open(name);
        self.buf.push_str(&escape_text(text));
        // Inline close: the element holds text, not children.
        let prefixed = self.open.pop().unwrap_or_default();
        self.scopes.pop();
        self.had_children.pop();
        self.buf.push_str("</");
        self.buf.push_str(&prefixed);
        self.buf.push('>');
    }

    /// Writes text content into the current element.
    pub fn text(&mut self, text: &str) {
        self.buf.push_str(&escape_text(text));
    }

    /// Writes a CDATA section into the current element.
    pub fn cdata(&mut self, text: &str) {
        // A literal "]]>" would terminate the section early; split it.
        self.buf.push_str("<![CDATA[");
        self.buf.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
        self.buf.push_str("]]>");
    }

    /// Closes the most recently opened element.
    ///
    /// ## Errors
    /// Returns an error if no element is open.
    pub fn close(&mut self) -> XmlResult<()> {
        let prefixed = self
            .open
            .pop()
            .ok_or_else(|| XmlError::Emit("close with no open element".to_string()))?;
        self.scopes.pop();
        let had_children = self.had_children.pop().unwrap_or(false);

        if self.indent && had_children {
            self.newline_indent(self.open.len());
        }
        self.buf.push_str("</");
        self.buf.push_str(&prefixed);
        self.buf.push('>');
        Ok(())
    }

    /// Finishes the document and returns it.
    ///
    /// ## Errors
    /// Returns an error if elements remain open.
    pub fn into_string(self) -> XmlResult<String> {
        if let Some(unclosed) = self.open.last() {
            return Err(XmlError::Emit(format!("unclosed element: {unclosed}")));
        }
        Ok(self.buf)
    }

    fn start_tag(&mut self, name: &QName, attrs: &[(&str, &str)], empty: bool) {
        if self.indent && !self.open.is_empty() {
            self.newline_indent(self.open.len());
        }
        if let Some(flag) = self.had_children.last_mut() {
            *flag = true;
        }

        let (prefix, declaration) = self.resolve_prefix(name);
        let prefixed = if prefix.is_empty() {
            name.local_name().to_string()
        } else {
            format!("{prefix}:{}", name.local_name())
        };

        self.buf.push('<');
        self.buf.push_str(&prefixed);

        let mut bindings = Vec::new();
        if let Some((decl_prefix, ns)) = declaration {
            if decl_prefix.is_empty() {
                self.buf.push_str(&format!(" xmlns=\"{}\"", escape_attr(&ns)));
            } else {
                self.buf
                    .push_str(&format!(" xmlns:{decl_prefix}=\"{}\"", escape_attr(&ns)));
            }
            bindings.push((decl_prefix, ns));
        }

        for (key, value) in attrs {
            self.buf
                .push_str(&format!(" {key}=\"{}\"", escape_attr(value)));
        }

        if empty {
            self.buf.push_str("/>");
        } else {
            self.buf.push('>');
            self.open.push(prefixed);
            self.scopes.push(bindings);
            self.had_children.push(false);
        }
    }

    /// Returns the prefix to use for a namespace, plus the binding to
    /// declare on this element when the namespace is not yet in scope.
    fn resolve_prefix(&mut self, name: &QName) -> (String, Option<(String, String)>) {
        let ns = name.namespace_uri();

        for scope in self.scopes.iter().rev() {
            if let Some((prefix, _)) = scope.iter().find(|(_, bound)| bound == ns) {
                return (prefix.clone(), None);
            }
        }

        let prefix = match name.namespace.default_prefix() {
            Some(conventional) if !self.prefix_in_scope(conventional) => conventional.to_string(),
            _ => {
                self.next_auto += 1;
                format!("ns{}", self.next_auto)
            }
        };

        (prefix.clone(), Some((prefix, ns.to_string())))
    }

    fn prefix_in_scope(&self, prefix: &str) -> bool {
        self.scopes
            .iter()
            .any(|scope| scope.iter().any(|(p, _)| p == prefix))
    }

    fn newline_indent(&mut self, depth: usize) {
        self.buf.push('\n');
        for _ in 0..depth {
            self.buf.push_str("  ");
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
