//! XML namespace and qualified name types.

use std::borrow::Cow;

/// `DAV:` namespace URI.
pub const DAV_NS: &str = "DAV:";

/// `CalDAV` namespace URI.
pub const CALDAV_NS: &str = "urn:ietf:params:xml:ns:caldav";

/// `CardDAV` namespace URI.
pub const CARDDAV_NS: &str = "urn:ietf:params:xml:ns:carddav";

/// xCal namespace URI (RFC 6321).
pub const XCAL_NS: &str = "urn:ietf:params:xml:ns:icalendar-2.0";

/// xCard/vCard 4 namespace URI (RFC 6351).
pub const VCARD_NS: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// `CalendarServer` (Apple) namespace URI.
pub const CS_NS: &str = "http://calendarserver.org/ns/";

/// `CalWS` SOAP namespace URI (calendar update deltas).
pub const CALWS_NS: &str = "http://docs.oasis-open.org/ws-calendar/ns/soap";

/// An XML namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(pub Cow<'static, str>);

impl Namespace {
    /// `DAV:` namespace.
    pub const DAV: Self = Self(Cow::Borrowed(DAV_NS));

    /// `CalDAV` namespace.
    pub const CALDAV: Self = Self(Cow::Borrowed(CALDAV_NS));

    /// `CardDAV` namespace.
    pub const CARDDAV: Self = Self(Cow::Borrowed(CARDDAV_NS));

    /// xCal namespace.
    pub const XCAL: Self = Self(Cow::Borrowed(XCAL_NS));

    /// vCard namespace.
    pub const VCARD: Self = Self(Cow::Borrowed(VCARD_NS));

    /// `CalendarServer` namespace.
    pub const CS: Self = Self(Cow::Borrowed(CS_NS));

    /// `CalWS` SOAP namespace.
    pub const CALWS: Self = Self(Cow::Borrowed(CALWS_NS));

    /// Creates a new namespace from a string.
    #[must_use]
    pub fn new(uri: impl Into<Cow<'static, str>>) -> Self {
        Self(uri.into())
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the conventional prefix for this namespace.
    #[must_use]
    pub fn default_prefix(&self) -> Option<&'static str> {
        match self.0.as_ref() {
            DAV_NS => Some("D"),
            CALDAV_NS => Some("C"),
            CARDDAV_NS => Some("CR"),
            XCAL_NS => Some("X"),
            VCARD_NS => Some("V"),
            CS_NS => Some("CS"),
            CALWS_NS => Some("CW"),
            _ => None,
        }
    }
}

impl From<&'static str> for Namespace {
    fn from(s: &'static str) -> Self {
        Self(Cow::Borrowed(s))
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(Cow::Owned(s))
    }
}

/// A qualified XML name (namespace + local name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    /// The namespace URI.
    pub namespace: Namespace,
    /// The local name.
    pub local_name: Cow<'static, str>,
}

impl QName {
    /// Creates a new qualified name.
    #[must_use]
    pub fn new(namespace: impl Into<Namespace>, local_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
        }
    }

    /// Creates a `DAV:` qualified name.
    #[must_use]
    pub fn dav(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::DAV, local_name)
    }

    /// Creates a `CalDAV` qualified name.
    #[must_use]
    pub fn caldav(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::CALDAV, local_name)
    }

    /// Creates a `CardDAV` qualified name.
    #[must_use]
    pub fn carddav(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::CARDDAV, local_name)
    }

    /// Creates an xCal qualified name.
    #[must_use]
    pub fn xcal(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::XCAL, local_name)
    }

    /// Creates a vCard qualified name.
    #[must_use]
    pub fn vcard(local_name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(Namespace::VCARD, local_name)
    }

    /// Returns the local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns the namespace URI.
    #[must_use]
    pub fn namespace_uri(&self) -> &str {
        self.namespace.as_str()
    }

    /// Returns whether this name lives in the given namespace.
    #[must_use]
    pub fn in_namespace(&self, ns: &Namespace) -> bool {
        self.namespace == *ns
    }

    /// Returns whether this is a DAV: element.
    #[must_use]
    pub fn is_dav(&self) -> bool {
        self.in_namespace(&Namespace::DAV)
    }

    /// Returns whether this is an xCal element.
    #[must_use]
    pub fn is_xcal(&self) -> bool {
        self.in_namespace(&Namespace::XCAL)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}{}", self.namespace.as_str(), self.local_name)
    }
}
