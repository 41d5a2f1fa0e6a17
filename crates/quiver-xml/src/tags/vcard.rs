//! vCard 4 names (RFC 6350) and xCard element helpers (RFC 6351).

use crate::namespace::QName;

// Property names (RFC 6350 §6)
pub const ADR: &str = "ADR";
pub const ANNIVERSARY: &str = "ANNIVERSARY";
pub const BDAY: &str = "BDAY";
pub const CALADRURI: &str = "CALADRURI";
pub const CALURI: &str = "CALURI";
pub const CATEGORIES: &str = "CATEGORIES";
pub const CLIENTPIDMAP: &str = "CLIENTPIDMAP";
pub const EMAIL: &str = "EMAIL";
pub const FBURL: &str = "FBURL";
pub const FN: &str = "FN";
pub const GENDER: &str = "GENDER";
pub const GEO: &str = "GEO";
pub const IMPP: &str = "IMPP";
pub const KEY: &str = "KEY";
pub const KIND: &str = "KIND";
pub const LANG: &str = "LANG";
pub const LOGO: &str = "LOGO";
pub const MEMBER: &str = "MEMBER";
pub const N: &str = "N";
pub const NICKNAME: &str = "NICKNAME";
pub const NOTE: &str = "NOTE";
pub const ORG: &str = "ORG";
pub const PHOTO: &str = "PHOTO";
pub const PRODID: &str = "PRODID";
pub const RELATED: &str = "RELATED";
pub const REV: &str = "REV";
pub const ROLE: &str = "ROLE";
pub const SOUND: &str = "SOUND";
pub const SOURCE: &str = "SOURCE";
pub const TEL: &str = "TEL";
pub const TITLE: &str = "TITLE";
pub const TZ: &str = "TZ";
pub const UID: &str = "UID";
pub const URL: &str = "URL";
pub const VERSION: &str = "VERSION";
pub const XML: &str = "XML";

/// Parameter names defined by RFC 6350 §5.
pub const KNOWN_PARAMETERS: &[&str] = &[
    "ALTID",
    "CALSCALE",
    "GEO",
    "LABEL",
    "LANGUAGE",
    "MEDIATYPE",
    "PID",
    "PREF",
    "SORT-AS",
    "TYPE",
    "TZ",
    "VALUE",
];

/// Returns whether a parameter name is defined by RFC 6350 (extension
/// parameters must start with `X-`).
#[must_use]
pub fn is_known_parameter(name: &str) -> bool {
    let upper = name.to_ascii_uppercase();
    KNOWN_PARAMETERS.contains(&upper.as_str())
}

/// ## Summary
/// Returns the xCard element name for a property or parameter: the vCard
/// name lowercased, in the vCard 4 namespace (RFC 6351 §5).
#[must_use]
pub fn element_for(vcard_name: &str) -> QName {
    QName::vcard(vcard_name.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::VCARD_NS;

    #[test]
    fn known_parameters() {
        assert!(is_known_parameter("TYPE"));
        assert!(is_known_parameter("sort-as"));
        assert!(!is_known_parameter("X-CUSTOM"));
    }

    #[test]
    fn element_for_lowercases() {
        let qname = element_for(FN);
        assert_eq!(qname.namespace_uri(), VCARD_NS);
        assert_eq!(qname.local_name(), "fn");
    }
}
