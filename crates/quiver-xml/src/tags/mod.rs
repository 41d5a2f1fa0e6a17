//! Namespace-qualified tag constant tables.
//!
//! One module per protocol. Each table exposes the element names other
//! crates need when emitting or matching protocol XML, as `QName`
//! constructors bound to the right namespace.

pub mod caldav;
pub mod carddav;
pub mod vcard;
pub mod webdav;
pub mod xcal;
