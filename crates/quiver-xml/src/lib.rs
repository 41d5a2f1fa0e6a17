//! XML plumbing for the quiver suite.
//!
//! Namespace-qualified names, the per-protocol tag constant tables
//! (WebDAV/CalDAV/CardDAV/xCal/vCard), a scoped XML emitter, and an
//! event-driven XML-to-object populator.

pub mod emit;
pub mod error;
pub mod namespace;
pub mod populate;
pub mod tags;

pub use emit::XmlWriter;
pub use error::{XmlError, XmlResult};
pub use namespace::{Namespace, QName};
pub use populate::{Populate, populate};
