//! HTTP filters for calendar services.
//!
//! Two middleware handlers: [`XmlTransformFilter`] rewrites eligible XML
//! response bodies (pretty-printing by default), and
//! [`SessionSerializeFilter`] serializes concurrent requests that share a
//! session. Both are configured through [`quiver_core::config`].

pub mod error;
pub mod session;
pub mod transform;

pub use error::{FilterError, FilterResult};
pub use session::SessionSerializeFilter;
pub use transform::{PrettyPrint, XmlTransform, XmlTransformFilter};
