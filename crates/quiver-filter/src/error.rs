//! Filter error types.

use std::str::Utf8Error;

/// Result alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// An error produced while transforming a response body.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML decoding error: {0}")]
    Decode(#[from] quick_xml::encoding::EncodingError),

    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),
}
