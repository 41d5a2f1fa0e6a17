use thiserror::Error;

/// XML reading and writing errors
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("XML decoding error: {0}")]
    Decode(#[from] quick_xml::encoding::EncodingError),

    #[error("Emit error: {0}")]
    Emit(String),

    #[error("Unexpected element: {0}")]
    UnexpectedElement(String),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("Invalid value for {element}: {message}")]
    InvalidValue { element: String, message: String },
}

impl XmlError {
    /// Creates an invalid-value error for an element.
    #[must_use]
    pub fn invalid_value(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            element: element.into(),
            message: message.into(),
        }
    }
}

pub type XmlResult<T> = std::result::Result<T, XmlError>;
