use thiserror::Error;

/// iCalendar parsing, emission and diff errors
#[derive(Error, Debug)]
pub enum IcalError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::parse::ParseError),

    #[error("Geo URI error: {0}")]
    Geo(#[from] crate::geo::GeoError),

    #[error("XML error: {0}")]
    Xml(#[from] quiver_xml::XmlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IcalResult<T> = std::result::Result<T, IcalError>;
