//! Geographic URIs (RFC 5870).
//!
//! A geo URI carries a latitude/longitude pair in WGS-84 by default,
//! with optional altitude, an optional `crs` parameter, an optional
//! uncertainty in meters, and free-form extension parameters.

use std::fmt;

use serde::Serialize;

/// An error produced while parsing a geo URI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("geo URI must start with \"geo:\"")]
    MissingScheme,
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("latitude {0} out of range -90..=90")]
    LatitudeOutOfRange(String),
    #[error("longitude {0} out of range -180..=180")]
    LongitudeOutOfRange(String),
    #[error("invalid uncertainty: {0}")]
    InvalidUncertainty(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// A parsed geo URI.
#[derive(Debug, Clone, Serialize)]
pub struct GeoUri {
    /// Latitude in decimal degrees, -90 to 90.
    pub latitude: f64,
    /// Longitude in decimal degrees, -180 to 180.
    pub longitude: f64,
    /// Optional altitude in meters.
    pub altitude: Option<f64>,
    /// Coordinate reference system; `None` means the `wgs84` default.
    pub crs: Option<String>,
    /// Optional location uncertainty in meters (`u` parameter).
    pub uncertainty: Option<f64>,
    /// Extension parameters in order of appearance, `(name, value)`.
    /// A parameter without `=` has an empty value.
    pub params: Vec<(String, String)>,
}

impl GeoUri {
    /// Creates a geo URI from a coordinate pair.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            crs: None,
            uncertainty: None,
            params: Vec::new(),
        }
    }

    /// Returns the effective CRS, defaulting to `wgs84`.
    #[must_use]
    pub fn crs(&self) -> &str {
        self.crs.as_deref().unwrap_or("wgs84")
    }

    /// Parses a geo URI string.
    ///
    /// ## Errors
    /// Returns an error when the scheme is missing, a coordinate is not a
    /// number or out of range, or a parameter is malformed.
    pub fn parse(input: &str) -> Result<Self, GeoError> {
        let rest = strip_scheme(input).ok_or(GeoError::MissingScheme)?;

        let (coords, params_str) = match rest.split_once(';') {
            Some((coords, params)) => (coords, Some(params)),
            None => (rest, None),
        };

        let mut parts = coords.split(',');
        let latitude = parse_coord(parts.next())?;
        let longitude = parse_coord(parts.next())?;
        let altitude = match parts.next() {
            Some(a) => Some(parse_coord(Some(a))?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(GeoError::InvalidCoordinate(coords.to_string()));
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(latitude.to_string()));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(longitude.to_string()));
        }

        let mut uri = Self {
            latitude,
            longitude,
            altitude,
            crs: None,
            uncertainty: None,
            params: Vec::new(),
        };

        if let Some(params_str) = params_str {
            for param in params_str.split(';') {
                if param.is_empty() {
                    return Err(GeoError::InvalidParameter(String::new()));
                }
                let (name, value) = match param.split_once('=') {
                    Some((n, v)) => (n, v),
                    None => (param, ""),
                };
                match name.to_ascii_lowercase().as_str() {
                    "crs" => uri.crs = Some(value.to_string()),
                    "u" => {
                        uri.uncertainty = Some(
                            value
                                .parse::<f64>()
                                .ok()
                                .filter(|u| *u >= 0.0)
                                .ok_or_else(|| GeoError::InvalidUncertainty(value.to_string()))?,
                        );
                    }
                    _ => uri.params.push((name.to_string(), value.to_string())),
                }
            }
        }

        Ok(uri)
    }
}

/// Strips the `geo:` scheme, case-insensitively per RFC 3986 §3.1.
fn strip_scheme(input: &str) -> Option<&str> {
    let (scheme, rest) = input.split_once(':')?;
    scheme.eq_ignore_ascii_case("geo").then_some(rest)
}

fn parse_coord(part: Option<&str>) -> Result<f64, GeoError> {
    let part = part.ok_or_else(|| GeoError::InvalidCoordinate(String::new()))?;
    part.parse()
        .map_err(|_| GeoError::InvalidCoordinate(part.to_string()))
}

impl fmt::Display for GeoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geo:{},{}", self.latitude, self.longitude)?;
        if let Some(altitude) = self.altitude {
            write!(f, ",{altitude}")?;
        }
        if let Some(crs) = &self.crs {
            write!(f, ";crs={crs}")?;
        }
        if let Some(u) = self.uncertainty {
            write!(f, ";u={u}")?;
        }
        for (name, value) in &self.params {
            if value.is_empty() {
                write!(f, ";{name}")?;
            } else {
                write!(f, ";{name}={value}")?;
            }
        }
        Ok(())
    }
}

/// ## Summary
/// Geo URI equivalence per RFC 5870 §3.4.3: coordinates and uncertainty
/// compare numerically, the CRS compares case-insensitively with `wgs84`
/// as the default, and extension parameter names compare
/// case-insensitively while their values are case-sensitive. Parameter
/// order is insignificant.
impl PartialEq for GeoUri {
    fn eq(&self, other: &Self) -> bool {
        if self.latitude != other.latitude
            || self.longitude != other.longitude
            || self.altitude != other.altitude
            || self.uncertainty != other.uncertainty
            || !self.crs().eq_ignore_ascii_case(other.crs())
            || self.params.len() != other.params.len()
        {
            return false;
        }

        // Each parameter on the other side matches at most once, so
        // duplicate names must pair up.
        let mut used = vec![false; other.params.len()];
        self.params.iter().all(|(name, value)| {
            other.params.iter().enumerate().any(|(i, (n, v))| {
                if !used[i] && n.eq_ignore_ascii_case(name) && v == value {
                    used[i] = true;
                    true
                } else {
                    false
                }
            })
        })
    }
}

/// The GEO property value (RFC 5545 §3.8.1.6): two floats separated by
/// a semicolon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoValue {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoValue {
    /// Parses a GEO property value such as `37.386013;-122.082932`.
    ///
    /// ## Errors
    /// Returns an error when the separator is missing or either half is
    /// not a number in range.
    pub fn parse(input: &str) -> Result<Self, GeoError> {
        let (lat, lon) = input
            .split_once(';')
            .ok_or_else(|| GeoError::InvalidCoordinate(input.to_string()))?;
        let latitude: f64 = lat
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(lat.to_string()))?;
        let longitude: f64 = lon
            .parse()
            .map_err(|_| GeoError::InvalidCoordinate(lon.to_string()))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::LatitudeOutOfRange(lat.to_string()));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::LongitudeOutOfRange(lon.to_string()));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Converts to a geo URI with the same coordinates.
    #[must_use]
    pub fn to_uri(self) -> GeoUri {
        GeoUri::new(self.latitude, self.longitude)
    }
}

impl fmt::Display for GeoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.latitude, self.longitude)
    }
}
