//! Decoder for the compact `geo:lat,lon` coordinate strings.
//!
//! The same encoding is used by timeline samples, activity endpoints and
//! visit place locations, e.g. `"geo:37.421998,-122.084000"`. Decoded
//! points follow `geo` axis order: `x` is longitude and `y` is latitude.

use geo_types::Point;
use serde_json::Value;
use thiserror::Error;

const GEO_PREFIX: &str = "geo:";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoDecodeError {
    #[error("malformed coordinate {input:?}: {reason}")]
    MalformedCoordinate { input: String, reason: String },

    #[error("expected a geo string, found {found}")]
    NotAString { found: String },
}

impl GeoDecodeError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        GeoDecodeError::MalformedCoordinate {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Decodes a `geo:lat,lon` string into a [`Point`].
///
/// The `geo:` prefix is optional and whitespace around either number is
/// ignored.
///
/// # Errors
///
/// Returns [`GeoDecodeError::MalformedCoordinate`] when the string does not
/// hold exactly two comma-separated numbers, or when the pair lies outside
/// `[-90, 90]` × `[-180, 180]`.
pub fn decode_geo_string(raw: &str) -> Result<Point<f64>, GeoDecodeError> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix(GEO_PREFIX).unwrap_or(trimmed);

    let mut parts = body.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GeoDecodeError::malformed(
            raw,
            "expected exactly two comma-separated values",
        ));
    };

    let latitude = parse_component(raw, lat, "latitude")?;
    let longitude = parse_component(raw, lon, "longitude")?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeoDecodeError::malformed(
            raw,
            format!("latitude {latitude} outside [-90, 90]"),
        ));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoDecodeError::malformed(
            raw,
            format!("longitude {longitude} outside [-180, 180]"),
        ));
    }

    Ok(Point::new(longitude, latitude))
}

/// Decodes a coordinate field taken straight from the JSON document.
///
/// # Errors
///
/// Returns [`GeoDecodeError::NotAString`] for any non-string value, otherwise
/// whatever [`decode_geo_string`] returns.
pub fn decode_geo_value(value: &Value) -> Result<Point<f64>, GeoDecodeError> {
    match value {
        Value::String(raw) => decode_geo_string(raw),
        other => Err(GeoDecodeError::NotAString {
            found: other.to_string(),
        }),
    }
}

fn parse_component(raw: &str, token: &str, name: &str) -> Result<f64, GeoDecodeError> {
    let value = token
        .trim()
        .parse::<f64>()
        .map_err(|e| GeoDecodeError::malformed(raw, format!("{name} {token:?}: {e}")))?;
    // `f64::from_str` accepts "inf" and "NaN".
    if !value.is_finite() {
        return Err(GeoDecodeError::malformed(
            raw,
            format!("{name} {token:?} is not finite"),
        ));
    }
    Ok(value)
}
