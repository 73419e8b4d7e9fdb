use crate::error::{ProcessingError, Result};

/// Parse a `GeoLocation` cell of the form `(lat, long)` into decimal degrees
///
/// # Examples
/// ```
/// use meteorite_processor::utils::parse_geolocation;
///
/// let (lat, lon) = parse_geolocation("(50.775, 6.08333)").unwrap();
/// assert!((lat - 50.775).abs() < 0.000001);
/// assert!((lon - 6.08333).abs() < 0.000001);
/// ```
pub fn parse_geolocation(geolocation: &str) -> Result<(f64, f64)> {
    let inner = geolocation
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| {
            ProcessingError::InvalidGeolocation(format!(
                "Expected '(lat, long)', got: '{}'",
                geolocation
            ))
        })?;

    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();
    if parts.len() != 2 {
        return Err(ProcessingError::InvalidGeolocation(format!(
            "Expected two components, got: '{}'",
            geolocation
        )));
    }

    let latitude = parts[0].parse::<f64>().map_err(|_| {
        ProcessingError::InvalidGeolocation(format!("Invalid latitude value: '{}'", parts[0]))
    })?;

    let longitude = parts[1].parse::<f64>().map_err(|_| {
        ProcessingError::InvalidGeolocation(format!("Invalid longitude value: '{}'", parts[1]))
    })?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ProcessingError::InvalidGeolocation(format!(
            "Latitude must be between -90 and 90, got: {}",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ProcessingError::InvalidGeolocation(format!(
            "Longitude must be between -180 and 180, got: {}",
            longitude
        )));
    }

    Ok((latitude, longitude))
}

/// Format decimal coordinates the way the landings dataset writes them
pub fn format_geolocation(latitude: f64, longitude: f64) -> String {
    format!("({}, {})", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_geolocation() {
        let (lat, lon) = parse_geolocation("(-33.16667, -64.95)").unwrap();
        assert!((lat - -33.16667).abs() < 0.000001);
        assert!((lon - -64.95).abs() < 0.000001);

        let (lat, lon) = parse_geolocation("  (0.0, 0.0) ").unwrap();
        assert_eq!(lat, 0.0);
        assert_eq!(lon, 0.0);
    }

    #[test]
    fn test_invalid_geolocation() {
        assert!(parse_geolocation("50.775, 6.08333").is_err());
        assert!(parse_geolocation("(50.775)").is_err());
        assert!(parse_geolocation("(north, east)").is_err());
        assert!(parse_geolocation("(91.0, 0.0)").is_err());
        assert!(parse_geolocation("(0.0, 181.0)").is_err());
    }

    #[test]
    fn test_format_roundtrip() {
        let formatted = format_geolocation(50.775, 6.08333);
        assert_eq!(formatted, "(50.775, 6.08333)");
        let (lat, lon) = parse_geolocation(&formatted).unwrap();
        assert!((lat - 50.775).abs() < 0.000001);
        assert!((lon - 6.08333).abs() < 0.000001);
    }
}
