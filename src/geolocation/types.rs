//! Geolocation data structures.

use std::fmt;

/// Placeholder for text fields the service did not return.
pub const UNKNOWN: &str = "Unknown";

/// Resolved location of one query.
///
/// `Default` is the "nothing resolved yet" state: empty strings and zero
/// coordinates. Zero coordinates are a sentinel, see [`has_coordinates`].
///
/// [`has_coordinates`]: LocationRecord::has_coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationRecord {
    pub ip: String,
    pub city: String,
    pub country: String,
    pub region_or_zip: String,
    pub isp: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    /// Builds a record from optional service fields, substituting `"Unknown"`
    /// for missing or empty text and `0` for missing coordinates.
    pub fn from_parts(
        ip: Option<String>,
        city: Option<String>,
        country: Option<String>,
        region_or_zip: Option<String>,
        isp: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            ip: text_or_unknown(ip),
            city: text_or_unknown(city),
            country: text_or_unknown(country),
            region_or_zip: text_or_unknown(region_or_zip),
            isp: text_or_unknown(isp),
            latitude: latitude.unwrap_or(0.0),
            longitude: longitude.unwrap_or(0.0),
        }
    }

    /// True only when both coordinates are non-zero. The map is positioned
    /// only for records where this holds.
    pub fn has_coordinates(&self) -> bool {
        self.latitude != 0.0 && self.longitude != 0.0
    }

    /// "City, Country" as shown in the info card and the marker popup.
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "IP: {}", self.ip)?;
        writeln!(f, "Loc: {}", self.location_label())?;
        writeln!(f, "ZIP: {}", self.region_or_zip)?;
        write!(f, "ISP: {}", self.isp)
    }
}

fn text_or_unknown(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sentinel() {
        let record = LocationRecord::default();
        assert!(record.ip.is_empty());
        assert_eq!(record.latitude, 0.0);
        assert_eq!(record.longitude, 0.0);
        assert!(!record.has_coordinates());
    }

    #[test]
    fn test_from_parts_fills_unknown() {
        let record = LocationRecord::from_parts(
            Some("1.1.1.1".to_string()),
            None,
            Some(String::new()),
            None,
            Some("Cloudflare".to_string()),
            None,
            Some(151.2),
        );
        assert_eq!(record.ip, "1.1.1.1");
        assert_eq!(record.city, UNKNOWN);
        assert_eq!(record.country, UNKNOWN);
        assert_eq!(record.region_or_zip, UNKNOWN);
        assert_eq!(record.isp, "Cloudflare");
        assert_eq!(record.latitude, 0.0);
        assert_eq!(record.longitude, 151.2);
    }

    #[test]
    fn test_has_coordinates_requires_both() {
        let mut record = LocationRecord {
            latitude: 37.4,
            longitude: -122.07,
            ..Default::default()
        };
        assert!(record.has_coordinates());
        record.longitude = 0.0;
        assert!(!record.has_coordinates());
    }

    #[test]
    fn test_display() {
        let record = LocationRecord {
            ip: "8.8.8.8".to_string(),
            city: "Mountain View".to_string(),
            country: "US".to_string(),
            region_or_zip: "94043".to_string(),
            isp: "Google".to_string(),
            latitude: 37.4,
            longitude: -122.07,
        };
        let shown = record.to_string();
        assert!(shown.contains("Loc: Mountain View, US"));
        assert!(shown.contains("ZIP: 94043"));
        assert!(shown.ends_with("ISP: Google"));
    }
}
