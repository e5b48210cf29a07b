//! Human-readable text for the CLI and TUI.
//!
//! This is the only place where errors and earthquakes are turned into
//! wording; everything below it works with structured values.

use chrono::{DateTime, Local, Utc};

use crate::domain::{DecodeErrorKind, Earthquake, ErrorKind, MagnitudeClass};

pub fn error_message(error: &ErrorKind) -> String {
    match error {
        ErrorKind::NoConnectivity => {
            "No internet connection. Please check your network settings.".to_string()
        }
        ErrorKind::Timeout => "The request timed out. Please try again.".to_string(),
        ErrorKind::HostUnreachable => {
            "Cannot find host. Please check the server address.".to_string()
        }
        ErrorKind::BadServerResponse { status } => {
            format!("Server error (HTTP {}). Please try again later.", status)
        }
        ErrorKind::DecodingFailed { kind, detail } => {
            let what = match kind {
                DecodeErrorKind::TypeMismatch => "Type mismatch",
                DecodeErrorKind::MissingKey => "Missing field",
                DecodeErrorKind::Corrupted => "Data corrupted",
                DecodeErrorKind::UnexpectedEnd => "Data ended unexpectedly",
                DecodeErrorKind::Other => "Failed to parse earthquake data",
            };
            format!("{}: {}", what, detail)
        }
        ErrorKind::Unknown { detail } => format!("An unexpected error occurred: {}", detail),
    }
}

/// One line per magnitude class, e.g. `Magnitude < 2.0: Light Earthquake`.
pub fn legend() -> Vec<(MagnitudeClass, String)> {
    MagnitudeClass::ALL
        .iter()
        .map(|class| {
            (
                *class,
                format!("{}: {} Earthquake", class.range_description(), class.label()),
            )
        })
        .collect()
}

/// Single-line summary used by list views.
pub fn list_line(quake: &Earthquake) -> String {
    format!(
        "{:>4.1}  {}  {}",
        quake.magnitude,
        quake.occurred_at.format("%Y-%m-%d %H:%M"),
        quake.display_place()
    )
}

/// Labelled fields shown for a selected earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeDetail {
    pub magnitude: String,
    pub class: String,
    pub location: String,
    pub time: String,
    pub depth: String,
    pub position: String,
}

impl EarthquakeDetail {
    pub fn new(quake: &Earthquake) -> Self {
        Self::with_time(quake, format_time(quake.occurred_at))
    }

    fn with_time(quake: &Earthquake, time: String) -> Self {
        let class = quake.magnitude_class();
        Self {
            magnitude: format!("Magnitude: {}", quake.magnitude),
            class: format!("Class: {}", class.label()),
            location: format!("Location: {}", quake.display_place()),
            time: format!("Time: {}", time),
            depth: match quake.depth_km() {
                Some(depth) => format!("Depth: {} km", depth),
                None => "Depth: Unknown".to_string(),
            },
            position: match quake.position() {
                Some(p) => format!("Position: {:.3}, {:.3}", p.latitude, p.longitude),
                None => "Position: Unknown".to_string(),
            },
        }
    }

    pub fn lines(&self) -> [&str; 6] {
        [
            self.magnitude.as_str(),
            self.class.as_str(),
            self.location.as_str(),
            self.time.as_str(),
            self.depth.as_str(),
            self.position.as_str(),
        ]
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quake(coordinates: Vec<f64>) -> Earthquake {
        Earthquake {
            magnitude: 4.5,
            place: "10km N of Reno, NV".into(),
            occurred_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            coordinates,
        }
    }

    #[test]
    fn test_detail_with_depth() {
        let detail = EarthquakeDetail::with_time(&quake(vec![-119.8, 39.5, 5.2]), "t".into());

        assert_eq!(detail.magnitude, "Magnitude: 4.5");
        assert_eq!(detail.class, "Class: Moderate");
        assert_eq!(detail.location, "Location: 10km N of Reno, NV");
        assert_eq!(detail.depth, "Depth: 5.2 km");
        assert_eq!(detail.position, "Position: 39.500, -119.800");
    }

    #[test]
    fn test_detail_with_short_coordinates() {
        let detail = EarthquakeDetail::with_time(&quake(vec![-119.8]), "t".into());

        assert_eq!(detail.depth, "Depth: Unknown");
        assert_eq!(detail.position, "Position: Unknown");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            error_message(&ErrorKind::Timeout),
            "The request timed out. Please try again."
        );
        assert_eq!(
            error_message(&ErrorKind::BadServerResponse { status: 503 }),
            "Server error (HTTP 503). Please try again later."
        );
        assert_eq!(
            error_message(&ErrorKind::DecodingFailed {
                kind: DecodeErrorKind::MissingKey,
                detail: "missing key `mag` at features[0].properties.mag".into(),
            }),
            "Missing field: missing key `mag` at features[0].properties.mag"
        );
    }

    #[test]
    fn test_legend_covers_every_class() {
        let legend = legend();
        assert_eq!(legend.len(), 5);
        assert_eq!(legend[0].1, "Magnitude < 2.0: Light Earthquake");
        assert_eq!(legend[4].1, "Magnitude >= 7.0: Major Earthquake");
    }

    #[test]
    fn test_list_line() {
        let line = list_line(&quake(vec![]));
        assert!(line.starts_with(" 4.5  2023-11-14 22:13"));
        assert!(line.ends_with("10km N of Reno, NV"));
    }
}
