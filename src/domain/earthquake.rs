use chrono::{DateTime, Utc};

use super::MagnitudeClass;

/// A single seismic event as the rest of the application sees it.
///
/// The feed gives no stable identifier, so two earthquakes are the same
/// exactly when all their fields are.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub magnitude: f64,
    pub place: String,
    pub occurred_at: DateTime<Utc>,
    /// `[longitude, latitude, depth_km]`, passed through from the feed
    /// without length checks. Read it through [`Earthquake::position`] and
    /// [`Earthquake::depth_km`].
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
}

impl Earthquake {
    /// Position on the map, or `None` when the feed sent fewer than two
    /// coordinates.
    pub fn position(&self) -> Option<Position> {
        match self.coordinates.as_slice() {
            [longitude, latitude, ..] => Some(Position {
                longitude: *longitude,
                latitude: *latitude,
            }),
            _ => None,
        }
    }

    pub fn depth_km(&self) -> Option<f64> {
        self.coordinates.get(2).copied()
    }

    pub fn magnitude_class(&self) -> MagnitudeClass {
        MagnitudeClass::from_magnitude(self.magnitude)
    }

    pub fn display_place(&self) -> &str {
        if self.place.trim().is_empty() {
            "(Unknown location)"
        } else {
            &self.place
        }
    }

    /// Case-insensitive substring match on the place name.
    /// `needle` must already be lowercased.
    pub fn place_contains(&self, needle: &str) -> bool {
        self.place.to_lowercase().contains(needle)
    }
}
