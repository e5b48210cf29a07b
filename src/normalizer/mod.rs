use chrono::{DateTime, TimeZone, Utc};

use crate::decoder::{self, DecodeError, RawFeatureRecord};
use crate::domain::Earthquake;

/// Turns feed payloads into domain earthquakes.
#[derive(Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Decodes `body` and maps every feature, preserving feed order.
    pub fn normalize(&self, body: &[u8]) -> Result<Vec<Earthquake>, DecodeError> {
        decoder::decode(body).map(map_all)
    }
}

pub fn map_all(records: Vec<RawFeatureRecord>) -> Vec<Earthquake> {
    records.into_iter().map(map).collect()
}

pub fn map(record: RawFeatureRecord) -> Earthquake {
    Earthquake {
        magnitude: record.mag,
        place: record.place,
        occurred_at: occurred_at(record.time),
        coordinates: record.coordinates,
    }
}

/// Converts feed milliseconds to an instant with whole-second precision.
///
/// Integer division truncates toward zero, so any sub-second part is
/// dropped. Timestamps outside chrono's range map to the Unix epoch.
pub fn occurred_at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(millis / 1000, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mag: f64, place: &str, time: i64) -> RawFeatureRecord {
        RawFeatureRecord {
            mag,
            place: place.into(),
            time,
            coordinates: vec![-119.8, 39.5, 5.2],
        }
    }

    #[test]
    fn test_map_reno() {
        let quake = map(record(4.5, "10km N of Reno, NV", 1_700_000_000_000));

        assert_eq!(quake.magnitude, 4.5);
        assert_eq!(quake.place, "10km N of Reno, NV");
        assert_eq!(quake.coordinates, vec![-119.8, 39.5, 5.2]);
        assert_eq!(quake.occurred_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_sub_second_precision_is_truncated() {
        assert_eq!(occurred_at(1_700_000_000_999).timestamp(), 1_700_000_000);
        assert_eq!(occurred_at(1_700_000_000_999).timestamp_subsec_millis(), 0);
        assert_eq!(occurred_at(999).timestamp(), 0);
    }

    #[test]
    fn test_negative_times_truncate_toward_zero() {
        assert_eq!(occurred_at(-1_500).timestamp(), -1);
    }

    #[test]
    fn test_out_of_range_time_maps_to_epoch() {
        assert_eq!(occurred_at(i64::MAX), DateTime::<Utc>::default());
    }

    #[test]
    fn test_coordinates_pass_through_unvalidated() {
        let mut raw = record(1.0, "x", 0);
        raw.coordinates = vec![1.0];
        assert_eq!(map(raw).coordinates, vec![1.0]);
    }

    #[test]
    fn test_normalize_keeps_length_and_order() {
        let body = br#"{"features":[
            {"properties":{"mag":1.0,"place":"a","time":1000},"geometry":{"coordinates":[0,0]}},
            {"properties":{"mag":2.0,"place":"b","time":2000},"geometry":{"coordinates":[0,0]}},
            {"properties":{"mag":3.0,"place":"c","time":3000},"geometry":{"coordinates":[0,0]}}
        ]}"#;

        let quakes = Normalizer::new().normalize(body).unwrap();
        let places: Vec<_> = quakes.iter().map(|q| q.place.as_str()).collect();
        assert_eq!(places, vec!["a", "b", "c"]);
        assert_eq!(quakes[2].occurred_at.timestamp(), 3);
    }
}
