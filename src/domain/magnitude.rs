/// Coarse magnitude buckets used for the legend and list colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MagnitudeClass {
    Unknown,
    Light,
    Minor,
    Moderate,
    Strong,
    Major,
}

impl MagnitudeClass {
    pub const ALL: [MagnitudeClass; 5] = [
        MagnitudeClass::Light,
        MagnitudeClass::Minor,
        MagnitudeClass::Moderate,
        MagnitudeClass::Strong,
        MagnitudeClass::Major,
    ];

    pub fn from_magnitude(magnitude: f64) -> Self {
        if !magnitude.is_finite() {
            return MagnitudeClass::Unknown;
        }
        if magnitude < 2.0 {
            MagnitudeClass::Light
        } else if magnitude < 4.0 {
            MagnitudeClass::Minor
        } else if magnitude < 6.0 {
            MagnitudeClass::Moderate
        } else if magnitude < 7.0 {
            MagnitudeClass::Strong
        } else {
            MagnitudeClass::Major
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MagnitudeClass::Unknown => "Unknown",
            MagnitudeClass::Light => "Light",
            MagnitudeClass::Minor => "Minor",
            MagnitudeClass::Moderate => "Moderate",
            MagnitudeClass::Strong => "Strong",
            MagnitudeClass::Major => "Major",
        }
    }

    pub fn range_description(self) -> &'static str {
        match self {
            MagnitudeClass::Unknown => "Magnitude not reported",
            MagnitudeClass::Light => "Magnitude < 2.0",
            MagnitudeClass::Minor => "Magnitude 2.0 - 3.9",
            MagnitudeClass::Moderate => "Magnitude 4.0 - 5.9",
            MagnitudeClass::Strong => "Magnitude 6.0 - 6.9",
            MagnitudeClass::Major => "Magnitude >= 7.0",
        }
    }
}
