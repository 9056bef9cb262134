/// The four fixed diagonal slots a configured quadrant can occupy.
///
/// The configuration order decides the slot: the first quadrant goes to
/// `NorthEast`, then clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuadrantSlot {
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl QuadrantSlot {
    pub const ALL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::NorthEast),
            1 => Some(Self::SouthEast),
            2 => Some(Self::SouthWest),
            3 => Some(Self::NorthWest),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::NorthEast => 0,
            Self::SouthEast => 1,
            Self::SouthWest => 2,
            Self::NorthWest => 3,
        }
    }

    /// Bisecting angle in degrees, clockwise from twelve o'clock.
    pub const fn angle_degrees(self) -> f64 {
        match self {
            Self::NorthEast => 45.0,
            Self::SouthEast => 135.0,
            Self::SouthWest => 225.0,
            Self::NorthWest => 315.0,
        }
    }
}

/// Display form of a quadrant name: the first `-` becomes ` & ` and the
/// result is uppercased, so `languages-frameworks` reads
/// `LANGUAGES & FRAMEWORKS`.
pub fn quadrant_heading(name: &str) -> String {
    name.replacen('-', " & ", 1).to_uppercase()
}

pub fn ring_heading(name: &str) -> String {
    name.to_uppercase()
}
