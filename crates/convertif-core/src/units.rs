//! Conversion categories and their category-scoped units.
//!
//! Categories and units are closed enumerations. A [`Unit`] always carries
//! the category it belongs to, so a temperature unit can never be paired
//! with a volume unit by accident.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Top-level conversion domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionCategory {
    Temperature,
    Volume,
}

impl ConversionCategory {
    /// Every supported category.
    pub const ALL: [ConversionCategory; 2] =
        [ConversionCategory::Temperature, ConversionCategory::Volume];

    /// Lower-case identifier used as the lookup key.
    pub fn key(self) -> &'static str {
        match self {
            ConversionCategory::Temperature => "temperature",
            ConversionCategory::Volume => "volume",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ConversionCategory::Temperature => "Temperature",
            ConversionCategory::Volume => "Volume",
        }
    }

    /// Units of this category, in the order an input form lists them.
    pub fn units(self) -> Vec<Unit> {
        match self {
            ConversionCategory::Temperature => TemperatureUnit::ALL
                .iter()
                .copied()
                .map(Unit::Temperature)
                .collect(),
            ConversionCategory::Volume => {
                VolumeUnit::ALL.iter().copied().map(Unit::Volume).collect()
            }
        }
    }
}

impl fmt::Display for ConversionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConversionCategory {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" => Ok(ConversionCategory::Temperature),
            "volume" => Ok(ConversionCategory::Volume),
            other => Err(ConversionError::UnknownCategory(other.to_string())),
        }
    }
}

/// Temperature scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Kelvin,
    Fahrenheit,
    Rankine,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Rankine,
    ];

    pub fn key(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Kelvin => "kelvin",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Rankine => "rankine",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Kelvin => "Kelvin",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Rankine => "Rankine",
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        TemperatureUnit::ALL
            .iter()
            .copied()
            .find(|u| u.key() == normalized)
            .ok_or_else(|| ConversionError::UnknownUnit {
                category: ConversionCategory::Temperature.to_string(),
                unit: normalized,
            })
    }
}

/// Volume units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolumeUnit {
    Liter,
    Gallon,
    Tablespoon,
    CubicInch,
    CubicFoot,
    Cup,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 6] = [
        VolumeUnit::Liter,
        VolumeUnit::Gallon,
        VolumeUnit::Tablespoon,
        VolumeUnit::CubicInch,
        VolumeUnit::CubicFoot,
        VolumeUnit::Cup,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "liter",
            VolumeUnit::Gallon => "gallon",
            VolumeUnit::Tablespoon => "tablespoon",
            VolumeUnit::CubicInch => "cubic-inch",
            VolumeUnit::CubicFoot => "cubic-foot",
            VolumeUnit::Cup => "cup",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "Liter",
            VolumeUnit::Gallon => "Gallon",
            VolumeUnit::Tablespoon => "Tablespoon",
            VolumeUnit::CubicInch => "Cubic Inch",
            VolumeUnit::CubicFoot => "Cubic Foot",
            VolumeUnit::Cup => "Cup",
        }
    }
}

impl FromStr for VolumeUnit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        VolumeUnit::ALL
            .iter()
            .copied()
            .find(|u| u.key() == normalized)
            .ok_or_else(|| ConversionError::UnknownUnit {
                category: ConversionCategory::Volume.to_string(),
                unit: normalized,
            })
    }
}

/// A measurement unit, tagged with its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "category", content = "unit", rename_all = "lowercase")]
pub enum Unit {
    Temperature(TemperatureUnit),
    Volume(VolumeUnit),
}

impl Unit {
    /// Parse a unit identifier within `category`.
    ///
    /// Matching is case-insensitive. A key that only exists in another
    /// category is rejected.
    pub fn parse(category: ConversionCategory, s: &str) -> Result<Unit, ConversionError> {
        match category {
            ConversionCategory::Temperature => s.parse().map(Unit::Temperature),
            ConversionCategory::Volume => s.parse().map(Unit::Volume),
        }
    }

    pub fn category(self) -> ConversionCategory {
        match self {
            Unit::Temperature(_) => ConversionCategory::Temperature,
            Unit::Volume(_) => ConversionCategory::Volume,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Unit::Temperature(u) => u.key(),
            Unit::Volume(u) => u.key(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Unit::Temperature(u) => u.label(),
            Unit::Volume(u) => u.label(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
