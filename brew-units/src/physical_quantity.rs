//! Physical quantities and systems of measurement
//!
//! Both sets are closed and known at compile time. Every amount the brewing
//! model stores belongs to exactly one `PhysicalQuantity`, and every unit
//! system belongs to exactly one `SystemOfMeasurement`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of measurable property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PhysicalQuantity {
    Mass,
    Volume,
    Time,
    Temperature,
    Color,
    /// Specific gravity and friends
    Density,
    DiastaticPower,
    Acidity,
    Bitterness,
    Carbonation,
    SpecificHeatCapacity,
}

impl PhysicalQuantity {
    /// Every physical quantity, in registry order
    pub const ALL: [PhysicalQuantity; 11] = [
        PhysicalQuantity::Mass,
        PhysicalQuantity::Volume,
        PhysicalQuantity::Time,
        PhysicalQuantity::Temperature,
        PhysicalQuantity::Color,
        PhysicalQuantity::Density,
        PhysicalQuantity::DiastaticPower,
        PhysicalQuantity::Acidity,
        PhysicalQuantity::Bitterness,
        PhysicalQuantity::Carbonation,
        PhysicalQuantity::SpecificHeatCapacity,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            PhysicalQuantity::Mass => "Mass",
            PhysicalQuantity::Volume => "Volume",
            PhysicalQuantity::Time => "Time",
            PhysicalQuantity::Temperature => "Temperature",
            PhysicalQuantity::Color => "Color",
            PhysicalQuantity::Density => "Density",
            PhysicalQuantity::DiastaticPower => "Diastatic Power",
            PhysicalQuantity::Acidity => "Acidity",
            PhysicalQuantity::Bitterness => "Bitterness",
            PhysicalQuantity::Carbonation => "Carbonation",
            PhysicalQuantity::SpecificHeatCapacity => "Specific Heat Capacity",
        }
    }

    /// Key under which the chosen display unit system is persisted.
    ///
    /// These strings are stored in user settings files and must never change.
    pub fn settings_name(&self) -> &'static str {
        match self {
            PhysicalQuantity::Mass => "unitSystem_mass",
            PhysicalQuantity::Volume => "unitSystem_volume",
            PhysicalQuantity::Time => "unitSystem_time",
            PhysicalQuantity::Temperature => "unitSystem_temperature",
            PhysicalQuantity::Color => "unitSystem_color",
            PhysicalQuantity::Density => "unitSystem_density",
            PhysicalQuantity::DiastaticPower => "unitSystem_diastaticPower",
            PhysicalQuantity::Acidity => "unitSystem_acidity",
            PhysicalQuantity::Bitterness => "unitSystem_bitterness",
            PhysicalQuantity::Carbonation => "unitSystem_carbonation",
            PhysicalQuantity::SpecificHeatCapacity => "unitSystem_specificHeatCapacity",
        }
    }

    /// Parse a quantity from its display name or a loose spelling ("diastatic_power", "SHC")
    pub fn from_name(name: &str) -> Option<PhysicalQuantity> {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "mass" | "weight" => Some(PhysicalQuantity::Mass),
            "volume" => Some(PhysicalQuantity::Volume),
            "time" => Some(PhysicalQuantity::Time),
            "temperature" | "temp" => Some(PhysicalQuantity::Temperature),
            "color" | "colour" => Some(PhysicalQuantity::Color),
            "density" | "gravity" => Some(PhysicalQuantity::Density),
            "diastaticpower" => Some(PhysicalQuantity::DiastaticPower),
            "acidity" | "ph" => Some(PhysicalQuantity::Acidity),
            "bitterness" => Some(PhysicalQuantity::Bitterness),
            "carbonation" => Some(PhysicalQuantity::Carbonation),
            "specificheatcapacity" | "shc" => Some(PhysicalQuantity::SpecificHeatCapacity),
            _ => None,
        }
    }
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A named family of units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemOfMeasurement {
    Metric,
    UsCustomary,
    Imperial,
    StandardTimeUnits,
    StandardReferenceMethod,
    EuropeanBreweryConvention,
    SpecificGravity,
    Plato,
    Lintner,
    WindischKolbach,
    Ph,
    InternationalBitternessUnits,
    CarbonationVolumes,
    CarbonationMassPerVolume,
    SpecificHeatCapacityCalories,
    SpecificHeatCapacityJoules,
}

impl SystemOfMeasurement {
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemOfMeasurement::Metric => "Metric",
            SystemOfMeasurement::UsCustomary => "US Customary",
            SystemOfMeasurement::Imperial => "Imperial",
            SystemOfMeasurement::StandardTimeUnits => "Standard Time Units",
            SystemOfMeasurement::StandardReferenceMethod => "Standard Reference Method (SRM)",
            SystemOfMeasurement::EuropeanBreweryConvention => "European Brewery Convention (EBC)",
            SystemOfMeasurement::SpecificGravity => "Specific Gravity",
            SystemOfMeasurement::Plato => "Plato",
            SystemOfMeasurement::Lintner => "Lintner",
            SystemOfMeasurement::WindischKolbach => "Windisch Kolbach",
            SystemOfMeasurement::Ph => "pH",
            SystemOfMeasurement::InternationalBitternessUnits => "International Bitterness Units (IBUs)",
            SystemOfMeasurement::CarbonationVolumes => "Volumes",
            SystemOfMeasurement::CarbonationMassPerVolume => "Mass Per Volume",
            SystemOfMeasurement::SpecificHeatCapacityCalories => "Calories per gram degree Celsius",
            SystemOfMeasurement::SpecificHeatCapacityJoules => "Joules per kilogram Kelvin",
        }
    }

    /// Parse a system of measurement from loose user input ("us", "imperial", "ebc")
    pub fn from_name(name: &str) -> Option<SystemOfMeasurement> {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "metric" | "si" => Some(SystemOfMeasurement::Metric),
            "us" | "uscustomary" => Some(SystemOfMeasurement::UsCustomary),
            "imperial" | "uk" => Some(SystemOfMeasurement::Imperial),
            "time" | "standardtimeunits" => Some(SystemOfMeasurement::StandardTimeUnits),
            "srm" | "standardreferencemethod" => Some(SystemOfMeasurement::StandardReferenceMethod),
            "ebc" | "europeanbreweryconvention" => Some(SystemOfMeasurement::EuropeanBreweryConvention),
            "sg" | "specificgravity" => Some(SystemOfMeasurement::SpecificGravity),
            "plato" => Some(SystemOfMeasurement::Plato),
            "lintner" => Some(SystemOfMeasurement::Lintner),
            "wk" | "windischkolbach" => Some(SystemOfMeasurement::WindischKolbach),
            "ph" => Some(SystemOfMeasurement::Ph),
            "ibu" | "ibus" => Some(SystemOfMeasurement::InternationalBitternessUnits),
            "volumes" | "carbonationvolumes" => Some(SystemOfMeasurement::CarbonationVolumes),
            "massvolume" | "carbonationmasspervolume" => Some(SystemOfMeasurement::CarbonationMassPerVolume),
            "calories" => Some(SystemOfMeasurement::SpecificHeatCapacityCalories),
            "joules" => Some(SystemOfMeasurement::SpecificHeatCapacityJoules),
            _ => None,
        }
    }
}

impl fmt::Display for SystemOfMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
