//! Unit systems: the units of one physical quantity within one system of measurement
//!
//! A `UnitSystem` knows which of its units to use at each relative scale, how
//! to render a canonical amount for display and how to read typed input back
//! into a canonical amount.

use serde::{Deserialize, Serialize};
use std::fmt;

use brew_core::Locale;
use tracing::warn;

use crate::amount::Amount;
use crate::parse::split_amount_text;
use crate::physical_quantity::PhysicalQuantity as Pq;
use crate::physical_quantity::SystemOfMeasurement as Som;
use crate::unit::Unit;
use crate::units;

/// Selector among the units of one system, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RelativeScale {
    ExtraSmall,
    Small,
    Medium,
    Large,
    ExtraLarge,
    Huge,
}

impl RelativeScale {
    pub const ALL: [RelativeScale; 6] = [
        RelativeScale::ExtraSmall,
        RelativeScale::Small,
        RelativeScale::Medium,
        RelativeScale::Large,
        RelativeScale::ExtraLarge,
        RelativeScale::Huge,
    ];

    pub fn from_name(name: &str) -> Option<RelativeScale> {
        let key: String = name
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "extrasmall" | "xs" => Some(RelativeScale::ExtraSmall),
            "small" | "s" => Some(RelativeScale::Small),
            "medium" | "m" => Some(RelativeScale::Medium),
            "large" | "l" => Some(RelativeScale::Large),
            "extralarge" | "xl" => Some(RelativeScale::ExtraLarge),
            "huge" => Some(RelativeScale::Huge),
            _ => None,
        }
    }
}

impl fmt::Display for RelativeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The units of one physical quantity in one system of measurement
#[derive(Debug)]
pub struct UnitSystem {
    /// Stable name used as the persistence key, e.g. "volume_UsCustomary"
    pub unique_name: &'static str,
    pub physical_quantity: Pq,
    pub system_of_measurement: Som,
    default_unit: &'static Unit,
    /// Unit used for the volume or mass side of a mash thickness ratio
    thickness_unit: Option<&'static Unit>,
    /// Every unit accepted when parsing input in this system
    units: &'static [&'static Unit],
    /// Units used for display, ascending by scale
    scales: &'static [(RelativeScale, &'static Unit)],
}

pub static MASS_METRIC: UnitSystem = UnitSystem {
    unique_name: "mass_Metric",
    physical_quantity: Pq::Mass,
    system_of_measurement: Som::Metric,
    default_unit: &units::KILOGRAMS,
    thickness_unit: Some(&units::KILOGRAMS),
    units: &[&units::KILOGRAMS, &units::GRAMS, &units::MILLIGRAMS],
    scales: &[
        (RelativeScale::ExtraSmall, &units::MILLIGRAMS),
        (RelativeScale::Small, &units::GRAMS),
        (RelativeScale::Large, &units::KILOGRAMS),
    ],
};

pub static MASS_US_CUSTOMARY: UnitSystem = UnitSystem {
    unique_name: "mass_UsCustomary",
    physical_quantity: Pq::Mass,
    system_of_measurement: Som::UsCustomary,
    default_unit: &units::POUNDS,
    thickness_unit: Some(&units::POUNDS),
    units: &[&units::POUNDS, &units::OUNCES],
    scales: &[(RelativeScale::Small, &units::OUNCES), (RelativeScale::Large, &units::POUNDS)],
};

pub static MASS_IMPERIAL: UnitSystem = UnitSystem {
    unique_name: "mass_Imperial",
    physical_quantity: Pq::Mass,
    system_of_measurement: Som::Imperial,
    default_unit: &units::POUNDS,
    thickness_unit: Some(&units::POUNDS),
    units: &[&units::POUNDS, &units::OUNCES],
    scales: &[(RelativeScale::Small, &units::OUNCES), (RelativeScale::Large, &units::POUNDS)],
};

pub static VOLUME_METRIC: UnitSystem = UnitSystem {
    unique_name: "volume_Metric",
    physical_quantity: Pq::Volume,
    system_of_measurement: Som::Metric,
    default_unit: &units::LITERS,
    thickness_unit: Some(&units::LITERS),
    units: &[&units::LITERS, &units::MILLILITERS],
    scales: &[(RelativeScale::Small, &units::MILLILITERS), (RelativeScale::Large, &units::LITERS)],
};

pub static VOLUME_US_CUSTOMARY: UnitSystem = UnitSystem {
    unique_name: "volume_UsCustomary",
    physical_quantity: Pq::Volume,
    system_of_measurement: Som::UsCustomary,
    default_unit: &units::US_GALLONS,
    thickness_unit: Some(&units::US_QUARTS),
    units: &[
        &units::US_TEASPOONS,
        &units::US_TABLESPOONS,
        &units::US_CUPS,
        &units::US_PINTS,
        &units::US_QUARTS,
        &units::US_GALLONS,
        &units::US_BARRELS,
    ],
    scales: &[
        (RelativeScale::ExtraSmall, &units::US_TEASPOONS),
        (RelativeScale::Small, &units::US_TABLESPOONS),
        (RelativeScale::Medium, &units::US_CUPS),
        (RelativeScale::Large, &units::US_QUARTS),
        (RelativeScale::ExtraLarge, &units::US_GALLONS),
        (RelativeScale::Huge, &units::US_BARRELS),
    ],
};

pub static VOLUME_IMPERIAL: UnitSystem = UnitSystem {
    unique_name: "volume_Imperial",
    physical_quantity: Pq::Volume,
    system_of_measurement: Som::Imperial,
    default_unit: &units::IMPERIAL_GALLONS,
    thickness_unit: Some(&units::IMPERIAL_QUARTS),
    units: &[
        &units::IMPERIAL_TEASPOONS,
        &units::IMPERIAL_TABLESPOONS,
        &units::IMPERIAL_CUPS,
        &units::IMPERIAL_PINTS,
        &units::IMPERIAL_QUARTS,
        &units::IMPERIAL_GALLONS,
        &units::IMPERIAL_BARRELS,
    ],
    scales: &[
        (RelativeScale::ExtraSmall, &units::IMPERIAL_TEASPOONS),
        (RelativeScale::Small, &units::IMPERIAL_TABLESPOONS),
        (RelativeScale::Medium, &units::IMPERIAL_CUPS),
        (RelativeScale::Large, &units::IMPERIAL_QUARTS),
        (RelativeScale::ExtraLarge, &units::IMPERIAL_GALLONS),
        (RelativeScale::Huge, &units::IMPERIAL_BARRELS),
    ],
};

pub static TIME_STANDARD: UnitSystem = UnitSystem {
    unique_name: "time_StandardTimeUnits",
    physical_quantity: Pq::Time,
    system_of_measurement: Som::StandardTimeUnits,
    default_unit: &units::MINUTES,
    thickness_unit: None,
    units: &[&units::MINUTES, &units::SECONDS, &units::HOURS, &units::DAYS],
    scales: &[
        (RelativeScale::ExtraSmall, &units::SECONDS),
        (RelativeScale::Small, &units::MINUTES),
        (RelativeScale::Medium, &units::HOURS),
        (RelativeScale::Large, &units::DAYS),
    ],
};

// Temperatures are never rescaled, so these systems have no scale table
pub static TEMPERATURE_METRIC: UnitSystem = UnitSystem {
    unique_name: "temperature_Metric",
    physical_quantity: Pq::Temperature,
    system_of_measurement: Som::Metric,
    default_unit: &units::CELSIUS,
    thickness_unit: None,
    units: &[&units::CELSIUS, &units::KELVIN],
    scales: &[],
};

pub static TEMPERATURE_US_CUSTOMARY: UnitSystem = UnitSystem {
    unique_name: "temperature_UsCustomary",
    physical_quantity: Pq::Temperature,
    system_of_measurement: Som::UsCustomary,
    default_unit: &units::FAHRENHEIT,
    thickness_unit: None,
    units: &[&units::FAHRENHEIT],
    scales: &[],
};

pub static COLOR_SRM: UnitSystem = UnitSystem {
    unique_name: "color_StandardReferenceMethod",
    physical_quantity: Pq::Color,
    system_of_measurement: Som::StandardReferenceMethod,
    default_unit: &units::SRM,
    thickness_unit: None,
    units: &[&units::SRM, &units::LOVIBOND],
    scales: &[],
};

pub static COLOR_EBC: UnitSystem = UnitSystem {
    unique_name: "color_EuropeanBreweryConvention",
    physical_quantity: Pq::Color,
    system_of_measurement: Som::EuropeanBreweryConvention,
    default_unit: &units::EBC,
    thickness_unit: None,
    units: &[&units::EBC],
    scales: &[],
};

pub static DENSITY_SPECIFIC_GRAVITY: UnitSystem = UnitSystem {
    unique_name: "density_SpecificGravity",
    physical_quantity: Pq::Density,
    system_of_measurement: Som::SpecificGravity,
    default_unit: &units::SP_GRAV,
    thickness_unit: None,
    units: &[&units::SP_GRAV],
    scales: &[],
};

pub static DENSITY_PLATO: UnitSystem = UnitSystem {
    unique_name: "density_Plato",
    physical_quantity: Pq::Density,
    system_of_measurement: Som::Plato,
    default_unit: &units::PLATO,
    thickness_unit: None,
    units: &[&units::PLATO],
    scales: &[],
};

pub static DIASTATIC_POWER_LINTNER: UnitSystem = UnitSystem {
    unique_name: "diastaticPower_Lintner",
    physical_quantity: Pq::DiastaticPower,
    system_of_measurement: Som::Lintner,
    default_unit: &units::LINTNER,
    thickness_unit: None,
    units: &[&units::LINTNER],
    scales: &[],
};

pub static DIASTATIC_POWER_WK: UnitSystem = UnitSystem {
    unique_name: "diastaticPower_WindischKolbach",
    physical_quantity: Pq::DiastaticPower,
    system_of_measurement: Som::WindischKolbach,
    default_unit: &units::WK,
    thickness_unit: None,
    units: &[&units::WK],
    scales: &[],
};

pub static ACIDITY_PH: UnitSystem = UnitSystem {
    unique_name: "acidity_Ph",
    physical_quantity: Pq::Acidity,
    system_of_measurement: Som::Ph,
    default_unit: &units::PH,
    thickness_unit: None,
    units: &[&units::PH],
    scales: &[],
};

pub static BITTERNESS_IBU: UnitSystem = UnitSystem {
    unique_name: "bitterness_InternationalBitternessUnits",
    physical_quantity: Pq::Bitterness,
    system_of_measurement: Som::InternationalBitternessUnits,
    default_unit: &units::IBU,
    thickness_unit: None,
    units: &[&units::IBU],
    scales: &[],
};

pub static CARBONATION_VOLUMES: UnitSystem = UnitSystem {
    unique_name: "carbonation_Volumes",
    physical_quantity: Pq::Carbonation,
    system_of_measurement: Som::CarbonationVolumes,
    default_unit: &units::CARBONATION_VOLUMES,
    thickness_unit: None,
    units: &[&units::CARBONATION_VOLUMES],
    scales: &[],
};

pub static CARBONATION_MASS_PER_VOLUME: UnitSystem = UnitSystem {
    unique_name: "carbonation_MassPerVolume",
    physical_quantity: Pq::Carbonation,
    system_of_measurement: Som::CarbonationMassPerVolume,
    default_unit: &units::CARBONATION_GRAMS_PER_LITER,
    thickness_unit: None,
    units: &[&units::CARBONATION_GRAMS_PER_LITER],
    scales: &[],
};

pub static SPECIFIC_HEAT_CAPACITY_CALORIES: UnitSystem = UnitSystem {
    unique_name: "specificHeatCapacity_Calories",
    physical_quantity: Pq::SpecificHeatCapacity,
    system_of_measurement: Som::SpecificHeatCapacityCalories,
    default_unit: &units::CALORIES_PER_CELSIUS_PER_GRAM,
    thickness_unit: None,
    units: &[&units::CALORIES_PER_CELSIUS_PER_GRAM],
    scales: &[],
};

pub static SPECIFIC_HEAT_CAPACITY_JOULES: UnitSystem = UnitSystem {
    unique_name: "specificHeatCapacity_Joules",
    physical_quantity: Pq::SpecificHeatCapacity,
    system_of_measurement: Som::SpecificHeatCapacityJoules,
    default_unit: &units::JOULES_PER_KELVIN_PER_KG,
    thickness_unit: None,
    units: &[&units::JOULES_PER_KELVIN_PER_KG],
    scales: &[],
};

static ALL_UNIT_SYSTEMS: [&UnitSystem; 21] = [
    &MASS_METRIC,
    &MASS_US_CUSTOMARY,
    &MASS_IMPERIAL,
    &VOLUME_METRIC,
    &VOLUME_US_CUSTOMARY,
    &VOLUME_IMPERIAL,
    &TIME_STANDARD,
    &TEMPERATURE_METRIC,
    &TEMPERATURE_US_CUSTOMARY,
    &COLOR_SRM,
    &COLOR_EBC,
    &DENSITY_SPECIFIC_GRAVITY,
    &DENSITY_PLATO,
    &DIASTATIC_POWER_LINTNER,
    &DIASTATIC_POWER_WK,
    &ACIDITY_PH,
    &BITTERNESS_IBU,
    &CARBONATION_VOLUMES,
    &CARBONATION_MASS_PER_VOLUME,
    &SPECIFIC_HEAT_CAPACITY_CALORIES,
    &SPECIFIC_HEAT_CAPACITY_JOULES,
];

impl UnitSystem {
    /// Every registered unit system
    pub fn all() -> &'static [&'static UnitSystem] {
        &ALL_UNIT_SYSTEMS
    }

    /// Unit systems available for one physical quantity
    pub fn for_physical_quantity(physical_quantity: Pq) -> impl Iterator<Item = &'static UnitSystem> {
        ALL_UNIT_SYSTEMS
            .iter()
            .copied()
            .filter(move |us| us.physical_quantity == physical_quantity)
    }

    /// The unit system for a system of measurement and physical quantity, if one exists
    pub fn get_instance(system_of_measurement: Som, physical_quantity: Pq) -> Option<&'static UnitSystem> {
        ALL_UNIT_SYSTEMS
            .iter()
            .copied()
            .find(|us| us.system_of_measurement == system_of_measurement && us.physical_quantity == physical_quantity)
    }

    /// Look up a unit system by its persisted name
    pub fn get_instance_by_unique_name(name: &str) -> Option<&'static UnitSystem> {
        ALL_UNIT_SYSTEMS.iter().copied().find(|us| us.unique_name == name)
    }

    /// The unit for `scale`, if this system has one at that scale
    pub fn scale_unit(&self, scale: RelativeScale) -> Option<&'static Unit> {
        self.scales.iter().find(|(s, _)| *s == scale).map(|(_, unit)| *unit)
    }

    /// Scale table, smallest first
    pub fn scales(&self) -> impl Iterator<Item = (RelativeScale, &'static Unit)> + '_ {
        self.scales.iter().copied()
    }

    /// The unit used when no scale is forced
    pub fn unit(&self) -> &'static Unit {
        self.default_unit
    }

    pub fn thickness_unit(&self) -> Option<&'static Unit> {
        self.thickness_unit
    }

    pub fn units(&self) -> &'static [&'static Unit] {
        self.units
    }

    /// Whether `unit` is one of this system's units
    pub fn contains(&self, unit: &Unit) -> bool {
        self.units.iter().any(|u| *u == unit)
    }

    /// The unit for a forced scale, or the default unit if this system lacks that scale
    fn forced_scale_unit(&self, scale: RelativeScale) -> &'static Unit {
        self.scale_unit(scale).unwrap_or_else(|| {
            warn!(
                %scale,
                unit_system = self.unique_name,
                fallback = self.default_unit.name,
                "invalid relative scale for unit system"
            );
            self.default_unit
        })
    }

    /// The unit to display `canonical` in: the forced scale if given, otherwise
    /// the largest scaled unit in which the value is at least 1
    fn display_unit(&self, canonical: f64, forced_scale: Option<RelativeScale>) -> &'static Unit {
        if let Some(scale) = forced_scale {
            return self.forced_scale_unit(scale);
        }

        if self.scales.is_empty() || canonical == 0.0 {
            return self.default_unit;
        }

        self.scales
            .iter()
            .rev()
            .map(|(_, unit)| *unit)
            .find(|unit| unit.from_canonical(canonical).abs() >= 1.0)
            .unwrap_or(self.scales[0].1)
    }

    fn canonical_quantity(&self, amount: &Amount) -> f64 {
        assert_eq!(
            amount.unit().physical_quantity,
            self.physical_quantity,
            "amount in {} given to unit system {}",
            amount.unit(),
            self.unique_name
        );
        amount.to_canonical().quantity()
    }

    /// Render `amount` as "<number> <unit>" in this system
    pub fn display_amount(
        &self,
        locale: &Locale,
        amount: &Amount,
        precision: usize,
        forced_scale: Option<RelativeScale>,
    ) -> String {
        let canonical = self.canonical_quantity(amount);
        let unit = self.display_unit(canonical, forced_scale);
        format!("{} {}", locale.format_fixed(unit.from_canonical(canonical), precision), unit.name)
    }

    /// The numeric value of `amount` in the forced scale's unit, or the default unit
    pub fn amount_display(&self, amount: &Amount, forced_scale: Option<RelativeScale>) -> f64 {
        let canonical = self.canonical_quantity(amount);
        let unit = match forced_scale {
            Some(scale) => self.forced_scale_unit(scale),
            None => self.default_unit,
        };
        unit.from_canonical(canonical)
    }

    /// Read typed input ("5.5 gal", "12", "3 qt") as a canonical amount.
    ///
    /// A recognised unit token wins; otherwise the number is taken to be in
    /// `default_unit`. Unparseable text yields zero.
    pub fn qstring_to_si(&self, locale: &Locale, input: &str, default_unit: &'static Unit) -> Amount {
        let (value, token) = split_amount_text(locale, input).unwrap_or((0.0, None));

        let unit = match token {
            Some(token) => match Unit::get_unit(token, self.physical_quantity, Some(self)) {
                Some(unit) => unit,
                None => {
                    warn!(
                        input,
                        token,
                        quantity = %self.physical_quantity,
                        default = default_unit.name,
                        "unrecognised unit, using default"
                    );
                    default_unit
                }
            },
            None => default_unit,
        };

        Amount::new(unit.to_canonical(value), unit.canonical())
    }
}

impl PartialEq for UnitSystem {
    fn eq(&self, other: &Self) -> bool {
        self.unique_name == other.unique_name
    }
}

impl Eq for UnitSystem {}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unique_name)
    }
}
