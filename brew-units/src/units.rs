//! Unit definitions - every unit the brewing model understands
//!
//! Canonical units (factor 1) come first in each group. US Customary and
//! Imperial volumes deliberately share names; `Unit::get_unit` sorts that out.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::physical_quantity::PhysicalQuantity as Pq;
use crate::physical_quantity::SystemOfMeasurement as Som;
use crate::unit::{Conversion, Unit};

// ========== Mass (canonical: kilograms) ==========

pub static KILOGRAMS: Unit = Unit::new("kg", &["kilogram", "kilograms", "kilo", "kilos"], Pq::Mass, Som::Metric, 1.0);
pub static GRAMS: Unit = Unit::new("g", &["gram", "grams"], Pq::Mass, Som::Metric, 0.001);
pub static MILLIGRAMS: Unit = Unit::new("mg", &["milligram", "milligrams"], Pq::Mass, Som::Metric, 0.000001);
// Avoirdupois pounds and ounces are the same in US Customary and Imperial
pub static POUNDS: Unit = Unit::new("lb", &["lbs", "pound", "pounds"], Pq::Mass, Som::UsCustomary, 0.45359237);
pub static OUNCES: Unit = Unit::new("oz", &["ounce", "ounces"], Pq::Mass, Som::UsCustomary, 0.028349523125);

// ========== Volume (canonical: liters) ==========

pub static LITERS: Unit = Unit::new("L", &["liter", "liters", "litre", "litres"], Pq::Volume, Som::Metric, 1.0);
pub static MILLILITERS: Unit = Unit::new("mL", &["milliliter", "milliliters", "millilitre", "millilitres"], Pq::Volume, Som::Metric, 0.001);

pub static US_TEASPOONS: Unit = Unit::new("tsp", &["teaspoon", "teaspoons"], Pq::Volume, Som::UsCustomary, 0.00492892159375);
pub static US_TABLESPOONS: Unit = Unit::new("tbsp", &["tablespoon", "tablespoons"], Pq::Volume, Som::UsCustomary, 0.01478676478125);
pub static US_CUPS: Unit = Unit::new("cup", &["cups"], Pq::Volume, Som::UsCustomary, 0.2365882365);
pub static US_PINTS: Unit = Unit::new("pt", &["pint", "pints"], Pq::Volume, Som::UsCustomary, 0.473176473);
pub static US_QUARTS: Unit = Unit::new("qt", &["quart", "quarts"], Pq::Volume, Som::UsCustomary, 0.946352946);
pub static US_GALLONS: Unit = Unit::new("gal", &["gallon", "gallons"], Pq::Volume, Som::UsCustomary, 3.785411784);
// US beer barrel, 31 US gallons
pub static US_BARRELS: Unit = Unit::new("bbl", &["barrel", "barrels"], Pq::Volume, Som::UsCustomary, 117.347765304);

pub static IMPERIAL_TEASPOONS: Unit = Unit::new("tsp", &["teaspoon", "teaspoons"], Pq::Volume, Som::Imperial, 0.00591938802083333);
pub static IMPERIAL_TABLESPOONS: Unit = Unit::new("tbsp", &["tablespoon", "tablespoons"], Pq::Volume, Som::Imperial, 0.0177581640625);
pub static IMPERIAL_CUPS: Unit = Unit::new("cup", &["cups"], Pq::Volume, Som::Imperial, 0.284130625);
pub static IMPERIAL_PINTS: Unit = Unit::new("pt", &["pint", "pints"], Pq::Volume, Som::Imperial, 0.56826125);
pub static IMPERIAL_QUARTS: Unit = Unit::new("qt", &["quart", "quarts"], Pq::Volume, Som::Imperial, 1.1365225);
pub static IMPERIAL_GALLONS: Unit = Unit::new("gal", &["gallon", "gallons"], Pq::Volume, Som::Imperial, 4.54609);
// Imperial beer barrel, 36 imperial gallons
pub static IMPERIAL_BARRELS: Unit = Unit::new("bbl", &["barrel", "barrels"], Pq::Volume, Som::Imperial, 163.65924);

// ========== Time (canonical: minutes) ==========

pub static MINUTES: Unit = Unit::new("min", &["minute", "minutes", "mins"], Pq::Time, Som::StandardTimeUnits, 1.0);
pub static SECONDS: Unit = Unit::new("s", &["sec", "second", "seconds"], Pq::Time, Som::StandardTimeUnits, 1.0 / 60.0);
pub static HOURS: Unit = Unit::new("hr", &["h", "hour", "hours", "hrs"], Pq::Time, Som::StandardTimeUnits, 60.0);
pub static DAYS: Unit = Unit::new("day", &["d", "days"], Pq::Time, Som::StandardTimeUnits, 1440.0);

// ========== Temperature (canonical: Celsius) ==========

pub static CELSIUS: Unit = Unit::new("C", &["°C", "celsius", "degC"], Pq::Temperature, Som::Metric, 1.0);
pub static KELVIN: Unit = Unit::with_offset("K", &["kelvin"], Pq::Temperature, Som::Metric, 1.0, -273.15);
// C = (F - 32) * 5/9
pub static FAHRENHEIT: Unit = Unit::with_offset(
    "F",
    &["°F", "fahrenheit", "degF"],
    Pq::Temperature,
    Som::UsCustomary,
    5.0 / 9.0,
    -32.0 * 5.0 / 9.0,
);

// ========== Color (canonical: SRM) ==========

pub static SRM: Unit = Unit::new("srm", &[], Pq::Color, Som::StandardReferenceMethod, 1.0);
// SRM = 1.3546 * °L - 0.76
pub static LOVIBOND: Unit = Unit::with_offset("°L", &["lovibond"], Pq::Color, Som::StandardReferenceMethod, 1.3546, -0.76);
pub static EBC: Unit = Unit::new("ebc", &[], Pq::Color, Som::EuropeanBreweryConvention, 1.0 / 1.97);

// ========== Density (canonical: specific gravity) ==========

pub static SP_GRAV: Unit = Unit::new("sg", &["SG"], Pq::Density, Som::SpecificGravity, 1.0);
pub static PLATO: Unit = Unit::with_conversion("P", &["°P", "plato"], Pq::Density, Som::Plato, Conversion::PlatoToGravity);

// ========== Diastatic power (canonical: degrees Lintner) ==========

pub static LINTNER: Unit = Unit::new("L", &["°L", "lintner"], Pq::DiastaticPower, Som::Lintner, 1.0);
// °WK = 3.5 * °L - 16
pub static WK: Unit = Unit::with_offset("WK", &["°WK"], Pq::DiastaticPower, Som::WindischKolbach, 1.0 / 3.5, 16.0 / 3.5);

// ========== Acidity, bitterness ==========

pub static PH: Unit = Unit::new("pH", &[], Pq::Acidity, Som::Ph, 1.0);
pub static IBU: Unit = Unit::new("IBUs", &["IBU"], Pq::Bitterness, Som::InternationalBitternessUnits, 1.0);

// ========== Carbonation (canonical: volumes of CO2) ==========

pub static CARBONATION_VOLUMES: Unit = Unit::new("vol", &["vols", "volumes"], Pq::Carbonation, Som::CarbonationVolumes, 1.0);
// One volume of CO2 is 1.96 g/L
pub static CARBONATION_GRAMS_PER_LITER: Unit = Unit::new(
    "g/L",
    &["gpl"],
    Pq::Carbonation,
    Som::CarbonationMassPerVolume,
    1.0 / 1.96,
);

// ========== Specific heat capacity (canonical: calories per gram degree Celsius) ==========

pub static CALORIES_PER_CELSIUS_PER_GRAM: Unit = Unit::new(
    "c/g·C",
    &["c/g-C", "cal/g-C"],
    Pq::SpecificHeatCapacity,
    Som::SpecificHeatCapacityCalories,
    1.0,
);
pub static JOULES_PER_KELVIN_PER_KG: Unit = Unit::new(
    "J/kg·K",
    &["J/kg-K"],
    Pq::SpecificHeatCapacity,
    Som::SpecificHeatCapacityJoules,
    1.0 / 4184.0,
);

/// Every unit, in registration order. Where names collide the earlier entry
/// is the fallback choice.
pub static ALL_UNITS: [&Unit; 41] = [
    &KILOGRAMS,
    &GRAMS,
    &MILLIGRAMS,
    &POUNDS,
    &OUNCES,
    &LITERS,
    &MILLILITERS,
    &US_TEASPOONS,
    &US_TABLESPOONS,
    &US_CUPS,
    &US_PINTS,
    &US_QUARTS,
    &US_GALLONS,
    &US_BARRELS,
    &IMPERIAL_TEASPOONS,
    &IMPERIAL_TABLESPOONS,
    &IMPERIAL_CUPS,
    &IMPERIAL_PINTS,
    &IMPERIAL_QUARTS,
    &IMPERIAL_GALLONS,
    &IMPERIAL_BARRELS,
    &MINUTES,
    &SECONDS,
    &HOURS,
    &DAYS,
    &CELSIUS,
    &KELVIN,
    &FAHRENHEIT,
    &SRM,
    &LOVIBOND,
    &EBC,
    &SP_GRAV,
    &PLATO,
    &LINTNER,
    &WK,
    &PH,
    &IBU,
    &CARBONATION_VOLUMES,
    &CARBONATION_GRAMS_PER_LITER,
    &CALORIES_PER_CELSIUS_PER_GRAM,
    &JOULES_PER_KELVIN_PER_KG,
];

/// Name and alias index, one list per spelling
struct UnitIndex {
    exact: HashMap<&'static str, Vec<&'static Unit>>,
    folded: HashMap<String, Vec<&'static Unit>>,
}

static INDEX: LazyLock<UnitIndex> = LazyLock::new(|| {
    let mut index = UnitIndex {
        exact: HashMap::new(),
        folded: HashMap::new(),
    };
    for unit in ALL_UNITS.iter().copied() {
        for spelling in std::iter::once(&unit.name).chain(unit.aliases.iter()) {
            index.exact.entry(*spelling).or_default().push(unit);
            let folded = index.folded.entry(spelling.to_lowercase()).or_default();
            // A unit spelled "L" and "l" must not show up twice
            if !folded.iter().any(|u| std::ptr::eq(*u, unit)) {
                folded.push(unit);
            }
        }
    }
    index
});

/// Units of `physical_quantity` spelled `name`, exactly or ignoring case
pub(crate) fn lookup(name: &str, physical_quantity: Pq, exact: bool) -> Vec<&'static Unit> {
    let found = if exact {
        INDEX.exact.get(name)
    } else {
        INDEX.folded.get(&name.to_lowercase())
    };
    found
        .map(|units| {
            units
                .iter()
                .copied()
                .filter(|u| u.physical_quantity == physical_quantity)
                .collect()
        })
        .unwrap_or_default()
}
