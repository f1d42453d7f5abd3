//! Unit representation with conversion to and from canonical values

use std::fmt;

use tracing::debug;

use crate::physical_quantity::{PhysicalQuantity, SystemOfMeasurement};
use crate::unit_system::UnitSystem;
use crate::units;

/// How a raw value in a unit maps onto the canonical unit of its quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// canonical = raw * factor + offset
    Linear { factor: f64, offset: f64 },
    /// Degrees Plato to specific gravity: SG = 1 + P / (258.6 - P * 227.1 / 258.2)
    PlatoToGravity,
}

const PLATO_NUMERATOR: f64 = 258.6;
const PLATO_SLOPE: f64 = 227.1 / 258.2;

impl Conversion {
    fn to_canonical(&self, raw: f64) -> f64 {
        match *self {
            Conversion::Linear { factor, offset } => raw * factor + offset,
            Conversion::PlatoToGravity => 1.0 + raw / (PLATO_NUMERATOR - raw * PLATO_SLOPE),
        }
    }

    fn from_canonical(&self, canonical: f64) -> f64 {
        match *self {
            Conversion::Linear { factor, offset } => (canonical - offset) / factor,
            // Exact algebraic inverse of the forward relation
            Conversion::PlatoToGravity => {
                let excess = canonical - 1.0;
                PLATO_NUMERATOR * excess / (1.0 + PLATO_SLOPE * excess)
            }
        }
    }
}

/// A single unit of measure.
///
/// Units are statically defined in [`crate::units`] and never built at run
/// time, so they are always handled as `&'static Unit`.
#[derive(Debug)]
pub struct Unit {
    /// The unit symbol shown to users (e.g. "kg", "gal", "C")
    pub name: &'static str,
    /// Extra spellings accepted when parsing (e.g. "gallons")
    pub aliases: &'static [&'static str],
    /// The quantity this unit measures
    pub physical_quantity: PhysicalQuantity,
    /// The family this unit is defined in
    pub system_of_measurement: SystemOfMeasurement,
    conversion: Conversion,
}

impl Unit {
    /// A proportional unit: canonical = raw * factor
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        physical_quantity: PhysicalQuantity,
        system_of_measurement: SystemOfMeasurement,
        factor: f64,
    ) -> Self {
        Unit {
            name,
            aliases,
            physical_quantity,
            system_of_measurement,
            conversion: Conversion::Linear { factor, offset: 0.0 },
        }
    }

    /// A unit whose zero differs from the canonical zero (temperatures, Lovibond)
    pub const fn with_offset(
        name: &'static str,
        aliases: &'static [&'static str],
        physical_quantity: PhysicalQuantity,
        system_of_measurement: SystemOfMeasurement,
        factor: f64,
        offset: f64,
    ) -> Self {
        Unit {
            name,
            aliases,
            physical_quantity,
            system_of_measurement,
            conversion: Conversion::Linear { factor, offset },
        }
    }

    /// A unit with a non-linear relation to the canonical unit
    pub const fn with_conversion(
        name: &'static str,
        aliases: &'static [&'static str],
        physical_quantity: PhysicalQuantity,
        system_of_measurement: SystemOfMeasurement,
        conversion: Conversion,
    ) -> Self {
        Unit {
            name,
            aliases,
            physical_quantity,
            system_of_measurement,
            conversion,
        }
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    /// Convert a value expressed in this unit to the canonical unit
    pub fn to_canonical(&self, raw: f64) -> f64 {
        self.conversion.to_canonical(raw)
    }

    /// Convert a canonical value to this unit
    pub fn from_canonical(&self, canonical: f64) -> f64 {
        self.conversion.from_canonical(canonical)
    }

    /// The canonical unit for this unit's physical quantity
    pub fn canonical(&self) -> &'static Unit {
        Unit::get_canonical_unit(self.physical_quantity)
    }

    pub fn is_canonical(&self) -> bool {
        self == self.canonical()
    }

    /// The unit system this unit is defined in.
    ///
    /// Units shared between systems (pounds are both US Customary and
    /// Imperial) report the system they were defined for.
    pub fn unit_system(&self) -> &'static UnitSystem {
        UnitSystem::get_instance(self.system_of_measurement, self.physical_quantity).unwrap_or_else(|| {
            panic!(
                "unit {} declares {} but no such unit system exists for {}",
                self.name, self.system_of_measurement, self.physical_quantity
            )
        })
    }

    /// The unit in which values of `physical_quantity` are always stored
    pub fn get_canonical_unit(physical_quantity: PhysicalQuantity) -> &'static Unit {
        match physical_quantity {
            PhysicalQuantity::Mass => &units::KILOGRAMS,
            PhysicalQuantity::Volume => &units::LITERS,
            PhysicalQuantity::Time => &units::MINUTES,
            PhysicalQuantity::Temperature => &units::CELSIUS,
            PhysicalQuantity::Color => &units::SRM,
            PhysicalQuantity::Density => &units::SP_GRAV,
            PhysicalQuantity::DiastaticPower => &units::LINTNER,
            PhysicalQuantity::Acidity => &units::PH,
            PhysicalQuantity::Bitterness => &units::IBU,
            PhysicalQuantity::Carbonation => &units::CARBONATION_VOLUMES,
            PhysicalQuantity::SpecificHeatCapacity => &units::CALORIES_PER_CELSIUS_PER_GRAM,
        }
    }

    /// Look up a unit of `physical_quantity` by name or alias.
    ///
    /// An exact match wins over a case-insensitive one. When the name is
    /// ambiguous (US and Imperial gallons are both "gal") the unit belonging
    /// to `preferred` is chosen, otherwise the first one registered.
    pub fn get_unit(
        name: &str,
        physical_quantity: PhysicalQuantity,
        preferred: Option<&UnitSystem>,
    ) -> Option<&'static Unit> {
        let name = name.trim();
        let mut candidates = units::lookup(name, physical_quantity, true);
        if candidates.is_empty() {
            candidates = units::lookup(name, physical_quantity, false);
        }

        match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            _ => {
                if let Some(system) = preferred {
                    if let Some(unit) = candidates.iter().find(|u| system.contains(u)) {
                        return Some(*unit);
                    }
                }
                debug!(
                    name,
                    quantity = %physical_quantity,
                    chosen = %candidates[0].system_of_measurement,
                    "ambiguous unit name, using first registered"
                );
                Some(candidates[0])
            }
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.physical_quantity == other.physical_quantity
            && self.system_of_measurement == other.system_of_measurement
    }
}

impl Eq for Unit {}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::ALL_UNITS;

    fn assert_close(a: f64, b: f64, tolerance: f64) {
        assert!((a - b).abs() <= tolerance, "{} != {} (tolerance {})", a, b, tolerance);
    }

    #[test]
    fn test_canonical_units() {
        for pq in PhysicalQuantity::ALL {
            let canonical = Unit::get_canonical_unit(pq);
            assert_eq!(canonical.physical_quantity, pq);
            assert!(canonical.is_canonical());
            assert_eq!(canonical.to_canonical(42.5), 42.5);
        }
    }

    #[test]
    fn test_round_trip_all_units() {
        let samples: [f64; 10] = [-40.0, -1.5, 0.0, 0.001, 1.0, 3.75, 12.0, 100.0, 1234.5678, 65000.0];
        for unit in ALL_UNITS.iter() {
            for &x in &samples {
                // Plato is only meaningful well below the pole of the relation
                if unit.conversion() == Conversion::PlatoToGravity && x.abs() > 100.0 {
                    continue;
                }
                let back = unit.from_canonical(unit.to_canonical(x));
                assert_close(back, x, 1e-9 * x.abs().max(1.0));
            }
        }
    }

    #[test]
    fn test_temperature_conversion() {
        assert_close(units::FAHRENHEIT.to_canonical(212.0), 100.0, 1e-9);
        assert_close(units::FAHRENHEIT.from_canonical(0.0), 32.0, 1e-9);
        assert_close(units::KELVIN.to_canonical(273.15), 0.0, 1e-9);
    }

    #[test]
    fn test_plato_conversion() {
        // 12 °P is close to 1.048
        let sg = units::PLATO.to_canonical(12.0);
        assert!((sg - 1.0484).abs() < 0.001, "12 P -> {}", sg);
        assert_close(units::PLATO.from_canonical(1.0), 0.0, 1e-12);
    }

    #[test]
    fn test_volume_factors() {
        assert_close(units::US_GALLONS.to_canonical(1.0), 3.785411784, 1e-12);
        assert_close(units::IMPERIAL_GALLONS.to_canonical(1.0), 4.54609, 1e-12);
        assert_close(units::US_QUARTS.to_canonical(4.0), units::US_GALLONS.to_canonical(1.0), 1e-12);
    }

    #[test]
    fn test_get_unit_exact_and_case_insensitive() {
        let kg = Unit::get_unit("kg", PhysicalQuantity::Mass, None).unwrap();
        assert_eq!(kg, &units::KILOGRAMS);

        let ml = Unit::get_unit("ML", PhysicalQuantity::Volume, None).unwrap();
        assert_eq!(ml, &units::MILLILITERS);

        let alias = Unit::get_unit("gallons", PhysicalQuantity::Volume, None).unwrap();
        assert_eq!(alias.name, "gal");
    }

    #[test]
    fn test_get_unit_filters_by_quantity() {
        // "L" is liters for volume but degrees Lintner for diastatic power
        let liters = Unit::get_unit("L", PhysicalQuantity::Volume, None).unwrap();
        let lintner = Unit::get_unit("L", PhysicalQuantity::DiastaticPower, None).unwrap();
        assert_eq!(liters, &units::LITERS);
        assert_eq!(lintner, &units::LINTNER);

        assert!(Unit::get_unit("kg", PhysicalQuantity::Volume, None).is_none());
    }

    #[test]
    fn test_get_unit_ambiguous_prefers_system() {
        let imperial = UnitSystem::get_instance(SystemOfMeasurement::Imperial, PhysicalQuantity::Volume).unwrap();
        let us = UnitSystem::get_instance(SystemOfMeasurement::UsCustomary, PhysicalQuantity::Volume).unwrap();

        let pint = Unit::get_unit("pt", PhysicalQuantity::Volume, Some(imperial)).unwrap();
        assert_eq!(pint, &units::IMPERIAL_PINTS);

        let pint = Unit::get_unit("pt", PhysicalQuantity::Volume, Some(us)).unwrap();
        assert_eq!(pint, &units::US_PINTS);

        // No preference: first registered (US)
        let pint = Unit::get_unit("pt", PhysicalQuantity::Volume, None).unwrap();
        assert_eq!(pint, &units::US_PINTS);
    }

    #[test]
    fn test_unit_system_membership() {
        assert_eq!(units::LITERS.unit_system().unique_name, "volume_Metric");
        assert_eq!(units::POUNDS.unit_system().unique_name, "mass_UsCustomary");
        assert_eq!(units::IMPERIAL_QUARTS.unit_system().unique_name, "volume_Imperial");
    }
}
