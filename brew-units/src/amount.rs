//! Amount type - a value with an associated unit

use std::fmt;

use brew_core::{BrewError, Result};

use crate::physical_quantity::PhysicalQuantity;
use crate::unit::Unit;

/// A number of some unit, e.g. 5.5 US gallons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    quantity: f64,
    unit: &'static Unit,
}

impl Amount {
    pub fn new(quantity: f64, unit: &'static Unit) -> Self {
        Amount { quantity, unit }
    }

    /// An amount already expressed in the canonical unit of `physical_quantity`
    pub fn canonical(quantity: f64, physical_quantity: PhysicalQuantity) -> Self {
        Amount::new(quantity, Unit::get_canonical_unit(physical_quantity))
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &'static Unit {
        self.unit
    }

    pub fn physical_quantity(&self) -> PhysicalQuantity {
        self.unit.physical_quantity
    }

    pub fn is_finite(&self) -> bool {
        self.quantity.is_finite()
    }

    /// The same amount in the canonical unit of its quantity
    pub fn to_canonical(&self) -> Amount {
        Amount::new(self.unit.to_canonical(self.quantity), self.unit.canonical())
    }

    /// Convert to another unit of the same physical quantity
    pub fn convert_to(&self, target: &'static Unit) -> Result<Amount> {
        if target.physical_quantity != self.unit.physical_quantity {
            return Err(BrewError::IncompatibleUnits {
                from: self.unit.name.to_string(),
                to: target.name.to_string(),
            });
        }
        let canonical = self.unit.to_canonical(self.quantity);
        Ok(Amount::new(target.from_canonical(canonical), target))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit.name)
    }
}
