//! Brew Units - Units of measure for brewing
//!
//! Amounts are stored in one canonical unit per physical quantity and only
//! converted when shown to or read from the user.
//!
//! Quantities and their canonical units:
//! - Mass (kg), Volume (L), Time (min), Temperature (C)
//! - Color (SRM), Density (specific gravity), Diastatic power (Lintner)
//! - Acidity (pH), Bitterness (IBUs), Carbonation (volumes of CO2)
//! - Specific heat capacity (c/g·C)
//!
//! [`DisplayPreferences`] holds the user's chosen unit system for each
//! quantity and does the locale-aware display and parsing.

mod amount;
mod measurement;
mod parse;
mod physical_quantity;
mod unit;
pub mod unit_system;
pub mod units;

pub use amount::Amount;
pub use measurement::DisplayPreferences;
pub use parse::{extract_raw_from_string, split_amount_text, FromRawDouble};
pub use physical_quantity::{PhysicalQuantity, SystemOfMeasurement};
pub use unit::{Conversion, Unit};
pub use unit_system::{RelativeScale, UnitSystem};
