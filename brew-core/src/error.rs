//! Recoverable errors
//!
//! Only conditions a caller can act on live here. Broken invariants such as a
//! unit system stored against the wrong physical quantity are defects and
//! panic at the point of detection instead.

use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const UNKNOWN_UNIT_SYSTEM: &str = "UNKNOWN_UNIT_SYSTEM";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const UNKNOWN_LOCALE: &str = "UNKNOWN_LOCALE";
    pub const IO_ERROR: &str = "IO_ERROR";
    pub const SETTINGS_FORMAT: &str = "SETTINGS_FORMAT";
}

/// Result type for Brew Measure operations
pub type Result<T> = std::result::Result<T, BrewError>;

/// Errors surfaced to callers of the measurement subsystem
#[derive(Error, Debug)]
pub enum BrewError {
    /// Text did not contain a number in the active locale
    #[error("could not parse {input:?} as a number")]
    Parse { input: String },

    /// The numeric text was well formed but not representable as a finite double
    #[error("number {input:?} is out of range")]
    OutOfRange { input: String },

    /// A persisted or requested unit system name is not registered
    #[error("unknown unit system: {0}")]
    UnknownUnitSystem(String),

    /// A unit name did not resolve for the given physical quantity
    #[error("unknown unit {name:?} for {quantity}")]
    UnknownUnit { name: String, quantity: String },

    /// Conversion between units of different physical quantities
    #[error("cannot convert {from} to {to}: different physical quantities")]
    IncompatibleUnits { from: String, to: String },

    /// Locale name has no built-in separators
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// Reading or writing the settings file failed
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not a flat JSON object of strings
    #[error("settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BrewError {
    /// Shorthand for a parse failure on `input`
    pub fn parse(input: impl Into<String>) -> Self {
        BrewError::Parse { input: input.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            BrewError::Parse { .. } => codes::PARSE_ERROR,
            BrewError::OutOfRange { .. } => codes::OUT_OF_RANGE,
            BrewError::UnknownUnitSystem(_) => codes::UNKNOWN_UNIT_SYSTEM,
            BrewError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            BrewError::IncompatibleUnits { .. } => codes::INCOMPATIBLE_UNITS,
            BrewError::UnknownLocale(_) => codes::UNKNOWN_LOCALE,
            BrewError::Io(_) => codes::IO_ERROR,
            BrewError::Json(_) => codes::SETTINGS_FORMAT,
        }
    }
}
