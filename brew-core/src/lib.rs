//! Brew Core - Fundamental types
//!
//! This crate provides the core types shared by the Brew Measure crates:
//! - `Locale`: decimal point / digit grouping and locale-aware number conversion
//! - `BrewError`: recoverable errors with machine-readable codes
//! - `SettingsStore`: persistent string key/value settings

mod error;
mod locale;
mod settings;

pub use error::{codes, BrewError, Result};
pub use locale::Locale;
pub use settings::{JsonFileSettings, MemorySettings, SettingsStore};
