//! Display preferences and the conversions that depend on them
//!
//! `DisplayPreferences` remembers, per physical quantity, which unit system
//! the user wants amounts shown in, plus the locale used to read and write
//! numbers. Values are always stored canonically; everything here is about
//! getting them in and out of text.

use std::collections::HashMap;

use brew_core::{Locale, Result, SettingsStore};
use tracing::{debug, error, warn};

use crate::amount::Amount;
use crate::parse::{self, FromRawDouble};
use crate::physical_quantity::{PhysicalQuantity, SystemOfMeasurement};
use crate::unit::Unit;
use crate::unit_system::{RelativeScale, UnitSystem};

/// Per-quantity display unit systems plus the active locale
#[derive(Debug, Clone)]
pub struct DisplayPreferences {
    locale: Locale,
    display_unit_systems: HashMap<PhysicalQuantity, &'static UnitSystem>,
}

impl DisplayPreferences {
    /// Preferences with no unit systems chosen yet.
    ///
    /// Call [`DisplayPreferences::load_display_scales`] before displaying anything.
    pub fn new(locale: Locale) -> Self {
        DisplayPreferences {
            locale,
            display_unit_systems: HashMap::new(),
        }
    }

    /// Preferences with every quantity shown in its canonical unit system
    pub fn with_defaults(locale: Locale) -> Self {
        let mut prefs = DisplayPreferences::new(locale);
        for pq in PhysicalQuantity::ALL {
            prefs
                .display_unit_systems
                .insert(pq, Unit::get_canonical_unit(pq).unit_system());
        }
        prefs
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        debug!(from = %self.locale, to = %locale, "locale changed");
        self.locale = locale;
    }

    /// Read the display unit system for every quantity from `settings`.
    ///
    /// Quantities with nothing stored get their canonical unit system. A
    /// stored name that no longer exists is replaced by the same default.
    pub fn load_display_scales<S: SettingsStore + ?Sized>(&mut self, settings: &S) {
        self.display_unit_systems.clear();

        for pq in PhysicalQuantity::ALL {
            let default_system = Unit::get_canonical_unit(pq).unit_system();
            let name = settings.value_or(pq.settings_name(), default_system.unique_name);

            let unit_system = match UnitSystem::get_instance_by_unique_name(&name) {
                Some(us) if us.physical_quantity == pq => us,
                Some(us) => {
                    warn!(
                        key = pq.settings_name(),
                        stored = us.unique_name,
                        default = default_system.unique_name,
                        "stored unit system is for {}, not {}; using default",
                        us.physical_quantity,
                        pq
                    );
                    default_system
                }
                None => {
                    warn!(
                        key = pq.settings_name(),
                        stored = %name,
                        default = default_system.unique_name,
                        "unrecognised unit system; using default"
                    );
                    default_system
                }
            };
            self.set_display_unit_system(pq, unit_system);
        }
    }

    /// Write the unique name of every chosen display unit system to `settings`
    pub fn save_display_scales<S: SettingsStore + ?Sized>(&self, settings: &mut S) {
        for pq in PhysicalQuantity::ALL {
            let unit_system = self.get_display_unit_system(pq);
            settings.insert(pq.settings_name(), unit_system.unique_name);
        }
    }

    /// Choose how `physical_quantity` is displayed.
    ///
    /// # Panics
    ///
    /// If `unit_system` is for a different physical quantity.
    pub fn set_display_unit_system(&mut self, physical_quantity: PhysicalQuantity, unit_system: &'static UnitSystem) {
        if unit_system.physical_quantity != physical_quantity {
            error!(
                quantity = %physical_quantity,
                unit_system = unit_system.unique_name,
                "unit system does not measure this physical quantity"
            );
            panic!(
                "unit system {} measures {}, not {}",
                unit_system.unique_name, unit_system.physical_quantity, physical_quantity
            );
        }

        debug!(
            quantity = %physical_quantity,
            unit_system = unit_system.unique_name,
            "display unit system set"
        );
        self.display_unit_systems.insert(physical_quantity, unit_system);
    }

    /// Choose `unit_system` for the physical quantity it measures
    pub fn set_display_unit_system_for(&mut self, unit_system: &'static UnitSystem) {
        self.set_display_unit_system(unit_system.physical_quantity, unit_system);
    }

    /// The unit system `physical_quantity` is displayed in.
    ///
    /// # Panics
    ///
    /// If display unit systems have not been loaded.
    pub fn get_display_unit_system(&self, physical_quantity: PhysicalQuantity) -> &'static UnitSystem {
        match self.display_unit_systems.get(&physical_quantity).copied() {
            Some(us) => us,
            None => {
                error!(
                    quantity = %physical_quantity,
                    loaded = self.display_unit_systems.len(),
                    "no display unit system; were display scales loaded?"
                );
                panic!("no display unit system for {}", physical_quantity);
            }
        }
    }

    /// The unit system for `physical_quantity`: `forced` if given, else the display preference.
    ///
    /// # Panics
    ///
    /// If `forced` has no unit system for `physical_quantity`.
    fn resolve_unit_system(
        &self,
        physical_quantity: PhysicalQuantity,
        forced: Option<SystemOfMeasurement>,
    ) -> &'static UnitSystem {
        match forced {
            Some(som) => UnitSystem::get_instance(som, physical_quantity).unwrap_or_else(|| {
                error!(quantity = %physical_quantity, system = %som, "no unit system for forced system of measurement");
                panic!("{} has no unit system for {}", som, physical_quantity);
            }),
            None => self.get_display_unit_system(physical_quantity),
        }
    }

    /// Format a bare number in the active locale with `precision` decimals
    pub fn display_quantity(&self, quantity: f64, precision: usize) -> String {
        self.locale.format_fixed(quantity, precision)
    }

    /// Format `amount` as "<number> <unit>" for display, or "-" if it is not finite
    pub fn display_amount(
        &self,
        amount: &Amount,
        precision: usize,
        forced_system: Option<SystemOfMeasurement>,
        forced_scale: Option<RelativeScale>,
    ) -> String {
        if !amount.is_finite() {
            return "-".to_string();
        }

        let unit_system = self.resolve_unit_system(amount.physical_quantity(), forced_system);
        unit_system.display_amount(&self.locale, amount, precision, forced_scale)
    }

    /// The number `amount` would be displayed as, or -1.0 if it is not finite
    pub fn amount_display(
        &self,
        amount: &Amount,
        forced_system: Option<SystemOfMeasurement>,
        forced_scale: Option<RelativeScale>,
    ) -> f64 {
        if !amount.is_finite() {
            return -1.0;
        }

        let unit_system = self.resolve_unit_system(amount.physical_quantity(), forced_system);
        unit_system.amount_display(amount, forced_scale)
    }

    /// Parse user input for `physical_quantity` into a canonical amount.
    ///
    /// A bare number is read in the forced scale's unit, or the system's
    /// default unit. A forced scale the system does not have falls back to the
    /// canonical unit.
    pub fn qstring_to_si(
        &self,
        input: &str,
        physical_quantity: PhysicalQuantity,
        forced_system: Option<SystemOfMeasurement>,
        forced_scale: Option<RelativeScale>,
    ) -> Amount {
        debug!(input, quantity = %physical_quantity, ?forced_system, ?forced_scale, "parsing amount");
        let unit_system = self.resolve_unit_system(physical_quantity, forced_system);

        let default_unit = match forced_scale {
            None => unit_system.unit(),
            Some(scale) => match unit_system.scale_unit(scale) {
                Some(unit) => unit,
                None => {
                    let canonical = Unit::get_canonical_unit(physical_quantity);
                    warn!(
                        %scale,
                        unit_system = unit_system.unique_name,
                        fallback = canonical.name,
                        "invalid relative scale for unit system"
                    );
                    canonical
                }
            },
        };

        unit_system.qstring_to_si(&self.locale, input, default_unit)
    }

    /// The (volume, mass) units used to show mash thickness.
    ///
    /// # Panics
    ///
    /// If the chosen volume or mass system has no thickness unit.
    pub fn thickness_units(&self) -> (&'static Unit, &'static Unit) {
        let volume_system = self.get_display_unit_system(PhysicalQuantity::Volume);
        let mass_system = self.get_display_unit_system(PhysicalQuantity::Mass);

        match (volume_system.thickness_unit(), mass_system.thickness_unit()) {
            (Some(volume), Some(mass)) => (volume, mass),
            _ => {
                error!(
                    volume = volume_system.unique_name,
                    mass = mass_system.unique_name,
                    "unit system has no thickness unit"
                );
                panic!(
                    "missing thickness unit in {} or {}",
                    volume_system.unique_name, mass_system.unique_name
                );
            }
        }
    }

    /// Format a mash thickness given in L/kg, e.g. "1.25 qt/lb"
    pub fn display_thickness(&self, thick_l_per_kg: f64, show_units: bool) -> String {
        let (volume, mass) = self.thickness_units();

        let numerator = volume.from_canonical(thick_l_per_kg);
        let denominator = mass.from_canonical(1.0);
        let ratio = self.locale.format_fixed(numerator / denominator, 2);

        if show_units {
            format!("{} {}/{}", ratio, volume.name, mass.name)
        } else {
            ratio
        }
    }

    /// Extract the leading number from `input` using the active locale
    pub fn extract_raw_from_string<T: FromRawDouble>(&self, input: &str) -> Result<T> {
        parse::extract_raw_from_string(&self.locale, input)
    }
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        DisplayPreferences::with_defaults(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit_system;
    use crate::units;
    use brew_core::MemorySettings;

    #[test]
    fn test_with_defaults_covers_all_quantities() {
        let prefs = DisplayPreferences::with_defaults(Locale::en_us());
        for pq in PhysicalQuantity::ALL {
            let us = prefs.get_display_unit_system(pq);
            assert_eq!(us.physical_quantity, pq);
            assert!(us.contains(Unit::get_canonical_unit(pq)));
        }
    }

    #[test]
    fn test_load_uses_stored_names() {
        let mut settings = MemorySettings::new();
        settings.insert("unitSystem_volume", "volume_Imperial");
        settings.insert("unitSystem_temperature", "temperature_UsCustomary");

        let mut prefs = DisplayPreferences::new(Locale::en_us());
        prefs.load_display_scales(&settings);

        assert_eq!(prefs.get_display_unit_system(PhysicalQuantity::Volume), &unit_system::VOLUME_IMPERIAL);
        assert_eq!(
            prefs.get_display_unit_system(PhysicalQuantity::Temperature),
            &unit_system::TEMPERATURE_US_CUSTOMARY
        );
        assert_eq!(prefs.get_display_unit_system(PhysicalQuantity::Mass), &unit_system::MASS_METRIC);
    }

    #[test]
    fn test_load_unknown_name_falls_back() {
        let mut settings = MemorySettings::new();
        settings.insert("unitSystem_volume", "volume_Klingon");
        // Right name, wrong quantity
        settings.insert("unitSystem_mass", "volume_UsCustomary");

        let mut prefs = DisplayPreferences::new(Locale::en_us());
        prefs.load_display_scales(&settings);

        assert_eq!(prefs.get_display_unit_system(PhysicalQuantity::Volume), &unit_system::VOLUME_METRIC);
        assert_eq!(prefs.get_display_unit_system(PhysicalQuantity::Mass), &unit_system::MASS_METRIC);
    }

    #[test]
    fn test_save_writes_every_quantity() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        prefs.set_display_unit_system_for(&unit_system::COLOR_EBC);

        let mut settings = MemorySettings::new();
        prefs.save_display_scales(&mut settings);

        assert_eq!(settings.len(), PhysicalQuantity::ALL.len());
        assert_eq!(settings.value("unitSystem_color").as_deref(), Some("color_EuropeanBreweryConvention"));
    }

    #[test]
    #[should_panic(expected = "measures")]
    fn test_set_mismatched_system_panics() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        prefs.set_display_unit_system(PhysicalQuantity::Mass, &unit_system::VOLUME_METRIC);
    }

    #[test]
    #[should_panic(expected = "no display unit system")]
    fn test_get_before_load_panics() {
        let prefs = DisplayPreferences::new(Locale::en_us());
        prefs.get_display_unit_system(PhysicalQuantity::Volume);
    }

    #[test]
    #[should_panic]
    fn test_forced_system_without_quantity_panics() {
        let prefs = DisplayPreferences::with_defaults(Locale::en_us());
        let amount = Amount::new(1.0, &units::KILOGRAMS);
        prefs.display_amount(&amount, 2, Some(SystemOfMeasurement::Plato), None);
    }

    #[test]
    fn test_display_quantity() {
        let prefs = DisplayPreferences::with_defaults(Locale::de_de());
        assert_eq!(prefs.display_quantity(1234.5678, 2), "1.234,57");
    }

    #[test]
    fn test_display_amount_uses_preference() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        let amount = Amount::new(23.0, &units::LITERS);
        assert_eq!(prefs.display_amount(&amount, 1, None, None), "23.0 L");

        prefs.set_display_unit_system_for(&unit_system::VOLUME_US_CUSTOMARY);
        assert_eq!(prefs.display_amount(&amount, 2, None, None), "6.08 gal");
        assert_eq!(
            prefs.display_amount(&amount, 1, Some(SystemOfMeasurement::Metric), Some(RelativeScale::Small)),
            "23,000.0 mL"
        );
    }

    #[test]
    fn test_display_non_finite() {
        let prefs = DisplayPreferences::with_defaults(Locale::en_us());
        let nan = Amount::new(f64::NAN, &units::KILOGRAMS);
        let inf = Amount::new(f64::INFINITY, &units::LITERS);

        assert_eq!(prefs.display_amount(&nan, 2, None, None), "-");
        assert_eq!(prefs.amount_display(&inf, None, None), -1.0);
        assert_eq!(prefs.amount_display(&nan, None, None), -1.0);
    }

    #[test]
    fn test_amount_display() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        prefs.set_display_unit_system_for(&unit_system::MASS_US_CUSTOMARY);
        let amount = Amount::new(0.45359237, &units::KILOGRAMS);

        assert!((prefs.amount_display(&amount, None, None) - 1.0).abs() < 1e-12);
        assert!((prefs.amount_display(&amount, None, Some(RelativeScale::Small)) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_qstring_to_si_default_unit_and_scale() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        prefs.set_display_unit_system_for(&unit_system::MASS_US_CUSTOMARY);

        let amount = prefs.qstring_to_si("2", PhysicalQuantity::Mass, None, None);
        assert!((amount.quantity() - 0.90718474).abs() < 1e-12);

        let amount = prefs.qstring_to_si("8", PhysicalQuantity::Mass, None, Some(RelativeScale::Small));
        assert!((amount.quantity() - 0.226796185).abs() < 1e-12);

        // Explicit unit beats the display system
        let amount = prefs.qstring_to_si("500 g", PhysicalQuantity::Mass, None, None);
        assert!((amount.quantity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_qstring_to_si_invalid_scale_uses_canonical() {
        let prefs = DisplayPreferences::with_defaults(Locale::en_us());
        let amount = prefs.qstring_to_si("3", PhysicalQuantity::Volume, None, Some(RelativeScale::Huge));
        assert_eq!(amount.unit(), &units::LITERS);
        assert_eq!(amount.quantity(), 3.0);
    }

    #[test]
    fn test_qstring_to_si_forced_system() {
        let prefs = DisplayPreferences::with_defaults(Locale::en_us());
        let amount = prefs.qstring_to_si("1 gal", PhysicalQuantity::Volume, Some(SystemOfMeasurement::Imperial), None);
        assert!((amount.quantity() - 4.54609).abs() < 1e-12);
    }

    #[test]
    fn test_display_thickness() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        assert_eq!(prefs.display_thickness(2.6, true), "2.60 L/kg");

        prefs.set_display_unit_system_for(&unit_system::VOLUME_US_CUSTOMARY);
        prefs.set_display_unit_system_for(&unit_system::MASS_US_CUSTOMARY);
        // 2.6 L/kg is about 1.25 qt/lb
        assert_eq!(prefs.display_thickness(2.6, true), "1.25 qt/lb");
        assert_eq!(prefs.display_thickness(2.6, false), "1.25");
    }

    #[test]
    fn test_extract_uses_active_locale() {
        let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
        assert_eq!(prefs.extract_raw_from_string::<f64>("1,5 kg").unwrap(), 15.0);

        prefs.set_locale(Locale::de_de());
        assert_eq!(prefs.extract_raw_from_string::<f64>("1,5 kg").unwrap(), 1.5);
        assert_eq!(prefs.extract_raw_from_string::<i32>("1,5 kg").unwrap(), 1);
    }
}
