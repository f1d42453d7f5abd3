//! End-to-end behaviour of display preferences: persistence, parsing and
//! the display/parse round trip

use brew_core::{JsonFileSettings, Locale, MemorySettings, SettingsStore};
use brew_units::{units, Amount, DisplayPreferences, PhysicalQuantity, RelativeScale, SystemOfMeasurement, Unit, UnitSystem};

fn assert_close(a: f64, b: f64, tolerance: f64) {
    assert!((a - b).abs() <= tolerance, "{} != {} (tolerance {})", a, b, tolerance);
}

/// Canonical sample values that make sense for `pq`
fn samples(pq: PhysicalQuantity) -> &'static [f64] {
    match pq {
        PhysicalQuantity::Density => &[1.0, 1.048, 1.1],
        PhysicalQuantity::Temperature => &[-5.0, 0.0, 20.0, 67.5, 100.0],
        PhysicalQuantity::Acidity => &[4.2, 5.4],
        _ => &[0.0, 0.5, 1.0, 12.34, 250.0, 12345.678],
    }
}

#[test]
fn test_round_trip_every_unit() {
    for pq in PhysicalQuantity::ALL {
        for us in UnitSystem::for_physical_quantity(pq) {
            for unit in us.units() {
                for &x in samples(pq) {
                    let back = unit.to_canonical(unit.from_canonical(x));
                    assert_close(back, x, 1e-9 * x.abs().max(1.0));
                }
            }
        }
    }
}

#[test]
fn test_load_covers_every_quantity() {
    let mut settings = MemorySettings::new();
    settings.insert("unitSystem_volume", "volume_UsCustomary");

    let mut prefs = DisplayPreferences::new(Locale::en_us());
    prefs.load_display_scales(&settings);

    for pq in PhysicalQuantity::ALL {
        assert_eq!(prefs.get_display_unit_system(pq).physical_quantity, pq);
    }
}

#[test]
#[should_panic]
fn test_mismatched_unit_system_panics() {
    let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
    let volume_metric = UnitSystem::get_instance_by_unique_name("volume_Metric").unwrap();
    prefs.set_display_unit_system(PhysicalQuantity::Temperature, volume_metric);
}

#[test]
fn test_extract_locale_numbers() {
    let en = DisplayPreferences::with_defaults(Locale::en_us());
    assert_eq!(en.extract_raw_from_string::<f64>("12.34 kg").unwrap(), 12.34);

    let de = DisplayPreferences::with_defaults(Locale::de_de());
    assert_eq!(de.extract_raw_from_string::<f64>("1.234,5 L").unwrap(), 1234.5);
}

#[test]
fn test_extract_garbage_is_failure_with_zero() {
    let prefs = DisplayPreferences::with_defaults(Locale::en_us());
    let result = prefs.extract_raw_from_string::<f64>("abc");
    assert!(result.is_err());
    assert_eq!(result.unwrap_or_default(), 0.0);
}

#[test]
fn test_non_finite_sentinels() {
    let prefs = DisplayPreferences::with_defaults(Locale::en_us());
    assert_eq!(prefs.display_amount(&Amount::new(f64::NAN, &units::LITERS), 3, None, None), "-");
    assert_eq!(prefs.amount_display(&Amount::new(f64::INFINITY, &units::LITERS), None, None), -1.0);
}

#[test]
fn test_non_finite_sentinels_ignore_overrides() {
    let prefs = DisplayPreferences::with_defaults(Locale::en_us());
    let nan = Amount::new(f64::NAN, &units::KILOGRAMS);
    let inf = Amount::new(f64::INFINITY, &units::KILOGRAMS);

    for precision in [0, 3, 9] {
        assert_eq!(
            prefs.display_amount(&nan, precision, Some(SystemOfMeasurement::UsCustomary), Some(RelativeScale::Small)),
            "-"
        );
        assert_eq!(prefs.display_amount(&nan, precision, None, Some(RelativeScale::Huge)), "-");
    }
    assert_eq!(prefs.amount_display(&inf, Some(SystemOfMeasurement::Imperial), Some(RelativeScale::Large)), -1.0);

    // Mass has no Plato unit system; the sentinel wins before the system is looked up
    assert_eq!(prefs.display_amount(&nan, 2, Some(SystemOfMeasurement::Plato), Some(RelativeScale::Small)), "-");
    assert_eq!(prefs.amount_display(&inf, Some(SystemOfMeasurement::Plato), None), -1.0);
}

#[test]
fn test_unit_followed_by_punctuation() {
    let prefs = DisplayPreferences::with_defaults(Locale::en_us());
    for text in ["2 lb", "2 lb,", "2 lb.", "(2 lb)", "2lb;"] {
        let amount = prefs.qstring_to_si(text, PhysicalQuantity::Mass, None, None);
        assert_close(amount.quantity(), 0.90718474, 1e-12);
    }

    let de = DisplayPreferences::with_defaults(Locale::de_de());
    let amount = de.qstring_to_si("5,5 gal.", PhysicalQuantity::Volume, None, None);
    assert_close(amount.quantity(), 5.5 * 3.785411784, 1e-9);
}

#[test]
fn test_display_then_parse_recovers_amount() {
    for locale in [Locale::en_us(), Locale::de_de(), Locale::fr_fr()] {
        for us in UnitSystem::all() {
            let mut prefs = DisplayPreferences::with_defaults(locale.clone());
            prefs.set_display_unit_system_for(us);

            let pq = us.physical_quantity;
            for &x in samples(pq) {
                let amount = Amount::canonical(x, pq);
                let text = prefs.display_amount(&amount, 6, None, None);
                let parsed = prefs.qstring_to_si(&text, pq, None, None);

                assert_eq!(parsed.unit(), Unit::get_canonical_unit(pq), "{} via {}", text, us);
                assert_close(parsed.quantity(), x, 1e-5 * x.abs().max(1.0));
            }
        }
    }
}

#[test]
fn test_us_and_imperial_gallons_round_trip() {
    let amount = Amount::new(5.0, &units::US_GALLONS).to_canonical();

    let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
    let us = UnitSystem::get_instance_by_unique_name("volume_UsCustomary").unwrap();
    let imperial = UnitSystem::get_instance_by_unique_name("volume_Imperial").unwrap();

    prefs.set_display_unit_system_for(us);
    let text = prefs.display_amount(&amount, 6, None, None);
    assert_eq!(text, "5.000000 gal");
    let parsed = prefs.qstring_to_si(&text, PhysicalQuantity::Volume, None, None);
    assert_close(parsed.quantity(), amount.quantity(), 1e-9);

    // The same text means a different volume once Imperial is chosen
    prefs.set_display_unit_system_for(imperial);
    let reparsed = prefs.qstring_to_si(&text, PhysicalQuantity::Volume, None, None);
    assert_close(reparsed.quantity(), 5.0 * 4.54609, 1e-9);
}

#[test]
fn test_save_then_load_recovers_choices() {
    let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
    for name in ["mass_Imperial", "volume_Imperial", "temperature_UsCustomary", "density_Plato", "color_EuropeanBreweryConvention"] {
        prefs.set_display_unit_system_for(UnitSystem::get_instance_by_unique_name(name).unwrap());
    }

    let mut settings = MemorySettings::new();
    prefs.save_display_scales(&mut settings);

    let mut fresh = DisplayPreferences::new(Locale::en_us());
    fresh.load_display_scales(&settings);

    for pq in PhysicalQuantity::ALL {
        assert_eq!(
            fresh.get_display_unit_system(pq).unique_name,
            prefs.get_display_unit_system(pq).unique_name
        );
    }
}

#[test]
fn test_save_then_load_through_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut prefs = DisplayPreferences::with_defaults(Locale::en_us());
    prefs.set_display_unit_system_for(UnitSystem::get_instance_by_unique_name("diastaticPower_WindischKolbach").unwrap());

    let mut settings = JsonFileSettings::open(&path).unwrap();
    prefs.save_display_scales(&mut settings);
    settings.flush().unwrap();

    let reopened = JsonFileSettings::open(&path).unwrap();
    assert_eq!(
        reopened.value("unitSystem_diastaticPower").as_deref(),
        Some("diastaticPower_WindischKolbach")
    );

    let mut fresh = DisplayPreferences::new(Locale::en_us());
    fresh.load_display_scales(&reopened);
    assert_eq!(
        fresh.get_display_unit_system(PhysicalQuantity::DiastaticPower).unique_name,
        "diastaticPower_WindischKolbach"
    );
}
