//! Brew Measure - command-line front end
//!
//! Commands:
//! - display: show a canonical (or explicitly united) value in the chosen unit system
//! - parse: read typed amount text back into a canonical value
//! - set: choose the display unit system for a physical quantity
//! - list: show current choices and the alternatives
//! - thickness: show a mash thickness given in L/kg
//!
//! Display choices persist in a JSON settings file.

use std::path::PathBuf;
use std::process::ExitCode;

use brew_core::{BrewError, JsonFileSettings, Locale, Result};
use brew_units::{Amount, DisplayPreferences, PhysicalQuantity, RelativeScale, SystemOfMeasurement, Unit, UnitSystem};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SETTINGS_DIR: &str = "brew-measure";
const SETTINGS_FILE: &str = "settings.json";
const FALLBACK_SETTINGS_FILE: &str = "brew-measure.json";

/// Command-line arguments for brew-measure
#[derive(Parser, Debug)]
#[command(name = "brew-measure")]
#[command(about = "Convert, display and parse brewing measurements")]
#[command(version)]
struct Args {
    /// Locale for reading and writing numbers (en_US, de_DE, fr_FR, C)
    #[arg(short, long, default_value = "en_US", env = "BREW_LOCALE")]
    locale: String,

    /// Settings file holding the display unit systems
    #[arg(short, long, env = "BREW_SETTINGS_PATH")]
    settings: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a value in the display unit system for its quantity
    Display {
        #[arg(value_parser = parse_quantity)]
        quantity: PhysicalQuantity,

        /// Value, canonical unless --unit is given
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Unit the value is expressed in
        #[arg(short, long)]
        unit: Option<String>,

        /// Force a system of measurement instead of the saved choice
        #[arg(long, value_parser = parse_system)]
        system: Option<SystemOfMeasurement>,

        /// Force a relative scale (extrasmall, small, medium, large, extralarge, huge)
        #[arg(long, value_parser = parse_scale)]
        scale: Option<RelativeScale>,

        /// Decimal places
        #[arg(short, long, default_value = "3")]
        precision: usize,
    },

    /// Parse amount text such as "5.5 gal" into a canonical value
    Parse {
        #[arg(value_parser = parse_quantity)]
        quantity: PhysicalQuantity,

        #[arg(allow_hyphen_values = true)]
        text: String,

        #[arg(long, value_parser = parse_system)]
        system: Option<SystemOfMeasurement>,

        #[arg(long, value_parser = parse_scale)]
        scale: Option<RelativeScale>,
    },

    /// Choose the display unit system for a quantity and save it
    Set {
        #[arg(value_parser = parse_quantity)]
        quantity: PhysicalQuantity,

        /// System of measurement ("us", "imperial", "metric", ...) or unit system name
        system: String,
    },

    /// List the chosen and available unit systems for every quantity
    List,

    /// Show a mash thickness given in liters per kilogram
    Thickness {
        value: f64,

        /// Omit the unit suffix
        #[arg(long)]
        no_units: bool,
    },
}

fn parse_quantity(name: &str) -> std::result::Result<PhysicalQuantity, String> {
    PhysicalQuantity::from_name(name).ok_or_else(|| format!("unknown physical quantity: {}", name))
}

fn parse_system(name: &str) -> std::result::Result<SystemOfMeasurement, String> {
    SystemOfMeasurement::from_name(name).ok_or_else(|| format!("unknown system of measurement: {}", name))
}

fn parse_scale(name: &str) -> std::result::Result<RelativeScale, String> {
    RelativeScale::from_name(name).ok_or_else(|| {
        let valid: Vec<String> = RelativeScale::ALL.iter().map(|s| s.to_string()).collect();
        format!("unknown relative scale: {} (expected one of {})", name, valid.join(", "))
    })
}

/// Settings file location: flag or env, then the user config dir, then the working directory
fn settings_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_SETTINGS_FILE))
    })
}

/// Fail early instead of letting the preferences panic on a system the quantity lacks
fn check_forced_system(physical_quantity: PhysicalQuantity, system: Option<SystemOfMeasurement>) -> Result<()> {
    match system {
        Some(som) if UnitSystem::get_instance(som, physical_quantity).is_none() => Err(
            BrewError::UnknownUnitSystem(format!("{} has no {} unit system", physical_quantity, som)),
        ),
        _ => Ok(()),
    }
}

/// Resolve a unit system from a system of measurement name or a unique name
fn resolve_unit_system(physical_quantity: PhysicalQuantity, name: &str) -> Result<&'static UnitSystem> {
    let by_system = SystemOfMeasurement::from_name(name)
        .and_then(|som| UnitSystem::get_instance(som, physical_quantity));
    let by_unique_name = UnitSystem::get_instance_by_unique_name(name)
        .filter(|us| us.physical_quantity == physical_quantity);

    by_system
        .or(by_unique_name)
        .ok_or_else(|| BrewError::UnknownUnitSystem(name.to_string()))
}

#[derive(Serialize)]
struct SystemListing {
    quantity: PhysicalQuantity,
    current: &'static str,
    available: Vec<&'static str>,
}

fn run(args: Args) -> Result<()> {
    let locale = Locale::from_name(&args.locale)?;
    let path = settings_path(args.settings);
    debug!(path = %path.display(), %locale, "loading settings");

    let mut settings = JsonFileSettings::open(&path)?;
    let mut prefs = DisplayPreferences::new(locale);
    prefs.load_display_scales(&settings);

    match args.command {
        Command::Display { quantity, value, unit, system, scale, precision } => {
            check_forced_system(quantity, system)?;

            let unit = match unit {
                Some(name) => {
                    let preferred = prefs.get_display_unit_system(quantity);
                    Unit::get_unit(&name, quantity, Some(preferred)).ok_or_else(|| BrewError::UnknownUnit {
                        name: name.clone(),
                        quantity: quantity.to_string(),
                    })?
                }
                None => Unit::get_canonical_unit(quantity),
            };

            let amount = Amount::new(value, unit);
            let text = prefs.display_amount(&amount, precision, system, scale);
            if args.json {
                let number = prefs.amount_display(&amount, system, scale);
                println!("{}", json!({ "quantity": quantity, "text": text, "value": number }));
            } else {
                println!("{}", text);
            }
        }

        Command::Parse { quantity, text, system, scale } => {
            check_forced_system(quantity, system)?;

            let amount = prefs.qstring_to_si(&text, quantity, system, scale);
            if args.json {
                println!(
                    "{}",
                    json!({ "quantity": quantity, "value": amount.quantity(), "unit": amount.unit().name })
                );
            } else {
                println!("{}", amount);
            }
        }

        Command::Set { quantity, system } => {
            let unit_system = resolve_unit_system(quantity, &system)?;
            prefs.set_display_unit_system(quantity, unit_system);
            prefs.save_display_scales(&mut settings);
            settings.flush()?;
            info!(quantity = %quantity, unit_system = unit_system.unique_name, path = %settings.path().display(), "display unit system saved");

            if args.json {
                println!("{}", json!({ "quantity": quantity, "unit_system": unit_system.unique_name }));
            } else {
                println!("{}: {}", quantity, unit_system.unique_name);
            }
        }

        Command::List => {
            let listing: Vec<SystemListing> = PhysicalQuantity::ALL
                .iter()
                .map(|&pq| SystemListing {
                    quantity: pq,
                    current: prefs.get_display_unit_system(pq).unique_name,
                    available: UnitSystem::for_physical_quantity(pq).map(|us| us.unique_name).collect(),
                })
                .collect();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&listing).map_err(BrewError::Json)?);
            } else {
                for entry in &listing {
                    println!("{:<24} {:<40} [{}]", entry.quantity.to_string(), entry.current, entry.available.join(", "));
                }
            }
        }

        Command::Thickness { value, no_units } => {
            let text = prefs.display_thickness(value, !no_units);
            if args.json {
                println!("{}", json!({ "thickness": text }));
            } else {
                println!("{}", text);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
