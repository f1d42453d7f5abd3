//! Pulling numbers out of free-form amount text like "5.5 gal" or "1.234,5 L"

use regex::Regex;
use std::collections::HashMap;
use std::sync::{OnceLock, RwLock};

use brew_core::{BrewError, Locale, Result};
use tracing::{debug, error, warn};

/// Numeric types that can be extracted from amount text.
///
/// Integers are always produced by truncating the parsed double, so "1.9"
/// extracts as 1. Out of range values saturate.
pub trait FromRawDouble: Sized {
    fn from_raw_double(value: f64) -> Self;
}

impl FromRawDouble for f64 {
    fn from_raw_double(value: f64) -> Self {
        value
    }
}

impl FromRawDouble for i32 {
    fn from_raw_double(value: f64) -> Self {
        value as i32
    }
}

impl FromRawDouble for u32 {
    fn from_raw_double(value: f64) -> Self {
        value as u32
    }
}

/// Compiled amount patterns, keyed by (decimal point, group separator)
static AMOUNT_REGEX_CACHE: OnceLock<RwLock<HashMap<(char, char), Regex>>> = OnceLock::new();

fn get_cache() -> &'static RwLock<HashMap<(char, char), Regex>> {
    AMOUNT_REGEX_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// The number-then-optional-unit pattern for `locale`.
///
/// A unit token is a run of word characters and `°`, optionally joined by
/// `/`, `·` or `-` ("g/L", "J/kg·K"). Trailing punctuation is not part of it.
fn amount_pattern(locale: &Locale) -> String {
    let decimal = regex::escape(&locale.decimal_point.to_string());
    let group = regex::escape(&locale.group_separator.to_string());
    format!(
        r"(?i)([-+]?(?:\d+{group})*\d+(?:{decimal}\d+)?|[-+]?{decimal}\d+)\s*([\w°]+(?:[/·\-][\w°]+)*)?",
        decimal = decimal,
        group = group
    )
}

fn amount_regex(locale: &Locale) -> Result<Regex> {
    let key = (locale.decimal_point, locale.group_separator);
    let cache = get_cache();

    {
        let read_guard = cache.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(re) = read_guard.get(&key) {
            return Ok(re.clone());
        }
    }

    let pattern = amount_pattern(locale);
    let re = Regex::new(&pattern).map_err(|e| {
        error!(%locale, pattern = %pattern, "amount pattern failed to compile: {}", e);
        BrewError::parse(pattern.clone())
    })?;

    let mut write_guard = cache.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    write_guard.insert(key, re.clone());
    Ok(re)
}

/// Split amount text into its number and the unit token after it, if any.
///
/// Leading text before the first number is ignored, as is anything after
/// the unit token following it.
pub fn split_amount_text<'a>(locale: &Locale, input: &'a str) -> Result<(f64, Option<&'a str>)> {
    let re = amount_regex(locale)?;

    let caps = match re.captures(input) {
        Some(caps) => caps,
        None => {
            warn!(input, %locale, "error parsing amount text as number");
            return Err(BrewError::parse(input));
        }
    };

    // Group 1 is not optional, so a match always has it
    let number = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let value = locale.to_double(number).map_err(|e| {
        warn!(input, number, %locale, "could not convert matched number: {}", e);
        e
    })?;

    let token = caps.get(2).map(|m| m.as_str());
    debug!(input, value, token, "split amount text");
    Ok((value, token))
}

/// Extract the leading number from amount text in the active locale.
///
/// Callers that treat a failed parse as zero can use `unwrap_or_default()`.
pub fn extract_raw_from_string<T: FromRawDouble>(locale: &Locale, input: &str) -> Result<T> {
    split_amount_text(locale, input).map(|(value, _)| T::from_raw_double(value))
}
