//! Locale-aware number handling
//!
//! Some locales write 1.000,10 and others write 1,000.10. A `Locale` carries
//! the decimal point and group separator in use and does the string/double
//! conversions that have to respect them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BrewError, Result};

/// Decimal point and digit grouping conventions for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Locale name, e.g. "en_US"
    pub name: String,
    /// Character between the integer and fractional parts
    pub decimal_point: char,
    /// Character between groups of three integer digits
    pub group_separator: char,
}

impl Locale {
    /// Create a locale from explicit separators
    pub fn new(name: &str, decimal_point: char, group_separator: char) -> Self {
        assert_ne!(
            decimal_point, group_separator,
            "decimal point and group separator must differ"
        );
        Locale {
            name: name.to_string(),
            decimal_point,
            group_separator,
        }
    }

    /// The "C" locale: `.` decimal point, `,` grouping
    pub fn c() -> Self {
        Locale::new("C", '.', ',')
    }

    pub fn en_us() -> Self {
        Locale::new("en_US", '.', ',')
    }

    pub fn de_de() -> Self {
        Locale::new("de_DE", ',', '.')
    }

    /// French groups with a narrow no-break space
    pub fn fr_fr() -> Self {
        Locale::new("fr_FR", ',', '\u{202F}')
    }

    /// Look up one of the built-in locales by name ("de_DE", "de-DE" and "de" all work)
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().replace('-', "_");
        let language = normalized.split('_').next().unwrap_or("").to_lowercase();
        match (normalized.as_str(), language.as_str()) {
            ("C", _) | ("POSIX", _) => Ok(Locale::c()),
            (_, "en") => Ok(Locale::en_us()),
            (_, "de") => Ok(Locale::de_de()),
            (_, "fr") => Ok(Locale::fr_fr()),
            _ => Err(BrewError::UnknownLocale(name.to_string())),
        }
    }

    /// Parse a number written in this locale.
    ///
    /// Group separators are dropped and the decimal point is normalised before
    /// handing the text to the standard parser. Values that overflow to
    /// infinity are rejected as out of range.
    pub fn to_double(&self, text: &str) -> Result<f64> {
        let trimmed = text.trim();
        let normalized: String = trimmed
            .chars()
            .filter(|&c| c != self.group_separator)
            .map(|c| if c == self.decimal_point { '.' } else { c })
            .collect();

        // A bare sign or separator is not a number even if the std parser were lenient
        if !normalized.chars().any(|c| c.is_ascii_digit()) {
            return Err(BrewError::parse(trimmed));
        }

        let value: f64 = normalized.parse().map_err(|_| BrewError::parse(trimmed))?;
        if !value.is_finite() {
            return Err(BrewError::OutOfRange { input: trimmed.to_string() });
        }
        Ok(value)
    }

    /// Render `value` in fixed-point notation with `precision` decimals and
    /// grouped integer digits
    pub fn format_fixed(&self, value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return format!("{}", value);
        }

        let plain = format!("{:.prec$}", value.abs(), prec = precision);
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
        let is_zero = plain.chars().all(|c| c == '0' || c == '.');
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }

        if let Some(frac) = frac_part {
            out.push(self.decimal_point);
            out.push_str(frac);
        }
        out
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_double_en_us() {
        let locale = Locale::en_us();
        assert_eq!(locale.to_double("12.34").unwrap(), 12.34);
        assert_eq!(locale.to_double("1,234.5").unwrap(), 1234.5);
        assert_eq!(locale.to_double("-0.5").unwrap(), -0.5);
        assert_eq!(locale.to_double(".25").unwrap(), 0.25);
    }

    #[test]
    fn test_to_double_de_de() {
        let locale = Locale::de_de();
        assert_eq!(locale.to_double("1.234,5").unwrap(), 1234.5);
        assert_eq!(locale.to_double("0,75").unwrap(), 0.75);
    }

    #[test]
    fn test_to_double_rejects_garbage() {
        let locale = Locale::en_us();
        assert!(locale.to_double("abc").is_err());
        assert!(locale.to_double("").is_err());
        assert!(locale.to_double(".").is_err());
    }

    #[test]
    fn test_to_double_out_of_range() {
        let locale = Locale::en_us();
        let huge = "9".repeat(400);
        let err = locale.to_double(&huge).unwrap_err();
        assert!(matches!(err, BrewError::OutOfRange { .. }));
    }

    #[test]
    fn test_format_fixed_grouping() {
        assert_eq!(Locale::en_us().format_fixed(1234567.891, 2), "1,234,567.89");
        assert_eq!(Locale::de_de().format_fixed(1234.5, 3), "1.234,500");
        assert_eq!(Locale::en_us().format_fixed(999.0, 0), "999");
        assert_eq!(Locale::en_us().format_fixed(12.0, 1), "12.0");
    }

    #[test]
    fn test_format_fixed_negative() {
        assert_eq!(Locale::en_us().format_fixed(-1500.26, 1), "-1,500.3");
        // Rounds to zero, so no sign
        assert_eq!(Locale::en_us().format_fixed(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_then_parse() {
        let locale = Locale::fr_fr();
        let text = locale.format_fixed(45678.125, 3);
        assert_eq!(locale.to_double(&text).unwrap(), 45678.125);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Locale::from_name("de_DE").unwrap(), Locale::de_de());
        assert_eq!(Locale::from_name("de-AT").unwrap(), Locale::de_de());
        assert_eq!(Locale::from_name("en").unwrap(), Locale::en_us());
        assert_eq!(Locale::from_name("C").unwrap(), Locale::c());
        assert!(Locale::from_name("tlh_KL").is_err());
    }
}
