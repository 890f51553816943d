//! Fixed-point currency formatting and parsing
//!
//! Domain currency values are integers scaled by [`CURRENCY_MULTIPLIER`];
//! editable values are human-formatted decimal strings with configurable
//! group and decimal separators. The round trip is loss-free for amounts
//! representable at the configured number of decimal places within the
//! safe-integer range.

use crate::constants::{MAX_SAFE_INTEGER, MIN_SAFE_INTEGER, MSG_INVALID_CURRENCY};

/// Fixed-point multiplier between domain minor units and whole amounts
pub const CURRENCY_MULTIPLIER: i64 = 10_000;

/// Locale configuration for currency display
///
/// Tests and deterministic round trips should pin a fixed format rather
/// than deriving one from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Separator between thousands groups of the integer part
    pub group_separator:   char,
    /// Separator between the integer and fractional parts
    pub decimal_separator: char,
    /// Number of fractional digits displayed
    pub decimal_places:    u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            group_separator:   ',',
            decimal_separator: '.',
            decimal_places:    2,
        }
    }
}

/// Format a domain value (minor units) as an editable decimal string
///
/// Rounds half away from zero to the configured decimal places:
/// `19999` minor units at two places formats as `"2.00"`.
pub fn format_minor(minor: i64, format: &CurrencyFormat) -> String {
    let places_factor = 10_i128.pow(format.decimal_places);
    let numerator = i128::from(minor) * places_factor;
    let divisor = i128::from(CURRENCY_MULTIPLIER);
    let half = divisor / 2;
    let scaled = if numerator >= 0 {
        (numerator + half) / divisor
    } else {
        (numerator - half) / divisor
    };

    let negative = scaled < 0;
    let magnitude = scaled.unsigned_abs();
    let whole = magnitude / places_factor.unsigned_abs();
    let fraction = magnitude % places_factor.unsigned_abs();

    let mut grouped = String::new();
    let digits = whole.to_string();
    let first_group = digits.len() % 3;
    for (at, digit) in digits.chars().enumerate() {
        if at != 0 && (at + 3 - first_group) % 3 == 0 {
            grouped.push(format.group_separator);
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if format.decimal_places > 0 {
        out.push(format.decimal_separator);
        #[allow(clippy::cast_possible_truncation, reason = "display widths are tiny")]
        let width = format.decimal_places as usize;
        out.push_str(&format!("{fraction:0width$}"));
    }
    out
}

/// Parse an editable decimal string back to a domain value (minor units)
///
/// Group separators are stripped; fractional digits beyond the multiplier's
/// precision round half away from zero. The resulting minor-unit value must
/// stay within the safe-integer range.
///
/// # Errors
/// Returns a user-facing message when the text is not a decimal amount or
/// the amount is out of range.
pub fn parse_minor(text: &str, format: &CurrencyFormat) -> Result<i64, String> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| *ch != format.group_separator)
        .collect();
    if cleaned.is_empty() {
        return Err(MSG_INVALID_CURRENCY.to_string());
    }

    let (negative, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let (whole_digits, fraction_digits) = match unsigned.split_once(format.decimal_separator) {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    if whole_digits.is_empty() && fraction_digits.is_empty() {
        return Err(MSG_INVALID_CURRENCY.to_string());
    }
    if !whole_digits.chars().all(|ch| ch.is_ascii_digit())
        || !fraction_digits.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(MSG_INVALID_CURRENCY.to_string());
    }

    let whole: i128 = if whole_digits.is_empty() {
        0
    } else {
        whole_digits
            .parse()
            .map_err(|_| MSG_INVALID_CURRENCY.to_string())?
    };

    // Scale the fraction to multiplier precision, rounding the excess
    let multiplier = i128::from(CURRENCY_MULTIPLIER);
    let mut fraction_minor: i128 = 0;
    if !fraction_digits.is_empty() {
        let fraction: i128 = fraction_digits
            .parse()
            .map_err(|_| MSG_INVALID_CURRENCY.to_string())?;
        let fraction_scale = 10_i128.pow(
            u32::try_from(fraction_digits.len()).map_err(|_| MSG_INVALID_CURRENCY.to_string())?,
        );
        fraction_minor = (fraction * multiplier + fraction_scale / 2) / fraction_scale;
    }

    let mut minor = whole * multiplier + fraction_minor;
    if negative {
        minor = -minor;
    }
    if minor > i128::from(MAX_SAFE_INTEGER) || minor < i128::from(MIN_SAFE_INTEGER) {
        return Err("Amount out of range".to_string());
    }
    #[allow(clippy::cast_possible_truncation, reason = "range checked above")]
    Ok(minor as i64)
}
