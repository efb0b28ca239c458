//! Note length suffixes to beat weights
//!
//! A length suffix follows the pitch letter in ABC notation and is measured
//! in units of the tune's default note length:
//! `c` = 1, `c2` = 2, `c/` = 1/2, `c//` = 1/4, `c3/2` = 3/2, `c3/` = 3/2.

use crate::error::{BarchordError, Result};
use crate::ratio::Ratio;

/// Convert a length suffix into an exact beat weight.
///
/// Fractions are parsed as fractions, so `"/2"` and `"/"` agree on 1/2.
/// Anything else must be a plain number (`"2"`, `"1.5"`).
pub fn note_weight(suffix: &str) -> Result<Ratio> {
    if suffix.is_empty() {
        return Ok(Ratio::from(1));
    }

    let weight = match suffix.find('/') {
        Some(slash) => parse_fraction(suffix, slash),
        None => parse_decimal(suffix),
    };

    match weight {
        Some(weight) if weight > Ratio::zero() => Ok(weight),
        _ => Err(BarchordError::InvalidDuration(suffix.to_string())),
    }
}

/// `num/den`, `/den`, `num/`, `num//`. A slash run without a denominator
/// halves once per slash; an explicit denominator takes exactly one slash.
fn parse_fraction(suffix: &str, slash: usize) -> Option<Ratio> {
    let (num, rest) = suffix.split_at(slash);
    let numerator = if num.is_empty() { 1 } else { digits(num)? };

    let slashes = rest.chars().take_while(|&c| c == '/').count();
    let den = &rest[slashes..];

    let denominator = if den.is_empty() {
        1i64.checked_shl(u32::try_from(slashes).ok()?).filter(|&d| d > 0)?
    } else if slashes == 1 {
        digits(den).filter(|&d| d != 0)?
    } else {
        return None;
    };
    Some(Ratio::new(numerator, denominator))
}

/// `2`, `1.5`, `.25`
fn parse_decimal(s: &str) -> Option<Ratio> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    let scale = 10i64.checked_pow(u32::try_from(frac.len()).ok()?)?;
    let whole = if whole.is_empty() { 0 } else { digits(whole)? };
    let frac = if frac.is_empty() { 0 } else { digits(frac)? };
    Some(Ratio::new(whole.checked_mul(scale)?.checked_add(frac)?, scale))
}

fn digits(s: &str) -> Option<i64> {
    if s.bytes().all(|b| b.is_ascii_digit()) { s.parse().ok() } else { None }
}
