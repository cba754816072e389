//! Compound duration strings: `"300ms"`, `"-1.5h"`, `"2h45m"`.

use chrono::TimeDelta;

use crate::error::DurationError;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

/// Largest magnitude a parsed duration may reach, in nanoseconds. Only a
/// negative duration may actually hit it (`i64::MIN`).
const MAX_MAGNITUDE: u64 = 1 << 63;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // ASCII, U+00B5 micro sign, U+03BC greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parses a signed duration made of `<number><unit>` segments.
///
/// Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m` and `h`. Each
/// number may have a fraction. An optional leading `+` or `-` applies to the
/// whole value. A number without a unit is rejected, except for `"0"`.
///
/// ```
/// use chrono::TimeDelta;
/// use trogon_env::parse_duration;
///
/// assert_eq!(parse_duration("2h30m45s"), Ok(TimeDelta::seconds(9045)));
/// assert_eq!(parse_duration("-1.5h"), Ok(TimeDelta::minutes(-90)));
/// assert!(parse_duration("42").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());
    let overflow = || DurationError::Overflow(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !matches!(rest.as_bytes()[0], b'.' | b'0'..=b'9') {
            return Err(invalid());
        }

        let (whole_digits, tail) = split_digits(rest);
        let whole = leading_int(whole_digits).ok_or_else(overflow)?;
        rest = tail;

        let mut fraction = Fraction::default();
        let mut has_fraction_digits = false;
        if let Some(tail) = rest.strip_prefix('.') {
            let (fraction_digits, tail) = split_digits(tail);
            fraction = leading_fraction(fraction_digits);
            has_fraction_digits = !fraction_digits.is_empty();
            rest = tail;
        }
        if whole_digits.is_empty() && !has_fraction_digits {
            // "." or ".s"
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        if whole > MAX_MAGNITUDE / per_unit {
            return Err(overflow());
        }
        let mut segment = whole * per_unit;
        if fraction.value > 0 {
            segment += (fraction.value as f64 * (per_unit as f64 / fraction.scale)) as u64;
            if segment > MAX_MAGNITUDE {
                return Err(overflow());
            }
        }

        total = total
            .checked_add(segment)
            .filter(|sum| *sum <= MAX_MAGNITUDE)
            .ok_or_else(overflow)?;
    }

    let nanos = if negative {
        // MAX_MAGNITUDE itself wraps onto i64::MIN, which is the intent.
        (total as i64).wrapping_neg()
    } else {
        i64::try_from(total).map_err(|_| overflow())?
    };
    Ok(TimeDelta::nanoseconds(nanos))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// `None` once the value passes [`MAX_MAGNITUDE`].
fn leading_int(digits: &str) -> Option<u64> {
    let mut value: u64 = 0;
    for digit in digits.bytes() {
        if value > MAX_MAGNITUDE / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > MAX_MAGNITUDE {
            return None;
        }
    }
    Some(value)
}

#[derive(Debug, Clone, Copy)]
struct Fraction {
    value: u64,
    scale: f64,
}

impl Default for Fraction {
    fn default() -> Self {
        Self {
            value: 0,
            scale: 1.0,
        }
    }
}

/// Digits past the representable precision are dropped, not rejected.
fn leading_fraction(digits: &str) -> Fraction {
    let mut fraction = Fraction::default();
    for digit in digits.bytes() {
        if fraction.value > (MAX_MAGNITUDE - 1) / 10 {
            break;
        }
        let next = fraction.value * 10 + u64::from(digit - b'0');
        if next > MAX_MAGNITUDE {
            break;
        }
        fraction.value = next;
        fraction.scale *= 10.0;
    }
    fraction
}
