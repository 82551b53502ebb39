//! Duration arithmetic, formatting and parsing.
//!
//! A duration is a signed count of nanoseconds. The text form is the
//! familiar `1h30m0s` / `300ms` / `1.5s` notation, and `parse` accepts
//! the same unit suffixes.

use std::fmt::Write as _;

pub const NANOSECOND: i64 = 1;
pub const MICROSECOND: i64 = 1_000 * NANOSECOND;
pub const MILLISECOND: i64 = 1_000 * MICROSECOND;
pub const SECOND: i64 = 1_000 * MILLISECOND;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;

/// Why a duration string was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseDurationError {
    Invalid,
    MissingUnit,
    UnknownUnit,
    Overflow,
}

/// Render `nanos` as e.g. `1h30m0s`, `1.5s`, `300ms`, `1µs`, `0s`.
pub fn format(nanos: i64) -> String {
    let mut u = nanos.unsigned_abs();
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }

    if u < SECOND.unsigned_abs() {
        if u == 0 {
            return "0s".to_string();
        }
        let (prec, unit) = if u < MICROSECOND.unsigned_abs() {
            (0, "ns")
        } else if u < MILLISECOND.unsigned_abs() {
            (3, "µs")
        } else {
            (6, "ms")
        };
        let (whole, frac) = split_fraction(u, prec);
        let _ = write!(out, "{whole}{frac}{unit}");
        return out;
    }

    let (secs, frac) = split_fraction(u, 9);
    u = secs / 60;
    if u > 0 {
        let hours = u / 60;
        if hours > 0 {
            let _ = write!(out, "{hours}h");
        }
        let _ = write!(out, "{}m", u % 60);
    }
    let _ = write!(out, "{}{frac}s", secs % 60);
    out
}

/// Split `v` into `v / 10^prec` and the fractional digits as `.ddd`
/// without trailing zeros (empty when the fraction is zero).
fn split_fraction(v: u64, prec: u32) -> (u64, String) {
    let scale = 10u64.pow(prec);
    let frac = v % scale;
    if frac == 0 {
        return (v / scale, String::new());
    }
    let digits = format!("{frac:0width$}", width = prec as usize);
    (v / scale, format!(".{}", digits.trim_end_matches('0')))
}

fn unit_nanos(unit: &str) -> Option<u64> {
    Some(match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" => 60 * 1_000_000_000,
        "h" => 3_600 * 1_000_000_000,
        _ => return None,
    })
}

const LIMIT: u64 = 1 << 63;

/// Leading decimal integer of `s`, failing on overflow past 2^63.
fn leading_int(s: &str) -> Result<(u64, &str), ParseDurationError> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut x: u64 = 0;
    for b in s[..end].bytes() {
        if x > LIMIT / 10 {
            return Err(ParseDurationError::Overflow);
        }
        x = x * 10 + u64::from(b - b'0');
        if x > LIMIT {
            return Err(ParseDurationError::Overflow);
        }
    }
    Ok((x, &s[end..]))
}

/// Leading fraction digits of `s`; digits past the representable
/// precision are consumed but ignored.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut x: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for b in s[..end].bytes() {
        if overflow {
            continue;
        }
        if x > (LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let y = x * 10 + u64::from(b - b'0');
        if y > LIMIT {
            overflow = true;
            continue;
        }
        x = y;
        scale *= 10.0;
    }
    (x, scale, &s[end..])
}

/// Parse a signed sequence of decimal numbers with unit suffixes,
/// such as `300ms`, `-1.5h` or `2h45m`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn parse(text: &str) -> Result<i64, ParseDurationError> {
    let mut s = text;
    let mut neg = false;
    if let Some(rest) = s.strip_prefix('-') {
        neg = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(ParseDurationError::Invalid);
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(ParseDurationError::Invalid);
        }

        let before = s.len();
        let (mut v, rest) = leading_int(s)?;
        s = rest;
        let has_int = before != s.len();

        let mut frac = 0;
        let mut scale = 1.0;
        let mut has_frac = false;
        if let Some(rest) = s.strip_prefix('.') {
            let before = rest.len();
            let (f, sc, rest) = leading_fraction(rest);
            frac = f;
            scale = sc;
            has_frac = before != rest.len();
            s = rest;
        }
        if !has_int && !has_frac {
            return Err(ParseDurationError::Invalid);
        }

        let unit_end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if unit_end == 0 {
            return Err(ParseDurationError::MissingUnit);
        }
        let unit = unit_nanos(&s[..unit_end]).ok_or(ParseDurationError::UnknownUnit)?;
        s = &s[unit_end..];

        if v > LIMIT / unit {
            return Err(ParseDurationError::Overflow);
        }
        v *= unit;
        if frac > 0 {
            v += (frac as f64 * (unit as f64 / scale)) as u64;
            if v > LIMIT {
                return Err(ParseDurationError::Overflow);
            }
        }
        total = total
            .checked_add(v)
            .filter(|t| *t <= LIMIT)
            .ok_or(ParseDurationError::Overflow)?;
    }

    if neg {
        // total <= 2^63, so the wrapping negation is exact (2^63 -> i64::MIN).
        return Ok((total as i64).wrapping_neg());
    }
    if total > LIMIT - 1 {
        return Err(ParseDurationError::Overflow);
    }
    Ok(total as i64)
}

/// Absolute value, saturating at `i64::MAX`.
pub fn abs(d: i64) -> i64 {
    if d >= 0 {
        d
    } else if d == i64::MIN {
        i64::MAX
    } else {
        -d
    }
}

/// Round toward zero to a multiple of `m`; `m <= 0` leaves `d` unchanged.
pub fn truncate(d: i64, m: i64) -> i64 {
    if m <= 0 {
        return d;
    }
    d - d % m
}

#[allow(clippy::cast_sign_loss)]
fn less_than_half(x: i64, y: i64) -> bool {
    (x as u64).wrapping_add(x as u64) < y as u64
}

/// Round to the nearest multiple of `m`, halfway values away from zero,
/// saturating at the i64 bounds; `m <= 0` leaves `d` unchanged.
pub fn round(d: i64, m: i64) -> i64 {
    if m <= 0 {
        return d;
    }
    let mut r = d % m;
    if d < 0 {
        r = -r;
        if less_than_half(r, m) {
            return d + r;
        }
        match d.checked_sub(m - r) {
            Some(d1) => d1,
            None => i64::MIN,
        }
    } else {
        if less_than_half(r, m) {
            return d - r;
        }
        match d.checked_add(m - r) {
            Some(d1) => d1,
            None => i64::MAX,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn split_float(d: i64, unit: i64) -> f64 {
    let whole = d / unit;
    let rest = d % unit;
    whole as f64 + rest as f64 / unit as f64
}

pub fn hours(d: i64) -> f64 {
    split_float(d, HOUR)
}

pub fn minutes(d: i64) -> f64 {
    split_float(d, MINUTE)
}

pub fn seconds(d: i64) -> f64 {
    split_float(d, SECOND)
}

pub fn milliseconds(d: i64) -> i64 {
    d / MILLISECOND
}

pub fn microseconds(d: i64) -> i64 {
    d / MICROSECOND
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_like_clock_notation() {
        assert_eq!(format(0), "0s");
        assert_eq!(format(HOUR + 30 * MINUTE), "1h30m0s");
        assert_eq!(format(300 * MILLISECOND), "300ms");
        assert_eq!(format(1_500 * MILLISECOND), "1.5s");
        assert_eq!(format(MICROSECOND), "1µs");
        assert_eq!(format(1_100 * NANOSECOND), "1.1µs");
        assert_eq!(format(42), "42ns");
        assert_eq!(format(-2 * MINUTE), "-2m0s");
        assert_eq!(format(HOUR), "1h0m0s");
        assert_eq!(format(i64::MIN), "-2562047h47m16.854775808s");
    }

    #[test]
    fn parses_units_and_fractions() {
        assert_eq!(parse("300ms"), Ok(300 * MILLISECOND));
        assert_eq!(parse("-1.5h"), Ok(-(HOUR + 30 * MINUTE)));
        assert_eq!(parse("2h45m"), Ok(2 * HOUR + 45 * MINUTE));
        assert_eq!(parse("1µs"), Ok(MICROSECOND));
        assert_eq!(parse("1us"), Ok(MICROSECOND));
        assert_eq!(parse(".5s"), Ok(500 * MILLISECOND));
        assert_eq!(parse("0"), Ok(0));
        assert_eq!(parse("+5s"), Ok(5 * SECOND));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse(""), Err(ParseDurationError::Invalid));
        assert_eq!(parse("5"), Err(ParseDurationError::MissingUnit));
        assert_eq!(parse("5x"), Err(ParseDurationError::UnknownUnit));
        assert_eq!(parse("."), Err(ParseDurationError::Invalid));
        assert_eq!(parse("s"), Err(ParseDurationError::Invalid));
        assert_eq!(parse("9999999999h"), Err(ParseDurationError::Overflow));
    }

    #[test]
    fn rejects_component_sums_past_the_range() {
        assert_eq!(
            parse("9223372036854775808ns9223372036854775808ns"),
            Err(ParseDurationError::Overflow)
        );
        assert_eq!(
            parse("9223372036854775807ns1ns"),
            Err(ParseDurationError::Overflow)
        );
        assert_eq!(parse("-9223372036854775807ns1ns"), Ok(i64::MIN));
    }

    #[test]
    fn round_and_truncate() {
        let d = HOUR + 15 * MINUTE + 30 * SECOND + 918_273_645;
        assert_eq!(format(round(d, HOUR)), "1h0m0s");
        assert_eq!(format(round(d, MINUTE)), "1h16m0s");
        assert_eq!(format(round(d, SECOND)), "1h15m31s");
        assert_eq!(format(truncate(d, MINUTE)), "1h15m0s");
        assert_eq!(format(truncate(d, SECOND)), "1h15m30s");
        assert_eq!(round(d, 0), d);
        assert_eq!(round(-1_500 * MILLISECOND, SECOND), -2 * SECOND);
        assert_eq!(round(i64::MAX, HOUR), i64::MAX);
    }

    #[test]
    fn conversions() {
        let d = 90 * MINUTE;
        assert!((hours(d) - 1.5).abs() < f64::EPSILON);
        assert!((minutes(d) - 90.0).abs() < f64::EPSILON);
        assert_eq!(milliseconds(d), 5_400_000);
        assert_eq!(abs(-d), d);
        assert_eq!(abs(i64::MIN), i64::MAX);
    }
}
