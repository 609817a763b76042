//! Fixed-point number rendering
//!
//! `format!("{:.N}")` rounds exact ties to even. Robot dashboards render
//! with ties rounded away from zero, so `0.25` must read `0.3`, not `0.2`.
//! Everything that is not an exact tie is rounded to nearest on the exact
//! binary value, which is what `format!` already does.

/// Enough fractional digits to hold the exact expansion of any finite f64
const EXACT_DIGITS: usize = 1074;

/// Render `value` with exactly `digits` fractional digits
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // -0.0 renders as 0
    let value = if value == 0.0 { 0.0 } else { value };

    if !is_exact_tie(value, digits) {
        return format!("{:.*}", digits, value);
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    round_up_in_place(&mut kept);

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&kept[..int_len]).unwrap_or("0"));
    if digits > 0 {
        out.push('.');
        out.push_str(std::str::from_utf8(&kept[int_len..]).unwrap_or(""));
    }
    out
}

/// Shortest representation that round-trips (`2.0` -> `2`, `1.5` -> `1.5`)
///
/// Magnitudes below 1e-6 or at/above 1e21 switch to exponent form with a
/// signed exponent (`1e-7`, `2.5e-8`, `1e+21`), as number-to-string does on
/// the dashboard side.
pub fn to_shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    value.to_string()
}

/// True when the exact decimal expansion stops at a `5` right after `digits`
fn is_exact_tie(value: f64, digits: usize) -> bool {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let frac = match exact.split_once('.') {
        Some((_, frac)) => frac,
        None => return false,
    };
    let tail = &frac.as_bytes()[digits.min(frac.len())..];
    matches!(tail.split_first(), Some((b'5', rest)) if rest.iter().all(|b| *b == b'0'))
}

/// Add one unit in the last place to an ASCII digit string
fn round_up_in_place(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_nearest() {
        assert_eq!(to_fixed(1.2345, 2), "1.23");
        assert_eq!(to_fixed(87.45, 1), "87.5");
        assert_eq!(to_fixed(87.5, 1), "87.5");
        assert_eq!(to_fixed(0.0, 2), "0.00");
        assert_eq!(to_fixed(3.0, 1), "3.0");
    }

    #[test]
    fn test_exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-0.25, 1), "-0.3");
    }

    #[test]
    fn test_inexact_near_ties_follow_binary_value() {
        // 1.005 is stored slightly below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.15, 1), "0.1");
        assert_eq!(to_fixed(9.95, 1), "9.9");
        // 87.45 is stored slightly above it
        assert_eq!(to_fixed(87.45, 1), "87.5");
    }

    #[test]
    fn test_carry_propagates() {
        assert_eq!(to_fixed(19.5, 0), "20");
        assert_eq!(to_fixed(0.995, 2), "0.99");
        assert_eq!(to_fixed(9.9375, 3), "9.938");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(99.5, 0), "100");
    }

    #[test]
    fn test_negative_zero_and_non_finite() {
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_shortest() {
        assert_eq!(to_shortest(1.5), "1.5");
        assert_eq!(to_shortest(2.0), "2");
        assert_eq!(to_shortest(-0.0), "0");
        assert_eq!(to_shortest(0.000001), "0.000001");
        assert_eq!(to_shortest(123456789.25), "123456789.25");
    }

    #[test]
    fn test_shortest_exponent_range() {
        assert_eq!(to_shortest(1e-7), "1e-7");
        assert_eq!(to_shortest(2.5e-8), "2.5e-8");
        assert_eq!(to_shortest(-2.5e-8), "-2.5e-8");
        assert_eq!(to_shortest(1e21), "1e+21");
        assert_eq!(to_shortest(1.5e22), "1.5e+22");
        assert_eq!(to_shortest(1e20), "100000000000000000000");
    }
}
