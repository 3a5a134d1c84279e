//! Number and date formatting shared by the cards and the table
//!
//! Mirrors zh-CN locale output: CNY currency with no fraction digits,
//! percentages with exactly two, comma thousands separators.
//!
//! All rounding is half away from zero on a decimal digit string, never on
//! a scaled float. `to_fixed` rounds the exact binary value of its input the
//! way `toFixed` does; currency and percent round the shortest decimal form
//! the way locale number formatting does.

use chrono::NaiveDate;

/// Enough fraction digits to print any f64 exactly
const EXACT_PRECISION: usize = 1100;

/// Exact decimal expansion of `|value|`
fn exact_digits(value: f64) -> String {
    format!("{:.*}", EXACT_PRECISION, value.abs())
}

/// Shortest decimal that round-trips to `|value|`
fn shortest_digits(value: f64) -> String {
    format!("{}", value.abs())
}

/// Round an unsigned decimal string, scaled by `10^shift`, to `digits`
/// fraction digits, half away from zero
fn round_digits(unsigned: &str, shift: usize, digits: usize) -> String {
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let mut all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let mut point = int_part.len() + shift;
    let keep = point + digits;
    if all.len() <= keep {
        all.resize(keep + 1, b'0');
    }

    let round_up = all[keep] >= b'5';
    all.truncate(keep);
    if round_up {
        let mut carried = true;
        for d in all.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carried = false;
                break;
            }
        }
        if carried {
            all.insert(0, b'1');
            point += 1;
        }
    }

    let (int_digits, frac_digits) = all.split_at(point);
    let int_text: String = int_digits
        .iter()
        .skip_while(|&&b| b == b'0')
        .map(|&b| b as char)
        .collect();
    let mut out = if int_text.is_empty() { "0".to_string() } else { int_text };
    if digits > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|&b| b as char));
    }
    out
}

/// Insert thousands separators into an unsigned digit string with optional fraction
fn group_thousands(unsigned: &str) -> String {
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 + 4);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

fn non_finite(value: f64, prefix: &str, suffix: &str) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        format!("-{}∞{}", prefix, suffix)
    } else {
        format!("{}∞{}", prefix, suffix)
    }
}

/// `toFixed`-style fixed-point text, half away from zero
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return non_finite(value, "", "");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, round_digits(&exact_digits(value), 0, digits))
}

/// CNY amount, e.g. `¥1,234,568`. Negative inputs keep the sign even when they round to zero.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value, "¥", "");
    }
    let digits = group_thousands(&round_digits(&shortest_digits(value), 0, 0));
    if value.is_sign_negative() {
        format!("-¥{}", digits)
    } else {
        format!("¥{}", digits)
    }
}

/// Fraction as percent with two decimals, e.g. `0.12345` -> `12.35%`
pub fn format_percent(fraction: f64) -> String {
    if !fraction.is_finite() {
        return non_finite(fraction, "", "%");
    }
    let digits = group_thousands(&round_digits(&shortest_digits(fraction), 2, 2));
    if fraction.is_sign_negative() {
        format!("-{}%", digits)
    } else {
        format!("{}%", digits)
    }
}

/// Exposure already expressed in percent, e.g. `62.4` -> `62%`
pub fn format_exposure(percent: f64) -> String {
    format!("{}%", to_fixed(percent, 0))
}

/// ISO calendar date
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_no_fraction_digits() {
        assert_eq!(format_currency(8_920_000_000.0), "¥8,920,000,000");
        assert_eq!(format_currency(1_234_567.5), "¥1,234,568");
        assert_eq!(format_currency(999.4), "¥999");
        assert_eq!(format_currency(0.0), "¥0");
    }

    #[test]
    fn test_currency_negative() {
        assert_eq!(format_currency(-1500.0), "-¥1,500");
        assert_eq!(format_currency(-0.2), "-¥0");
        assert_eq!(format_currency(-0.0), "-¥0");
    }

    #[test]
    fn test_percent_two_decimals() {
        assert_eq!(format_percent(0.1326), "13.26%");
        assert_eq!(format_percent(0.05), "5.00%");
        assert_eq!(format_percent(-0.0421), "-4.21%");
        assert_eq!(format_percent(12.5), "1,250.00%");
        assert_eq!(format_percent(0.12345), "12.35%");
        assert_eq!(format_percent(0.99999), "100.00%");
    }

    #[test]
    fn test_period_return_display() {
        // 1.094 / 0.986 - 1 = 0.109533...
        assert_eq!(format_percent(1.094 / 0.986 - 1.0), "10.95%");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.4826, 3), "1.483");
        assert_eq!(to_fixed(2.0, 2), "2.00");
        assert_eq!(to_fixed(62.5, 0), "63");
        assert_eq!(format_exposure(-55.0), "-55%");
        assert_eq!(to_fixed(9.96, 1), "10.0");
        assert_eq!(to_fixed(0.4, 0), "0");
    }

    #[test]
    fn test_to_fixed_rounds_binary_value() {
        // Stored slightly below the written decimal
        assert_eq!(to_fixed(0.015, 2), "0.01");
        assert_eq!(to_fixed(0.045, 2), "0.04");
        assert_eq!(to_fixed(0.105, 2), "0.10");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        // Exact binary ties go away from zero
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_currency(f64::NAN), "NaN");
        assert_eq!(format_percent(f64::INFINITY), "∞%");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 2), "-∞");
    }

    #[test]
    fn test_format_date() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 8).unwrap();
        assert_eq!(format_date(d), "2020-01-08");
    }
}
