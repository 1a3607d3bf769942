//! Exact decimal rendering of integer token amounts.
use num_bigint::BigUint;

/// How many fractional digits to keep when scaling an amount down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Keep every significant digit, trimming trailing zeros.
    Full,
    /// Truncate to exactly this many fractional digits.
    Fixed(u32),
}

/// Divide `amount` by `10^decimals` and render the quotient as a decimal string.
///
/// The division is exact: the integer and fractional parts are computed on the
/// big integer, never through a float.
pub fn scale_down(amount: &BigUint, decimals: u32, precision: Precision) -> String {
    let scale = BigUint::from(10u32).pow(decimals);
    let whole = amount / &scale;
    let remainder = amount % &scale;

    let mut fraction = if decimals == 0 {
        String::new()
    } else {
        format!("{:0>width$}", remainder.to_string(), width = decimals as usize)
    };

    match precision {
        Precision::Full => {
            let trimmed = fraction.trim_end_matches('0').len();
            fraction.truncate(trimmed);
        }
        Precision::Fixed(digits) => {
            let digits = digits as usize;
            if fraction.len() > digits {
                fraction.truncate(digits);
            } else {
                fraction.extend(std::iter::repeat_n('0', digits - fraction.len()));
            }
        }
    }

    if fraction.is_empty() { whole.to_string() } else { format!("{whole}.{fraction}") }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    #[test]
    fn full_precision_trims_zeros() {
        assert_eq!(scale_down(&big("8000000"), 6, Precision::Full), "8");
        assert_eq!(scale_down(&big("1500000"), 6, Precision::Full), "1.5");
        assert_eq!(scale_down(&big("1"), 18, Precision::Full), "0.000000000000000001");
        assert_eq!(scale_down(&big("0"), 6, Precision::Full), "0");
    }

    #[test]
    fn fixed_precision_truncates() {
        assert_eq!(scale_down(&big("8000000"), 6, Precision::Fixed(4)), "8.0000");
        assert_eq!(scale_down(&big("1234567899"), 6, Precision::Fixed(4)), "1234.5678");
        assert_eq!(scale_down(&big("999999999999999999"), 18, Precision::Fixed(4)), "0.9999");
    }

    #[test]
    fn fixed_precision_pads_short_scales() {
        assert_eq!(scale_down(&big("15"), 1, Precision::Fixed(4)), "1.5000");
        assert_eq!(scale_down(&big("7"), 0, Precision::Fixed(2)), "7.00");
    }

    #[test]
    fn amounts_beyond_u128_are_exact() {
        let amount = big("340282366920938463463374607431768211456");
        assert_eq!(
            scale_down(&amount, 18, Precision::Full),
            "340282366920938463463.374607431768211456"
        );
    }
}
