//! @ai:module:intent Round-half-up helpers for financial figures
//! @ai:module:layer domain
//! @ai:module:public_api round_half_up, div_half_up, MONEY_SCALE, RATIO_SCALE
//! @ai:module:stateless true

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits of every rounded monetary or percentage result.
pub const MONEY_SCALE: u32 = 2;

/// Fractional digits kept on growth ratios before scaling to a percentage.
pub const RATIO_SCALE: u32 = 4;

/// @ai:intent Round to `scale` places, ties away from zero
/// @ai:post result.scale() == scale (trailing zeros are kept)
/// @ai:effects pure
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// @ai:intent Divide and round the exact quotient half-up to `scale` places
/// @ai:pre denominator != 0
/// @ai:post None when the denominator is zero or the result is unrepresentable
/// @ai:effects pure
pub fn div_half_up(numerator: Decimal, denominator: Decimal, scale: u32) -> Option<Decimal> {
    if denominator.is_zero() {
        return None;
    }

    exact_quotient(numerator, denominator, scale).or_else(|| {
        // Mantissas too wide for i128 scaling: fall back to the 28-digit quotient.
        numerator
            .checked_div(denominator)
            .map(|q| round_half_up(q, scale))
    })
}

/// @ai:intent Integer long division on the raw mantissas
/// @ai:effects pure
fn exact_quotient(numerator: Decimal, denominator: Decimal, scale: u32) -> Option<Decimal> {
    // n = mn * 10^-sn, d = md * 10^-sd, so n/d * 10^scale = mn * 10^(sd + scale - sn) / md
    let shift = i64::from(denominator.scale()) + i64::from(scale) - i64::from(numerator.scale());
    let pow = 10i128.checked_pow(u32::try_from(shift.unsigned_abs()).ok()?)?;

    let (num, den) = if shift >= 0 {
        (numerator.mantissa().checked_mul(pow)?, denominator.mantissa())
    } else {
        (numerator.mantissa(), denominator.mantissa().checked_mul(pow)?)
    };

    let mut quotient = num / den;
    let remainder = num % den;

    if remainder != 0 && remainder.unsigned_abs() * 2 >= den.unsigned_abs() {
        quotient += if (num < 0) != (den < 0) { -1 } else { 1 };
    }

    Decimal::try_from_i128_with_scale(quotient, scale).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_half_up_ties_go_up() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(2.344), 2), dec!(2.34));
        assert_eq!(round_half_up(dec!(-2.345), 2), dec!(-2.35));
    }

    #[test]
    fn test_round_half_up_pads_scale() {
        let rounded = round_half_up(dec!(630), 2);
        assert_eq!(rounded.to_string(), "630.00");
        assert_eq!(rounded.scale(), 2);
    }

    #[test]
    fn test_div_half_up_exact_quotient() {
        assert_eq!(div_half_up(dec!(2460.00), dec!(2), 2), Some(dec!(1230.00)));
        assert_eq!(div_half_up(dec!(1), dec!(3), 4).unwrap().to_string(), "0.3333");
        assert_eq!(div_half_up(dec!(2), dec!(3), 4).unwrap().to_string(), "0.6667");
    }

    #[test]
    fn test_div_half_up_tie_and_sign() {
        assert_eq!(div_half_up(dec!(0.125), dec!(1), 2), Some(dec!(0.13)));
        assert_eq!(div_half_up(dec!(-0.125), dec!(1), 2), Some(dec!(-0.13)));
        assert_eq!(div_half_up(dec!(1), dec!(-8), 2), Some(dec!(-0.13)));
    }

    #[test]
    fn test_div_half_up_mixed_scales() {
        // 10.00 / 0.003 = 3333.333...
        assert_eq!(div_half_up(dec!(10.00), dec!(0.003), 2), Some(dec!(3333.33)));
        // 1.23456 / 2 = 0.61728
        assert_eq!(div_half_up(dec!(1.23456), dec!(2), 4), Some(dec!(0.6173)));
    }

    #[test]
    fn test_div_half_up_zero_denominator() {
        assert_eq!(div_half_up(dec!(1), Decimal::ZERO, 2), None);
    }
}
