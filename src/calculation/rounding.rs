//! Currency rounding rules.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a currency amount to the cent using banker's rounding.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.125").unwrap()), Decimal::from_str("10.12").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("10.135").unwrap()), Decimal::from_str("10.14").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    to_cents(amount, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a tax liability to the cent, away from zero.
///
/// Any positive liability, however small, produces at least one cent.
pub fn round_tax(amount: Decimal) -> Decimal {
    to_cents(amount, RoundingStrategy::AwayFromZero)
}

/// Rounds an hour quantity to two decimal places.
pub fn round_hours(hours: Decimal) -> Decimal {
    to_cents(hours, RoundingStrategy::MidpointNearestEven)
}

/// Rounds to two places and pads the scale so `5` prints as `5.00`.
fn to_cents(value: Decimal, strategy: RoundingStrategy) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, strategy);
    rounded.rescale(2);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_half_even() {
        assert_eq!(round_currency(dec("0.005")), dec("0.00"));
        assert_eq!(round_currency(dec("0.015")), dec("0.02"));
        assert_eq!(round_currency(dec("1234.5678")), dec("1234.57"));
    }

    #[test]
    fn test_round_tax_never_drops_a_positive_liability() {
        assert_eq!(round_tax(dec("0.0015")), dec("0.01"));
        assert_eq!(round_tax(dec("12.341")), dec("12.35"));
        assert_eq!(round_tax(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_rounded_values_have_two_decimal_places() {
        assert_eq!(round_currency(dec("5")).to_string(), "5.00");
        assert_eq!(round_currency(dec("5.999")).to_string(), "6.00");
        assert_eq!(round_hours(dec("8.0833333")).to_string(), "8.08");
    }
}
