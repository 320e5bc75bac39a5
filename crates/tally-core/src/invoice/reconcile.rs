//! Cross-field repair and confidence scoring.

use rust_decimal::Decimal;

use crate::models::invoice::{LineAmounts, DEFAULT_DESCRIPTION, UNKNOWN_CUSTOMER};

/// Largest |quantity × unit price − total| still counted as consistent.
const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const BASE: f32 = 0.50;
const CUSTOMER_BONUS: f32 = 0.15;
const DESCRIPTION_BONUS: f32 = 0.10;
const QUANTITY_BONUS: f32 = 0.10;
const UNIT_PRICE_BONUS: f32 = 0.15;
const TOTAL_BONUS: f32 = 0.15;
const CONSISTENCY_BONUS: f32 = 0.15;

/// Fill in a missing amount from the other two.
///
/// Only the first applicable repair runs: total from quantity and unit
/// price, then quantity from total and unit price, then unit price from
/// total and quantity. A repair that overflows leaves the field as it was.
pub fn reconcile(amounts: LineAmounts) -> LineAmounts {
    let LineAmounts {
        quantity,
        unit_price,
        total_price,
    } = amounts;
    let zero = Decimal::ZERO;

    if quantity > zero && unit_price > zero && total_price.is_zero() {
        if let Some(total_price) = quantity.checked_mul(unit_price) {
            return LineAmounts { total_price, ..amounts };
        }
    } else if total_price > zero && unit_price > zero && quantity.is_zero() {
        if let Some(quantity) = total_price.checked_div(unit_price) {
            return LineAmounts { quantity, ..amounts };
        }
    } else if total_price > zero && quantity > zero && unit_price.is_zero() {
        if let Some(unit_price) = total_price.checked_div(quantity) {
            return LineAmounts { unit_price, ..amounts };
        }
    }

    amounts
}

/// Whether all amounts are positive and agree within a cent.
pub fn is_consistent(amounts: &LineAmounts) -> bool {
    let zero = Decimal::ZERO;
    if amounts.quantity <= zero || amounts.unit_price <= zero || amounts.total_price <= zero {
        return false;
    }

    amounts
        .quantity
        .checked_mul(amounts.unit_price)
        .and_then(|product| product.checked_sub(amounts.total_price))
        .is_some_and(|diff| diff.abs() < TOLERANCE)
}

/// Score how much of the invoice was recovered, in `[0, 1]`.
pub fn score_confidence(customer_name: &str, description: &str, amounts: &LineAmounts) -> f32 {
    let zero = Decimal::ZERO;
    let bonuses = [
        (customer_name != UNKNOWN_CUSTOMER, CUSTOMER_BONUS),
        (description != DEFAULT_DESCRIPTION, DESCRIPTION_BONUS),
        (amounts.quantity > zero, QUANTITY_BONUS),
        (amounts.unit_price > zero, UNIT_PRICE_BONUS),
        (amounts.total_price > zero, TOTAL_BONUS),
        (is_consistent(amounts), CONSISTENCY_BONUS),
    ];

    let score = bonuses
        .iter()
        .filter(|(fired, _)| *fired)
        .fold(BASE, |acc, (_, bonus)| acc + bonus);

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn amounts(q: Decimal, u: Decimal, t: Decimal) -> LineAmounts {
        LineAmounts::new(q, u, t)
    }

    #[test]
    fn test_total_from_quantity_and_price() {
        let r = reconcile(amounts(dec!(2), dec!(100), dec!(0)));
        assert_eq!(r, amounts(dec!(2), dec!(100), dec!(200)));
    }

    #[test]
    fn test_quantity_from_total_and_price() {
        let r = reconcile(amounts(dec!(0), dec!(25), dec!(100)));
        assert_eq!(r.quantity, dec!(4));
    }

    #[test]
    fn test_unit_price_from_total_and_quantity() {
        let r = reconcile(amounts(dec!(3), dec!(0), dec!(45)));
        assert_eq!(r.unit_price, dec!(15));
    }

    #[test]
    fn test_consistent_or_underdetermined_left_alone() {
        let full = amounts(dec!(2), dec!(100), dec!(150));
        assert_eq!(reconcile(full), full);

        let sparse = amounts(dec!(1), dec!(0), dec!(0));
        assert_eq!(reconcile(sparse), sparse);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let once = reconcile(amounts(dec!(3), dec!(7.5), dec!(0)));
        assert_eq!(reconcile(once), once);
    }

    #[test]
    fn test_overflowing_repair_is_skipped() {
        let huge = amounts(Decimal::MAX, dec!(2), dec!(0));
        assert_eq!(reconcile(huge), huge);
    }

    #[test]
    fn test_consistency_tolerance() {
        assert!(is_consistent(&amounts(dec!(3), dec!(3.33), dec!(9.995))));
        assert!(!is_consistent(&amounts(dec!(3), dec!(3.33), dec!(10))));
        assert!(!is_consistent(&amounts(dec!(0), dec!(1), dec!(0))));
    }

    #[test]
    fn test_confidence_floor_and_ceiling() {
        let nothing = amounts(dec!(0), dec!(0), dec!(0));
        assert_eq!(score_confidence(UNKNOWN_CUSTOMER, DEFAULT_DESCRIPTION, &nothing), 0.5);

        let everything = amounts(dec!(2), dec!(100), dec!(200));
        assert_eq!(score_confidence("中心小学", "支架", &everything), 1.0);
    }

    #[test]
    fn test_confidence_quantity_only() {
        let q = amounts(dec!(1), dec!(0), dec!(0));
        let score = score_confidence(UNKNOWN_CUSTOMER, DEFAULT_DESCRIPTION, &q);
        assert!((score - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_inconsistent_amounts_lose_bonus() {
        let a = amounts(dec!(2), dec!(100), dec!(150));
        let score = score_confidence(UNKNOWN_CUSTOMER, DEFAULT_DESCRIPTION, &a);
        assert!((score - 0.9).abs() < 1e-6);
    }
}
