//! Proportional disbursement of a reimbursement among active guarantors.
//!
//! Shares are pro-rata on pledge percentage. Because each share is rounded
//! independently, the last active guarantor in origination order receives
//! the residual instead of its own rounded share, so the shares always sum
//! exactly to the amount distributed. The cap on reimbursement is applied
//! upstream against the aggregate pledge pool, not per guarantor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanServicingError;
use crate::terms::GuarantorPledge;
use crate::types::{round_money, Money};
use crate::LoanServicingResult;

/// A single guarantor's share of one payment's reimbursement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disbursement {
    pub guarantor_id: String,
    pub share_amount: Money,
}

/// Split `guarantor_applied` among the active guarantors (pledge > 0).
///
/// A zero amount yields no disbursements. A positive amount with no active
/// guarantor is a caller error: the allocator folds that case into a zero
/// guarantor headroom, so money can never arrive here with nowhere to go.
pub fn distribute(
    guarantor_applied: Money,
    guarantors: &[GuarantorPledge],
) -> LoanServicingResult<Vec<Disbursement>> {
    if guarantor_applied < Decimal::ZERO {
        return Err(LoanServicingError::InvalidAmount {
            amount: guarantor_applied,
        });
    }
    if guarantor_applied == Decimal::ZERO {
        return Ok(Vec::new());
    }

    let active: Vec<&GuarantorPledge> = guarantors
        .iter()
        .filter(|g| g.pledge_percentage > Decimal::ZERO)
        .collect();
    if active.is_empty() {
        return Err(LoanServicingError::InvalidInput {
            field: "guarantors".into(),
            reason: "Cannot distribute a positive reimbursement with no active guarantor.".into(),
        });
    }

    let total_percentage: Decimal = active.iter().map(|g| g.pledge_percentage).sum();

    let mut disbursements = Vec::with_capacity(active.len());
    let mut distributed = Decimal::ZERO;
    let last = active.len() - 1;
    for (i, pledge) in active.iter().enumerate() {
        let share = if i == last {
            // Residual, not the rounded share: keeps the sum exact.
            guarantor_applied - distributed
        } else {
            round_money(guarantor_applied * pledge.pledge_percentage / total_percentage)
        };
        distributed += share;
        disbursements.push(Disbursement {
            guarantor_id: pledge.guarantor_id.clone(),
            share_amount: share,
        });
    }

    Ok(disbursements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pledge(id: &str, pct: Decimal) -> GuarantorPledge {
        GuarantorPledge {
            guarantor_id: id.into(),
            pledge_percentage: pct,
        }
    }

    #[test]
    fn test_even_split() {
        let shares = distribute(
            dec!(50.00),
            &[pledge("G1", dec!(25)), pledge("G2", dec!(25))],
        )
        .unwrap();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].share_amount, dec!(25.00));
        assert_eq!(shares[1].share_amount, dec!(25.00));
    }

    #[test]
    fn test_rounding_residual_goes_to_last() {
        // 33.33 at 25/25: first share rounds to 16.67, last takes 16.66.
        let shares = distribute(
            dec!(33.33),
            &[pledge("G1", dec!(25)), pledge("G2", dec!(25))],
        )
        .unwrap();
        assert_eq!(shares[0].share_amount, dec!(16.67));
        assert_eq!(shares[1].share_amount, dec!(16.66));
        let total: Decimal = shares.iter().map(|d| d.share_amount).sum();
        assert_eq!(total, dec!(33.33));
    }

    #[test]
    fn test_uneven_percentages_conserve() {
        let guarantors = [
            pledge("G1", dec!(10)),
            pledge("G2", dec!(15)),
            pledge("G3", dec!(8)),
        ];
        let amount = dec!(77.77);
        let shares = distribute(amount, &guarantors).unwrap();
        assert_eq!(shares.len(), 3);
        let total: Decimal = shares.iter().map(|d| d.share_amount).sum();
        assert_eq!(total, amount);
        // 77.77 * 10/33 = 23.567.. -> 23.57; 77.77 * 15/33 = 35.35
        assert_eq!(shares[0].share_amount, dec!(23.57));
        assert_eq!(shares[1].share_amount, dec!(35.35));
        assert_eq!(shares[2].share_amount, dec!(18.85));
    }

    #[test]
    fn test_single_guarantor_takes_all() {
        let shares = distribute(dec!(41.19), &[pledge("G1", dec!(50))]).unwrap();
        assert_eq!(shares.len(), 1);
        assert_eq!(shares[0].share_amount, dec!(41.19));
    }

    #[test]
    fn test_zero_pledges_excluded() {
        let shares = distribute(
            dec!(30.00),
            &[
                pledge("G1", dec!(30)),
                pledge("G2", Decimal::ZERO),
                pledge("G3", dec!(30)),
            ],
        )
        .unwrap();
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|d| d.guarantor_id != "G2"));
    }

    #[test]
    fn test_zero_amount_yields_nothing() {
        let shares = distribute(Decimal::ZERO, &[pledge("G1", dec!(25))]).unwrap();
        assert!(shares.is_empty());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = distribute(dec!(-1), &[pledge("G1", dec!(25))]).unwrap_err();
        assert!(matches!(err, LoanServicingError::InvalidAmount { .. }));
    }

    #[test]
    fn test_positive_amount_without_guarantors_rejected() {
        let err = distribute(dec!(10), &[]).unwrap_err();
        assert!(matches!(err, LoanServicingError::InvalidInput { .. }));
        let err = distribute(dec!(10), &[pledge("G1", Decimal::ZERO)]).unwrap_err();
        assert!(matches!(err, LoanServicingError::InvalidInput { .. }));
    }

    #[test]
    fn test_deterministic_for_fixed_order() {
        let guarantors = [pledge("G1", dec!(20)), pledge("G2", dec!(30))];
        let a = distribute(dec!(99.99), &guarantors).unwrap();
        let b = distribute(dec!(99.99), &guarantors).unwrap();
        assert_eq!(a[0].share_amount, b[0].share_amount);
        assert_eq!(a[1].share_amount, b[1].share_amount);
    }
}
