//! Per-loan repayment ledger and completion detection.
//!
//! The ledger is the single mutable record of one loan's progress. It moves
//! through exactly two states: Active, and Settled once every ceiling is
//! reached. Settled is terminal; only the allocator produces new ledger
//! values, and it rejects payments against a settled ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::terms::LoanTerms;
use crate::types::{Money, COMPLETION_TOLERANCE};

/// Running totals for one loan. Created zeroed at origination and replaced
/// wholesale by each accepted payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanLedger {
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub guarantor_reimbursed: Money,
    pub principal_remaining: Money,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_at: Option<DateTime<Utc>>,
}

/// Lifecycle state derived from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Settled,
}

impl LoanLedger {
    /// Opening ledger for newly originated terms: zero progress, full
    /// principal outstanding.
    pub fn open(terms: &LoanTerms) -> Self {
        LoanLedger {
            total_paid: Decimal::ZERO,
            total_interest_paid: Decimal::ZERO,
            guarantor_reimbursed: Decimal::ZERO,
            principal_remaining: terms.principal,
            is_completed: false,
            last_payment_amount: None,
            last_payment_at: None,
        }
    }

    pub fn status(&self) -> LoanStatus {
        if self.is_completed {
            LoanStatus::Settled
        } else {
            LoanStatus::Active
        }
    }
}

/// Amount still owed: total repayable less everything paid, floored at zero.
pub fn remaining_balance(ledger: &LoanLedger, terms: &LoanTerms) -> Money {
    (terms.total_repayable() - ledger.total_paid).max(Decimal::ZERO)
}

/// True once all three progress ceilings are reached within the tolerance.
///
/// Each ceiling is tested independently: total paid against total repayable,
/// interest collected against the flat interest, and guarantor reimbursement
/// against the pledge pool. The tolerance absorbs sub-cent residue from
/// rounding across many small payments without permitting early completion.
pub fn is_complete(ledger: &LoanLedger, terms: &LoanTerms) -> bool {
    let paid_in_full = ledger.total_paid >= terms.total_repayable() - COMPLETION_TOLERANCE;
    let interest_settled =
        ledger.total_interest_paid >= terms.total_interest() - COMPLETION_TOLERANCE;
    let guarantors_reimbursed =
        ledger.guarantor_reimbursed >= terms.pledge_pool() - COMPLETION_TOLERANCE;
    paid_in_full && interest_settled && guarantors_reimbursed
}

/// Point-in-time view of a loan for status and summary queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanProgress {
    pub status: LoanStatus,
    pub total_paid: Money,
    pub total_repayable: Money,
    pub remaining_balance: Money,
    pub total_interest_paid: Money,
    pub total_interest: Money,
    pub guarantor_reimbursed: Money,
    pub pledge_pool: Money,
    pub principal_remaining: Money,
}

pub fn progress(ledger: &LoanLedger, terms: &LoanTerms) -> LoanProgress {
    LoanProgress {
        status: ledger.status(),
        total_paid: ledger.total_paid,
        total_repayable: terms.total_repayable(),
        remaining_balance: remaining_balance(ledger, terms),
        total_interest_paid: ledger.total_interest_paid,
        total_interest: terms.total_interest(),
        guarantor_reimbursed: ledger.guarantor_reimbursed,
        pledge_pool: terms.pledge_pool(),
        principal_remaining: ledger.principal_remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn terms() -> LoanTerms {
        LoanTerms::new(
            dec!(1000),
            dec!(0.10),
            vec![crate::terms::GuarantorPledge {
                guarantor_id: "G1".into(),
                pledge_percentage: dec!(50),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_open_ledger_is_zeroed() {
        let t = terms();
        let ledger = LoanLedger::open(&t);
        assert_eq!(ledger.total_paid, Decimal::ZERO);
        assert_eq!(ledger.total_interest_paid, Decimal::ZERO);
        assert_eq!(ledger.guarantor_reimbursed, Decimal::ZERO);
        assert_eq!(ledger.principal_remaining, dec!(1000));
        assert_eq!(ledger.status(), LoanStatus::Active);
        assert!(ledger.last_payment_amount.is_none());
    }

    #[test]
    fn test_remaining_balance_floors_at_zero() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(1100);
        assert_eq!(remaining_balance(&ledger, &t), Decimal::ZERO);
        ledger.total_paid = dec!(1100.50);
        assert_eq!(remaining_balance(&ledger, &t), Decimal::ZERO);
    }

    #[test]
    fn test_incomplete_when_any_ceiling_short() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(1100);
        ledger.total_interest_paid = dec!(100);
        // Guarantors still owed
        ledger.guarantor_reimbursed = dec!(400);
        assert!(!is_complete(&ledger, &t));
    }

    #[test]
    fn test_complete_at_exact_ceilings() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(1100);
        ledger.total_interest_paid = dec!(100);
        ledger.guarantor_reimbursed = dec!(500);
        assert!(is_complete(&ledger, &t));
    }

    #[test]
    fn test_tolerance_absorbs_sub_cent_residue() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(1099.995);
        ledger.total_interest_paid = dec!(99.995);
        ledger.guarantor_reimbursed = dec!(499.995);
        assert!(is_complete(&ledger, &t));
    }

    #[test]
    fn test_tolerance_does_not_permit_early_completion() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(1099.98);
        ledger.total_interest_paid = dec!(100);
        ledger.guarantor_reimbursed = dec!(500);
        assert!(!is_complete(&ledger, &t));
    }

    #[test]
    fn test_progress_summary() {
        let t = terms();
        let mut ledger = LoanLedger::open(&t);
        ledger.total_paid = dec!(330);
        ledger.total_interest_paid = dec!(30);
        ledger.guarantor_reimbursed = dec!(150);
        ledger.principal_remaining = dec!(850);
        let p = progress(&ledger, &t);
        assert_eq!(p.status, LoanStatus::Active);
        assert_eq!(p.remaining_balance, dec!(770));
        assert_eq!(p.total_repayable, dec!(1100));
        assert_eq!(p.pledge_pool, dec!(500));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let t = terms();
        let ledger = LoanLedger::open(&t);
        let json = serde_json::to_string(&ledger).unwrap();
        let back: LoanLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.principal_remaining, ledger.principal_remaining);
        assert!(!back.is_completed);
    }
}
