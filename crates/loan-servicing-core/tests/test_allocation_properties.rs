//! Property tests for the allocation and disbursement contracts:
//! conservation, cap enforcement, and terminal-state idempotence hold for
//! arbitrary terms and payment sequences, not just the curated scenarios.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rust_decimal::Decimal;

use loan_servicing_core::{
    allocate, distribute, GuarantorPledge, LoanLedger, LoanServicingError, LoanTerms,
};

fn cents(c: i64) -> Decimal {
    Decimal::new(c, 2)
}

fn arb_terms() -> impl Strategy<Value = LoanTerms> {
    (
        1_00i64..5_000_000_00,              // principal in cents
        0i64..=50,                          // flat rate in percent
        prop::collection::vec(1u32..=25, 0..4), // pledge percentages
    )
        .prop_filter("aggregate pledge must stay within 50%", |(_, _, pledges)| {
            pledges.iter().sum::<u32>() <= 50
        })
        .prop_map(|(principal, rate_pct, pledges)| {
            let guarantors = pledges
                .into_iter()
                .enumerate()
                .map(|(i, pct)| GuarantorPledge {
                    guarantor_id: format!("G{}", i + 1),
                    pledge_percentage: Decimal::from(pct),
                })
                .collect();
            LoanTerms::new(cents(principal), Decimal::new(rate_pct, 2), guarantors).unwrap()
        })
}

proptest! {
    #[test]
    fn prop_every_allocation_conserves_and_respects_caps(
        terms in arb_terms(),
        payments in prop::collection::vec(1i64..=500_000_00, 1..25),
    ) {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut ledger = LoanLedger::open(&terms);

        for amount in payments {
            let result = match allocate(&ledger, &terms, cents(amount), ts) {
                Ok(r) => r,
                Err(LoanServicingError::AlreadySettled) => break,
                Err(e) => return Err(TestCaseError::fail(format!("unexpected error: {e}"))),
            };

            prop_assert_eq!(
                result.interest_applied + result.guarantor_applied + result.principal_applied,
                result.applied_payment
            );
            prop_assert!(result.applied_payment <= cents(amount));
            prop_assert!(result.ledger.total_interest_paid <= terms.total_interest());
            prop_assert!(result.ledger.guarantor_reimbursed <= terms.pledge_pool());
            prop_assert!(result.ledger.total_paid <= terms.total_repayable());
            prop_assert!(result.ledger.principal_remaining >= Decimal::ZERO);
            prop_assert!(result.ledger.principal_remaining <= terms.principal);

            ledger = result.ledger;
        }
    }

    #[test]
    fn prop_settled_ledger_rejects_everything(
        terms in arb_terms(),
        extra in 1i64..=500_000_00,
    ) {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut ledger = LoanLedger::open(&terms);

        // Drive to settlement with one payment covering everything.
        let full = terms.total_repayable() + Decimal::ONE;
        ledger = allocate(&ledger, &terms, full, ts).unwrap().ledger;
        prop_assert!(ledger.is_completed);

        let err = allocate(&ledger, &terms, cents(extra), ts).unwrap_err();
        prop_assert!(matches!(err, LoanServicingError::AlreadySettled));
    }

    #[test]
    fn prop_disbursement_shares_sum_exactly(
        amount in 1i64..=1_000_000_00,
        pledges in prop::collection::vec(1u32..=100, 1..6),
    ) {
        let guarantors: Vec<GuarantorPledge> = pledges
            .into_iter()
            .enumerate()
            .map(|(i, pct)| GuarantorPledge {
                guarantor_id: format!("G{}", i + 1),
                pledge_percentage: Decimal::from(pct),
            })
            .collect();

        let shares = distribute(cents(amount), &guarantors).unwrap();
        prop_assert_eq!(shares.len(), guarantors.len());
        let total: Decimal = shares.iter().map(|d| d.share_amount).sum();
        prop_assert_eq!(total, cents(amount));
    }

    #[test]
    fn prop_non_positive_amounts_always_rejected(
        terms in arb_terms(),
        amount in -1_000_00i64..=0,
    ) {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let ledger = LoanLedger::open(&terms);
        let err = allocate(&ledger, &terms, cents(amount), ts).unwrap_err();
        prop_assert!(
            matches!(err, LoanServicingError::InvalidAmount { .. }),
            "expected InvalidAmount error"
        );
    }
}
