//! Repayment waterfall allocation.
//!
//! Splits an incoming payment into three disjoint components:
//! 1. **Interest** -- the payment's pro-rata slice of the flat interest,
//!    capped at the interest still owed.
//! 2. **Guarantor reimbursement** -- half of what is left after interest,
//!    capped at the unreimbursed pledge pool.
//! 3. **Principal reduction** -- the remainder, including the overflow of
//!    any capped bucket.
//!
//! Every value is rounded to the cent; every split rounds one half and
//! derives the other by subtraction, so the components always sum exactly
//! to the applied payment. The allocator never mutates the input ledger; it
//! returns a new ledger value so callers can run an optimistic version
//! check before writing back.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanServicingError;
use crate::ledger::{is_complete, remaining_balance, LoanLedger};
use crate::terms::LoanTerms;
use crate::types::{round_money, Money};
use crate::LoanServicingResult;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Breakdown of a single accepted payment, plus the ledger that results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    /// What was actually applied; at most the requested amount, capped at
    /// the outstanding balance.
    pub applied_payment: Money,
    pub interest_applied: Money,
    pub guarantor_applied: Money,
    pub principal_applied: Money,
    /// Balance still owed after this payment.
    pub remaining_balance: Money,
    pub ledger: LoanLedger,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Allocate a payment against a loan.
///
/// Rejects non-positive amounts (`InvalidAmount`) and payments against a
/// settled ledger (`AlreadySettled`) before touching anything. An amount
/// exceeding the outstanding balance is not an error; it is silently capped.
pub fn allocate(
    ledger: &LoanLedger,
    terms: &LoanTerms,
    amount: Money,
    paid_at: DateTime<Utc>,
) -> LoanServicingResult<AllocationResult> {
    terms.validate()?;
    validate_ledger(ledger)?;

    // A payment below half a cent rounds to nothing; treat it as invalid
    // rather than recording a zero payment.
    let requested = round_money(amount);
    if requested <= Decimal::ZERO {
        return Err(LoanServicingError::InvalidAmount { amount });
    }
    if ledger.is_completed {
        return Err(LoanServicingError::AlreadySettled);
    }

    let total_interest = terms.total_interest();
    let total_repayable = terms.total_repayable();
    let pledge_pool = terms.pledge_pool();

    // 1. Cap at the outstanding balance.
    let remaining = (total_repayable - ledger.total_paid).max(Decimal::ZERO);
    let applied = requested.min(remaining);

    // 2. Pro-rata interest slice; principal is the derived half.
    let interest_ratio = total_interest / total_repayable;
    let raw_interest = round_money(applied * interest_ratio);
    let raw_principal = applied - raw_interest;

    // 3. Cap interest at its headroom; overflow joins the principal pool.
    let interest_headroom = (total_interest - ledger.total_interest_paid).max(Decimal::ZERO);
    let interest_applied = raw_interest.min(interest_headroom);
    let principal_pool = raw_principal + (raw_interest - interest_applied);

    // 4. Half the pool reimburses guarantors, the rest reduces the loan.
    let guarantor_portion = round_money(principal_pool * dec!(0.5));
    let loan_reduction = principal_pool - guarantor_portion;

    // 5. Cap reimbursement at the unreimbursed pledge pool; overflow
    //    redirects to principal.
    let guarantor_headroom = (pledge_pool - ledger.guarantor_reimbursed).max(Decimal::ZERO);
    let guarantor_applied = guarantor_portion.min(guarantor_headroom);
    let principal_applied = loan_reduction + (guarantor_portion - guarantor_applied);

    // 6. Advance the ledger and re-detect completion.
    let mut next = ledger.clone();
    next.total_paid += applied;
    next.total_interest_paid += interest_applied;
    next.guarantor_reimbursed += guarantor_applied;
    next.principal_remaining = (next.principal_remaining - principal_applied).max(Decimal::ZERO);
    next.last_payment_amount = Some(applied);
    next.last_payment_at = Some(paid_at);
    next.is_completed = is_complete(&next, terms);

    let remaining_after = remaining_balance(&next, terms);

    Ok(AllocationResult {
        applied_payment: applied,
        interest_applied,
        guarantor_applied,
        principal_applied,
        remaining_balance: remaining_after,
        ledger: next,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_ledger(ledger: &LoanLedger) -> LoanServicingResult<()> {
    let fields = [
        ("total_paid", ledger.total_paid),
        ("total_interest_paid", ledger.total_interest_paid),
        ("guarantor_reimbursed", ledger.guarantor_reimbursed),
        ("principal_remaining", ledger.principal_remaining),
    ];
    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(LoanServicingError::InvalidInput {
                field: field.into(),
                reason: format!("Ledger field cannot be negative (got {value})."),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
