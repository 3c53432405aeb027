//! Settlement contract between the engine and its orchestration boundary.
//!
//! The engine itself performs no I/O. [`settle_payment`] composes the
//! allocator and the distributor and emits one audit record for the loan
//! payment plus one per guarantor share. The caller owns persistence and
//! must commit the resulting ledger, the loan-account delta, and every
//! guarantor credit as one atomic unit; a ledger that advances without its
//! disbursements (or vice versa) is a correctness violation. Callers must
//! also serialize settlements per loan, either with a per-loan lock held
//! across read-settle-write or an optimistic version check that retries on
//! conflict. Ledgers of distinct loans are independent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::{allocate, AllocationResult};
use crate::disbursement::{distribute, Disbursement};
use crate::ledger::LoanLedger;
use crate::terms::LoanTerms;
use crate::types::Money;
use crate::LoanServicingResult;

// ---------------------------------------------------------------------------
// Audit records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    LoanRepayment,
    GuarantorReimbursement,
}

/// Component breakdown carried on the repayment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub interest: Money,
    pub guarantor_reimbursement: Money,
    pub principal: Money,
}

/// One audit-sink entry: the loan repayment itself, or a single guarantor
/// credit derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub reference: Uuid,
    pub kind: TransactionKind,
    pub account_id: String,
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PaymentBreakdown>,
    pub recorded_at: DateTime<Utc>,
}

/// Everything the orchestration boundary needs to commit for one payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementOutcome {
    pub allocation: AllocationResult,
    pub disbursements: Vec<Disbursement>,
    pub transactions: Vec<TransactionRecord>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Run the full settlement pipeline for one payment: allocate, distribute
/// the guarantor share, and build the audit records.
pub fn settle_payment(
    terms: &LoanTerms,
    ledger: &LoanLedger,
    loan_account_id: &str,
    amount: Money,
    paid_at: DateTime<Utc>,
) -> LoanServicingResult<SettlementOutcome> {
    let allocation = allocate(ledger, terms, amount, paid_at)?;
    let disbursements = distribute(allocation.guarantor_applied, &terms.guarantors)?;

    let mut transactions = Vec::with_capacity(1 + disbursements.len());
    transactions.push(TransactionRecord {
        reference: Uuid::new_v4(),
        kind: TransactionKind::LoanRepayment,
        account_id: loan_account_id.to_string(),
        amount: allocation.applied_payment,
        breakdown: Some(PaymentBreakdown {
            interest: allocation.interest_applied,
            guarantor_reimbursement: allocation.guarantor_applied,
            principal: allocation.principal_applied,
        }),
        recorded_at: paid_at,
    });
    for share in &disbursements {
        transactions.push(TransactionRecord {
            reference: Uuid::new_v4(),
            kind: TransactionKind::GuarantorReimbursement,
            account_id: share.guarantor_id.clone(),
            amount: share.share_amount,
            breakdown: None,
            recorded_at: paid_at,
        });
    }

    Ok(SettlementOutcome {
        allocation,
        disbursements,
        transactions,
    })
}
