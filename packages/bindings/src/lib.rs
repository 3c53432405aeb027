use chrono::{DateTime, Utc};
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use loan_servicing_core::ledger::progress;
use loan_servicing_core::settlement::settle_payment;
use loan_servicing_core::{distribute, GuarantorPledge, LoanLedger, LoanTerms};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct AllocatePayload {
    terms: LoanTerms,
    #[serde(default)]
    ledger: Option<LoanLedger>,
    amount: Decimal,
    #[serde(default)]
    loan_account_id: Option<String>,
    #[serde(default)]
    paid_at: Option<DateTime<Utc>>,
}

#[napi]
pub fn allocate_payment(input_json: String) -> NapiResult<String> {
    let payload: AllocatePayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let ledger = match payload.ledger {
        Some(ledger) => ledger,
        None => LoanLedger::open(&payload.terms),
    };
    let loan_account_id = payload.loan_account_id.unwrap_or_else(|| "LOAN".into());
    let paid_at = payload.paid_at.unwrap_or_else(Utc::now);

    let outcome = settle_payment(
        &payload.terms,
        &ledger,
        &loan_account_id,
        payload.amount,
        paid_at,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&outcome).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Disbursement
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct DistributePayload {
    amount: Decimal,
    guarantors: Vec<GuarantorPledge>,
}

#[napi]
pub fn distribute_reimbursement(input_json: String) -> NapiResult<String> {
    let payload: DistributePayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let disbursements = distribute(payload.amount, &payload.guarantors).map_err(to_napi_error)?;
    serde_json::to_string(&disbursements).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct StatusPayload {
    terms: LoanTerms,
    ledger: LoanLedger,
}

#[napi]
pub fn loan_status(input_json: String) -> NapiResult<String> {
    let payload: StatusPayload = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    payload.terms.validate().map_err(to_napi_error)?;
    let summary = progress(&payload.ledger, &payload.terms);
    serde_json::to_string(&summary).map_err(to_napi_error)
}
