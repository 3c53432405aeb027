use chrono::{DateTime, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_servicing_core::settlement::settle_payment;
use loan_servicing_core::{LoanLedger, LoanTerms};

use crate::input;

/// Arguments for payment allocation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AllocateArgs {
    /// Path to JSON input file with terms, ledger, and amount (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Payment amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Loan principal. Flags describe a freshly originated loan; pass the
    /// current ledger via --input to continue an existing one.
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Flat interest rate as a decimal (0.10 = 10%)
    #[arg(long)]
    pub flat_rate: Option<Decimal>,

    /// Guarantor pledge as ID:PERCENT (repeatable)
    #[arg(long = "guarantor")]
    pub guarantors: Vec<String>,

    /// Loan account debited in the audit trail
    #[arg(long, default_value = "LOAN")]
    pub loan_account_id: String,

    /// Payment timestamp, RFC 3339; defaults to now
    #[arg(long)]
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct AllocateRequest {
    terms: LoanTerms,
    #[serde(default)]
    ledger: Option<LoanLedger>,
    amount: Decimal,
    #[serde(default)]
    loan_account_id: Option<String>,
    #[serde(default)]
    paid_at: Option<DateTime<Utc>>,
}

pub fn run_allocate(args: AllocateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: AllocateRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AllocateRequest {
            terms: LoanTerms::new(
                args.principal
                    .ok_or("--principal is required (or provide --input)")?,
                args.flat_rate
                    .ok_or("--flat-rate is required (or provide --input)")?,
                super::parse_guarantors(&args.guarantors)?,
            )?,
            ledger: None,
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            loan_account_id: Some(args.loan_account_id.clone()),
            paid_at: args.paid_at,
        }
    };

    let ledger = match request.ledger {
        Some(ledger) => ledger,
        None => LoanLedger::open(&request.terms),
    };
    let loan_account_id = request.loan_account_id.unwrap_or_else(|| "LOAN".into());
    let paid_at = request.paid_at.unwrap_or_else(Utc::now);

    let outcome = settle_payment(
        &request.terms,
        &ledger,
        &loan_account_id,
        request.amount,
        paid_at,
    )?;
    Ok(serde_json::to_value(outcome)?)
}
