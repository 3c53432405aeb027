use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loan_servicing_core::{distribute, GuarantorPledge};

use crate::input;

/// Arguments for guarantor disbursement
#[derive(Args)]
pub struct DistributeArgs {
    /// Path to JSON input file with amount and guarantors (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Reimbursement amount to split
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Guarantor pledge as ID:PERCENT (repeatable)
    #[arg(long = "guarantor")]
    pub guarantors: Vec<String>,
}

#[derive(Deserialize)]
struct DistributeRequest {
    amount: Decimal,
    guarantors: Vec<GuarantorPledge>,
}

pub fn run_distribute(args: DistributeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: DistributeRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DistributeRequest {
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            guarantors: super::parse_guarantors(&args.guarantors)?,
        }
    };

    let disbursements = distribute(request.amount, &request.guarantors)?;
    Ok(serde_json::to_value(disbursements)?)
}
