use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use loan_servicing_core::ledger::{progress, LoanLedger};
use loan_servicing_core::LoanTerms;

use crate::input;

/// Arguments for the loan status query
#[derive(Args)]
pub struct StatusArgs {
    /// Path to JSON input file with terms and ledger
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct StatusRequest {
    terms: LoanTerms,
    ledger: LoanLedger,
}

pub fn run_status(args: StatusArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: StatusRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input file is required for a status query".into());
    };

    request.terms.validate()?;
    let summary = progress(&request.ledger, &request.terms);
    Ok(serde_json::to_value(summary)?)
}
