//! Repayment allocation engine for flat-interest, guarantor-backed loans.
//!
//! Given a payment against an outstanding loan, the engine splits it into
//! interest, guarantor-pledge reimbursement, and principal reduction,
//! enforces per-component ceilings with overflow redirection, and produces
//! the proportional disbursement to each active guarantor. All operations
//! are pure: they take the current ledger snapshot and return new values,
//! leaving persistence and account posting to the caller.
//!
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

pub mod allocation;
pub mod disbursement;
pub mod error;
pub mod ledger;
pub mod settlement;
pub mod terms;
pub mod types;

pub use allocation::{allocate, AllocationResult};
pub use disbursement::{distribute, Disbursement};
pub use error::LoanServicingError;
pub use ledger::{is_complete, remaining_balance, LoanLedger, LoanStatus};
pub use terms::{GuarantorPledge, LoanTerms};
pub use types::*;

/// Standard result type for all loan-servicing operations
pub type LoanServicingResult<T> = Result<T, LoanServicingError>;
