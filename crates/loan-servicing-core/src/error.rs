use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanServicingError {
    #[error("Invalid payment amount {amount}: payments must be greater than zero")]
    InvalidAmount { amount: Decimal },

    #[error("Loan is already settled: no further payments accepted")]
    AlreadySettled,

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanServicingError {
    fn from(e: serde_json::Error) -> Self {
        LoanServicingError::SerializationError(e.to_string())
    }
}
