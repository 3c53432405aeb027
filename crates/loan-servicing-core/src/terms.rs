//! Loan terms fixed at origination.
//!
//! Interest is a one-time flat fee (principal x rate), not accrued over
//! time, and the guarantor pledges are percentages of the principal
//! committed by third parties when the loan was originated. Terms are
//! read-only to the engine; only the ledger advances.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanServicingError;
use crate::types::{round_money, Money, Rate, PERCENT_SCALE};
use crate::LoanServicingResult;

/// A third-party pledge of a percentage of the principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuarantorPledge {
    pub guarantor_id: String,
    /// Percentage of the principal pledged, in points (0-100).
    pub pledge_percentage: Decimal,
}

/// Immutable origination contract for a single loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// Flat interest rate as a decimal (0.10 = 10%).
    pub flat_rate: Rate,
    pub guarantors: Vec<GuarantorPledge>,
}

impl LoanTerms {
    /// Construct validated terms. Fails on non-positive principal, negative
    /// rate, out-of-range pledge percentages, or blank guarantor ids.
    pub fn new(
        principal: Money,
        flat_rate: Rate,
        guarantors: Vec<GuarantorPledge>,
    ) -> LoanServicingResult<Self> {
        let terms = LoanTerms {
            principal,
            flat_rate,
            guarantors,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Re-check the invariants, e.g. after deserializing from an external
    /// store that bypassed [`LoanTerms::new`].
    pub fn validate(&self) -> LoanServicingResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanServicingError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive.".into(),
            });
        }
        if self.flat_rate < Decimal::ZERO {
            return Err(LoanServicingError::InvalidInput {
                field: "flat_rate".into(),
                reason: "Flat rate cannot be negative.".into(),
            });
        }
        for pledge in &self.guarantors {
            if pledge.guarantor_id.trim().is_empty() {
                return Err(LoanServicingError::InvalidInput {
                    field: "guarantor_id".into(),
                    reason: "Guarantor id cannot be blank.".into(),
                });
            }
            if pledge.pledge_percentage < Decimal::ZERO
                || pledge.pledge_percentage > PERCENT_SCALE
            {
                return Err(LoanServicingError::InvalidInput {
                    field: "pledge_percentage".into(),
                    reason: format!(
                        "Guarantor '{}' pledges {}%; must be between 0 and 100.",
                        pledge.guarantor_id, pledge.pledge_percentage
                    ),
                });
            }
        }
        // Reimbursement draws from half of each payment's post-interest
        // pool, so the lifetime guarantor flow is half the principal. A
        // larger aggregate pledge could never be repaid in full and the
        // loan could never settle.
        let aggregate: Decimal = self.guarantors.iter().map(|g| g.pledge_percentage).sum();
        if aggregate > PERCENT_SCALE / dec!(2) {
            return Err(LoanServicingError::InvalidInput {
                field: "guarantors".into(),
                reason: format!(
                    "Aggregate pledge of {aggregate}% exceeds the reimbursable 50% of principal."
                ),
            });
        }
        Ok(())
    }

    /// One-time flat interest: principal x rate, at cent precision.
    pub fn total_interest(&self) -> Money {
        round_money(self.principal * self.flat_rate)
    }

    /// Everything the borrower owes over the life of the loan.
    pub fn total_repayable(&self) -> Money {
        self.principal + self.total_interest()
    }

    /// Aggregate amount covered by guarantors at origination, eligible for
    /// reimbursement as the loan is repaid.
    pub fn pledge_pool(&self) -> Money {
        let pool: Decimal = self
            .guarantors
            .iter()
            .map(|g| g.pledge_percentage / PERCENT_SCALE * self.principal)
            .sum();
        round_money(pool)
    }

    /// Guarantors with a non-zero pledge, in origination order.
    pub fn active_guarantors(&self) -> Vec<&GuarantorPledge> {
        self.guarantors
            .iter()
            .filter(|g| g.pledge_percentage > Decimal::ZERO)
            .collect()
    }
}
