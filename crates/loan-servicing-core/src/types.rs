use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.10 = 10% flat interest). Never as percentages.
pub type Rate = Decimal;

/// Pledge percentages are expressed in points (25 = 25%).
pub const PERCENT_SCALE: Decimal = dec!(100);

/// Tolerance on each completion ceiling. Absorbs sub-cent residue left by
/// rounding across long payment sequences; far below any valid payment.
pub const COMPLETION_TOLERANCE: Decimal = dec!(0.01);

/// Round a monetary value to the cent, midpoint away from zero.
///
/// Every split in the engine rounds one half through this function and
/// derives the other by subtraction, so the halves always sum exactly.
pub fn round_money(value: Decimal) -> Money {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
