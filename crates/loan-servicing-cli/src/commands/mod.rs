pub mod allocate;
pub mod distribute;
pub mod status;

use loan_servicing_core::GuarantorPledge;
use rust_decimal::Decimal;

/// Parse repeated `--guarantor ID:PERCENT` flags into pledges.
pub fn parse_guarantors(
    specs: &[String],
) -> Result<Vec<GuarantorPledge>, Box<dyn std::error::Error>> {
    specs
        .iter()
        .map(|spec| {
            let (id, pct) = spec
                .split_once(':')
                .ok_or_else(|| format!("Invalid guarantor '{spec}': expected ID:PERCENT"))?;
            let pledge_percentage: Decimal = pct
                .parse()
                .map_err(|_| format!("Invalid guarantor percentage in '{spec}'"))?;
            Ok(GuarantorPledge {
                guarantor_id: id.to_string(),
                pledge_percentage,
            })
        })
        .collect()
}
