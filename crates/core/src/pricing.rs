use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::labour::LabourEstimate;
use crate::domain::materials::MaterialList;
use crate::errors::DomainError;

/// UK VAT at 20%.
pub const VAT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Round to the nearest whole pound, halves away from zero.
pub fn round_pounds(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to pence.
pub fn round_pence(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Totals shown on the finished quote. All figures are whole pounds:
/// `subtotal = material_cost + labour_cost`, `vat = round(subtotal * 0.20)`,
/// `total = subtotal + vat`. VAT and total derive from the rounded subtotal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub material_cost: Decimal,
    pub labour_cost: Decimal,
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total: Decimal,
}

impl FinancialSummary {
    pub fn compute(materials: &MaterialList, labour: &LabourEstimate) -> Self {
        let material_cost = round_pounds(materials.raw_cost());
        let labour_cost = labour.total();
        let subtotal = material_cost + labour_cost;
        let vat = round_pounds(subtotal * VAT_RATE);
        let total = subtotal + vat;

        Self { material_cost, labour_cost, subtotal, vat, total }
    }

    pub fn check(&self) -> Result<(), DomainError> {
        if self.subtotal != self.material_cost + self.labour_cost {
            return Err(DomainError::InvariantViolation(
                "subtotal does not equal material cost plus labour cost".to_string(),
            ));
        }
        if self.vat != round_pounds(self.subtotal * VAT_RATE) {
            return Err(DomainError::InvariantViolation(
                "vat does not equal 20% of the subtotal".to_string(),
            ));
        }
        if self.total != self.subtotal + self.vat {
            return Err(DomainError::InvariantViolation(
                "total does not equal subtotal plus vat".to_string(),
            ));
        }
        Ok(())
    }
}
