use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::round_pounds;

/// Billed labour for a quote. Days carry quarter-day granularity on the
/// default path; remote overrides may be finer and are kept as supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabourEstimate {
    pub days: Decimal,
    pub daily_rate: Decimal,
}

impl LabourEstimate {
    pub fn new(days: Decimal, daily_rate: Decimal) -> Self {
        Self { days: days.max(Decimal::ZERO), daily_rate: daily_rate.max(Decimal::ZERO) }
    }

    /// Days times rate, rounded to the nearest whole pound.
    pub fn total(&self) -> Decimal {
        round_pounds(self.days * self.daily_rate)
    }
}
