use serde::{Deserialize, Serialize};

use crate::domain::job::{JobType, PropertyType};
use crate::domain::labour::LabourEstimate;
use crate::domain::materials::MaterialItem;
use crate::pricing::FinancialSummary;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobDetails {
    pub job_type: JobType,
    pub property_type: PropertyType,
    pub bedrooms: String,
    pub floors: String,
    pub scope_of_work: String,
    pub additional_requirements: String,
}

/// The finished quote handed to the caller-supplied sink. Immutable once
/// constructed; this component keeps no copy of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub quote_number: String,
    pub client: ClientInfo,
    pub job: JobDetails,
    pub materials: Vec<MaterialItem>,
    pub labour: LabourEstimate,
    pub financials: FinancialSummary,
    /// Rendered `DD/MM/YYYY`.
    pub issue_date: String,
    /// Thirty days after issue, rendered `DD/MM/YYYY`.
    pub valid_until: String,
}

impl QuoteRecord {
    /// Id uniqueness plus the whole-pound financial identities. Assembly is
    /// expected to uphold both; this is the check tests lean on.
    pub fn check_invariants(&self) -> Result<(), crate::errors::DomainError> {
        let mut seen = std::collections::HashSet::new();
        for item in &self.materials {
            if !seen.insert(item.id) {
                return Err(crate::errors::DomainError::InvariantViolation(format!(
                    "duplicate material id {}",
                    item.id
                )));
            }
        }
        self.financials.check()
    }
}
