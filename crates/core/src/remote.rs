//! Wire types for the remote quote-composition service. The service composes
//! quotes with an LLM, so its payloads are treated as loosely typed: every
//! field is decoded tolerantly and falls back to a local default on its own,
//! never failing the quote as a whole.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::job::{JobType, QuoteDraft};

pub const REGION: &str = "UK";
pub const CURRENCY: &str = "GBP";
pub const STANDARDS: [&str; 2] = ["BS 7671:2018+A2:2022", "Building Regulations Part P"];

/// Request sent to the remote composer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub job_type: String,
    pub property_details: PropertyDetails,
    pub client_requirements: String,
    pub region: String,
    pub standards: Vec<String>,
    pub currency: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(rename = "type")]
    pub property_type: String,
    pub bedrooms: String,
    pub floors: String,
}

impl QuoteRequest {
    pub fn from_draft(draft: &QuoteDraft, job_type: JobType) -> Self {
        Self {
            job_type: job_type.key().to_string(),
            property_details: PropertyDetails {
                property_type: draft.property_type.key().to_string(),
                bedrooms: draft.bedrooms.clone(),
                floors: draft.floors.clone(),
            },
            client_requirements: draft.additional_requirements.clone(),
            region: REGION.to_string(),
            standards: STANDARDS.iter().map(|s| s.to_string()).collect(),
            currency: CURRENCY.to_string(),
        }
    }
}

/// Top-level response envelope. A response is usable only when it carries a
/// quote object and no error field; anything else routes to the local path.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteQuoteResponse {
    #[serde(default)]
    pub quote: Option<RemoteQuotePayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RemoteQuoteResponse {
    pub fn into_usable(self) -> Option<RemoteQuotePayload> {
        if self.error.is_some() {
            return None;
        }
        self.quote
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteQuotePayload {
    #[serde(default)]
    pub materials: Option<Vec<RemoteMaterial>>,
    #[serde(default)]
    pub labour: Option<RemoteLabour>,
    #[serde(default, rename = "scopeOfWork")]
    pub scope_of_work: Option<String>,
}

impl RemoteQuotePayload {
    pub fn scope(&self) -> Option<&str> {
        self.scope_of_work.as_deref().map(str::trim).filter(|scope| !scope.is_empty())
    }
}

/// One remote material line. Field names and value types vary between
/// responses, so every accessor is total.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteMaterial {
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
    #[serde(default, rename = "unitPrice")]
    unit_price: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    cost: Option<Value>,
}

impl RemoteMaterial {
    /// `description` then `name`, else a generic placeholder.
    pub fn description(&self) -> String {
        coerce_text(self.description.as_ref())
            .or_else(|| coerce_text(self.name.as_ref()))
            .unwrap_or_else(|| "Electrical Component".to_string())
    }

    /// Coerced to an integer, floored at 1; defaults to 1 on parse failure.
    pub fn quantity(&self) -> u32 {
        coerce_decimal(self.quantity.as_ref())
            .and_then(|value| value.trunc().to_u32())
            .map(|value| value.max(1))
            .unwrap_or(1)
    }

    /// `unitPrice` then `price` then `cost`, clamped non-negative; defaults
    /// to zero on parse failure.
    pub fn unit_price(&self) -> Decimal {
        coerce_decimal(self.unit_price.as_ref())
            .or_else(|| coerce_decimal(self.price.as_ref()))
            .or_else(|| coerce_decimal(self.cost.as_ref()))
            .map(|value| value.max(Decimal::ZERO))
            .unwrap_or(Decimal::ZERO)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteLabour {
    #[serde(default)]
    days: Option<Value>,
    #[serde(default, rename = "dailyRate")]
    daily_rate: Option<Value>,
    #[serde(default)]
    rate: Option<Value>,
}

impl RemoteLabour {
    /// Remote days are trusted only from half a day upward.
    pub fn days_override(&self) -> Option<Decimal> {
        coerce_decimal(self.days.as_ref()).filter(|days| *days >= Decimal::new(5, 1))
    }

    /// Remote rates below £200/day are treated as noise and ignored.
    pub fn rate_override(&self) -> Option<Decimal> {
        coerce_decimal(self.daily_rate.as_ref())
            .or_else(|| coerce_decimal(self.rate.as_ref()))
            .filter(|rate| *rate >= Decimal::from(200))
    }
}

fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn coerce_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(Decimal::from(int))
            } else {
                number.as_f64().and_then(Decimal::from_f64)
            }
        }
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
