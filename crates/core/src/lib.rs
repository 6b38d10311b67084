pub mod assemble;
pub mod clock;
pub mod config;
pub mod defaults;
pub mod domain;
pub mod errors;
pub mod jitter;
pub mod pricing;
pub mod remote;

pub use assemble::{AssemblyInput, QuoteAssembler, DATE_FORMAT, VALIDITY_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use defaults::{base_labour_days, default_labour, default_materials, default_scope};
pub use domain::job::{JobType, PropertyType, QuoteDraft};
pub use domain::labour::LabourEstimate;
pub use domain::materials::{MaterialItem, MaterialList};
pub use domain::quote::{ClientInfo, JobDetails, QuoteRecord};
pub use errors::DomainError;
pub use jitter::{Jitter, PinnedJitter, StdJitter};
pub use pricing::FinancialSummary;
pub use remote::{QuoteRequest, RemoteQuotePayload, RemoteQuoteResponse};
