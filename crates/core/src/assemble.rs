use chrono::Duration;
use rust_decimal::Decimal;

use crate::clock::Clock;
use crate::defaults;
use crate::domain::job::{JobType, QuoteDraft};
use crate::domain::labour::LabourEstimate;
use crate::domain::materials::MaterialList;
use crate::domain::quote::{ClientInfo, JobDetails, QuoteRecord};
use crate::jitter::Jitter;
use crate::pricing::FinancialSummary;
use crate::remote::RemoteQuotePayload;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const VALIDITY_DAYS: i64 = 30;

#[derive(Clone, Debug)]
pub struct AssemblyInput<'a> {
    pub draft: &'a QuoteDraft,
    pub job_type: JobType,
    pub materials: &'a MaterialList,
    pub remote: Option<&'a RemoteQuotePayload>,
}

/// Merges remote-provided or default materials and labour with user
/// overrides and produces the final priced record. Assembly is total: every
/// remote field falls back independently, so a record always comes out.
pub struct QuoteAssembler<C> {
    clock: C,
    daily_rate: Decimal,
}

impl<C: Clock> QuoteAssembler<C> {
    pub fn new(clock: C, daily_rate: Decimal) -> Self {
        Self { clock, daily_rate }
    }

    pub fn assemble(&self, input: AssemblyInput<'_>, jitter: &mut dyn Jitter) -> QuoteRecord {
        let AssemblyInput { draft, job_type, materials, remote } = input;

        // Remote materials replace the working list wholesale; normalization
        // renumbers ids from 1 regardless of what the payload supplied.
        let materials = match remote.and_then(|payload| payload.materials.as_deref()) {
            Some(entries) if !entries.is_empty() => MaterialList::from_entries(
                entries
                    .iter()
                    .map(|entry| (entry.description(), entry.quantity(), entry.unit_price())),
            ),
            _ => materials.clone(),
        };

        let local_labour =
            defaults::default_labour(job_type, draft.bedroom_count(), self.daily_rate, jitter);
        let labour = match remote.and_then(|payload| payload.labour.as_ref()) {
            Some(remote_labour) => LabourEstimate::new(
                remote_labour.days_override().unwrap_or(local_labour.days),
                remote_labour.rate_override().unwrap_or(local_labour.daily_rate),
            ),
            None => local_labour,
        };

        let scope_of_work = draft
            .scope_override()
            .map(str::to_string)
            .or_else(|| remote.and_then(|payload| payload.scope()).map(str::to_string))
            .unwrap_or_else(|| defaults::default_scope(job_type, jitter));

        let financials = FinancialSummary::compute(&materials, &labour);

        let now = self.clock.now();
        // Human-facing reference only; same-second collisions are accepted.
        let quote_number = format!("AMP-{}", now.timestamp() % 1_000_000);
        let issue_date = now.format(DATE_FORMAT).to_string();
        let valid_until = (now + Duration::days(VALIDITY_DAYS)).format(DATE_FORMAT).to_string();

        QuoteRecord {
            quote_number,
            client: ClientInfo {
                name: draft.client_name.trim().to_string(),
                address: draft.client_address.trim().to_string(),
            },
            job: JobDetails {
                job_type,
                property_type: draft.property_type,
                bedrooms: draft.bedrooms.clone(),
                floors: draft.floors.clone(),
                scope_of_work,
                additional_requirements: draft.additional_requirements.clone(),
            },
            materials: materials.into_items(),
            labour,
            financials,
            issue_date,
            valid_until,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::clock::FixedClock;
    use crate::domain::job::{JobType, QuoteDraft};
    use crate::domain::materials::MaterialList;
    use crate::jitter::PinnedJitter;
    use crate::remote::RemoteQuotePayload;

    use super::{AssemblyInput, QuoteAssembler};

    fn assembler() -> QuoteAssembler<FixedClock> {
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).single().expect("valid timestamp");
        QuoteAssembler::new(FixedClock(now), Decimal::from(280))
    }

    fn draft() -> QuoteDraft {
        QuoteDraft {
            client_name: "J. Hartley".to_string(),
            client_address: "14 Mill Lane, Leeds".to_string(),
            bedrooms: "3".to_string(),
            floors: "2".to_string(),
            ..QuoteDraft::default()
        }
    }

    fn fixed_materials() -> MaterialList {
        MaterialList::from_entries([
            ("Consumer unit".to_string(), 1, Decimal::new(18_500, 2)),
            ("Cable drum".to_string(), 4, Decimal::new(4_850, 2)),
        ])
    }

    fn payload(value: serde_json::Value) -> RemoteQuotePayload {
        serde_json::from_value(value).expect("payload should decode")
    }

    #[test]
    fn local_path_matches_the_worked_rewire_scenario() {
        let materials = fixed_materials();
        let mut jitter = PinnedJitter::neutral();

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::Rewire,
                materials: &materials,
                remote: None,
            },
            &mut jitter,
        );

        // 3 bedrooms: 3 * 1.8 + 2 = 7.4 days, quarter-rounded to 7.5
        assert_eq!(record.labour.days, Decimal::new(75, 1));
        assert_eq!(record.labour.daily_rate, Decimal::from(280));
        assert_eq!(record.financials.labour_cost, Decimal::from(2_100));

        // 185.00 + 4 * 48.50 = 379.00
        assert_eq!(record.financials.material_cost, Decimal::from(379));
        assert_eq!(record.financials.subtotal, Decimal::from(2_479));
        // 2479 * 0.2 = 495.8 -> 496
        assert_eq!(record.financials.vat, Decimal::from(496));
        assert_eq!(record.financials.total, Decimal::from(2_975));

        assert_eq!(record.issue_date, "15/03/2025");
        assert_eq!(record.valid_until, "14/04/2025");
        assert!(record.quote_number.starts_with("AMP-"));
        record.check_invariants().expect("assembled record should be internally consistent");
    }

    #[test]
    fn remote_materials_replace_the_working_list_and_are_renumbered() {
        let materials = fixed_materials();
        let remote = payload(json!({
            "materials": [
                { "name": "Cable", "price": "45.50", "quantity": "3" },
                { "quantity": 2, "unitPrice": 12 },
            ],
        }));
        let mut jitter = PinnedJitter::neutral();

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::Rewire,
                materials: &materials,
                remote: Some(&remote),
            },
            &mut jitter,
        );

        assert_eq!(record.materials.len(), 2);
        assert_eq!(record.materials[0].id, 1);
        assert_eq!(record.materials[0].description, "Cable");
        assert_eq!(record.materials[0].quantity, 3);
        assert_eq!(record.materials[0].unit_price, Decimal::new(4_550, 2));
        assert_eq!(record.materials[1].id, 2);
        assert_eq!(record.materials[1].description, "Electrical Component");
        record.check_invariants().expect("remote-derived record should be consistent");
    }

    #[test]
    fn remote_labour_below_thresholds_keeps_local_defaults() {
        let materials = fixed_materials();
        let remote = payload(json!({ "labour": { "days": "0.1", "rate": "50" } }));
        let mut jitter = PinnedJitter::neutral();

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::Rewire,
                materials: &materials,
                remote: Some(&remote),
            },
            &mut jitter,
        );

        assert_eq!(record.labour.days, Decimal::new(75, 1));
        assert_eq!(record.labour.daily_rate, Decimal::from(280));
    }

    #[test]
    fn usable_remote_labour_overrides_both_fields() {
        let materials = fixed_materials();
        let remote = payload(json!({ "labour": { "days": 2, "dailyRate": 320 } }));
        let mut jitter = PinnedJitter::neutral();

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::ElectricShower,
                materials: &materials,
                remote: Some(&remote),
            },
            &mut jitter,
        );

        assert_eq!(record.labour.days, Decimal::from(2));
        assert_eq!(record.labour.daily_rate, Decimal::from(320));
        assert_eq!(record.financials.labour_cost, Decimal::from(640));
    }

    #[test]
    fn scope_precedence_is_user_then_remote_then_default() {
        let materials = fixed_materials();
        let remote = payload(json!({ "scopeOfWork": "Remote-composed scope." }));

        let mut user_draft = draft();
        user_draft.scope_of_work = Some("User-authored scope.".to_string());

        let mut jitter = PinnedJitter::neutral();
        let record = assembler().assemble(
            AssemblyInput {
                draft: &user_draft,
                job_type: JobType::Rewire,
                materials: &materials,
                remote: Some(&remote),
            },
            &mut jitter,
        );
        assert_eq!(record.job.scope_of_work, "User-authored scope.");

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::Rewire,
                materials: &materials,
                remote: Some(&remote),
            },
            &mut jitter,
        );
        assert_eq!(record.job.scope_of_work, "Remote-composed scope.");

        let record = assembler().assemble(
            AssemblyInput {
                draft: &draft(),
                job_type: JobType::Rewire,
                materials: &materials,
                remote: None,
            },
            &mut jitter,
        );
        assert!(record.job.scope_of_work.contains("rewire of the traditional property"));
    }
}
