//! Canned material, scope, and labour templates per job type. Everything here
//! is a pure function of the job type and the supplied [`Jitter`]; quantities
//! and prices carry small per-item variation so repeated drafts do not come
//! out byte-identical.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::domain::job::JobType;
use crate::domain::labour::LabourEstimate;
use crate::domain::materials::MaterialList;
use crate::jitter::Jitter;
use crate::pricing::round_pence;

struct BaseMaterial {
    description: &'static str,
    quantity: u32,
    unit_price_pence: i64,
}

const REWIRE: &[BaseMaterial] = &[
    BaseMaterial { description: "Twin & Earth 2.5mm² cable (100m drum)", quantity: 4, unit_price_pence: 4_850 },
    BaseMaterial { description: "Twin & Earth 1.5mm² cable (100m drum)", quantity: 3, unit_price_pence: 3_800 },
    BaseMaterial { description: "18th Edition consumer unit (10-way, dual RCD)", quantity: 1, unit_price_pence: 18_500 },
    BaseMaterial { description: "Double socket outlet (white)", quantity: 18, unit_price_pence: 420 },
    BaseMaterial { description: "Light switch (1-gang, white)", quantity: 10, unit_price_pence: 310 },
    BaseMaterial { description: "35mm metal back box", quantity: 28, unit_price_pence: 115 },
    BaseMaterial { description: "Fire-rated downlight fitting", quantity: 8, unit_price_pence: 950 },
    BaseMaterial { description: "Sundries (clips, connectors, grommets)", quantity: 1, unit_price_pence: 6_500 },
];

const FUSE_BOX_UPGRADE: &[BaseMaterial] = &[
    BaseMaterial { description: "18th Edition consumer unit (10-way, dual RCD)", quantity: 1, unit_price_pence: 18_500 },
    BaseMaterial { description: "Surge protection device module", quantity: 1, unit_price_pence: 5_500 },
    BaseMaterial { description: "16mm² meter tails (per metre)", quantity: 3, unit_price_pence: 680 },
    BaseMaterial { description: "10mm² earth bonding cable (per metre)", quantity: 12, unit_price_pence: 240 },
    BaseMaterial { description: "Circuit chart and safety notices", quantity: 1, unit_price_pence: 850 },
];

const SOCKET_INSTALLATION: &[BaseMaterial] = &[
    BaseMaterial { description: "Double socket outlet (white)", quantity: 4, unit_price_pence: 420 },
    BaseMaterial { description: "Twin & Earth 2.5mm² cable (per metre)", quantity: 20, unit_price_pence: 105 },
    BaseMaterial { description: "35mm metal back box", quantity: 4, unit_price_pence: 115 },
    BaseMaterial { description: "Sundries (clips, connectors)", quantity: 1, unit_price_pence: 1_200 },
];

const LIGHTING_INSTALLATION: &[BaseMaterial] = &[
    BaseMaterial { description: "Fire-rated dimmable LED downlight", quantity: 6, unit_price_pence: 1_150 },
    BaseMaterial { description: "Twin & Earth 1.5mm² cable (per metre)", quantity: 25, unit_price_pence: 85 },
    BaseMaterial { description: "Dimmer switch (1-gang)", quantity: 2, unit_price_pence: 1_400 },
    BaseMaterial { description: "Sundries (clips, connectors)", quantity: 1, unit_price_pence: 1_000 },
];

const ELECTRIC_SHOWER: &[BaseMaterial] = &[
    BaseMaterial { description: "9.5kW electric shower unit", quantity: 1, unit_price_pence: 13_500 },
    BaseMaterial { description: "10mm² shower cable (per metre)", quantity: 15, unit_price_pence: 360 },
    BaseMaterial { description: "45A ceiling pull-cord switch", quantity: 1, unit_price_pence: 1_250 },
    BaseMaterial { description: "40A RCBO", quantity: 1, unit_price_pence: 2_400 },
];

const ELECTRIC_CAR_CHARGER: &[BaseMaterial] = &[
    BaseMaterial { description: "7kW EV charge point (Type 2, tethered)", quantity: 1, unit_price_pence: 49_500 },
    BaseMaterial { description: "6mm² SWA cable (per metre)", quantity: 12, unit_price_pence: 320 },
    BaseMaterial { description: "40A Type A RCBO", quantity: 1, unit_price_pence: 2_800 },
    BaseMaterial { description: "Henley block and tails", quantity: 1, unit_price_pence: 2_200 },
];

const ACCESS_CLAUSE: &str = " Allowance has been made for additional access \
considerations, including lifting floor coverings and working in restricted \
spaces.";

fn base_materials(job_type: JobType) -> &'static [BaseMaterial] {
    match job_type {
        JobType::Rewire => REWIRE,
        JobType::FuseBoxUpgrade => FUSE_BOX_UPGRADE,
        JobType::SocketInstallation => SOCKET_INSTALLATION,
        JobType::LightingInstallation => LIGHTING_INSTALLATION,
        JobType::ElectricShower => ELECTRIC_SHOWER,
        JobType::ElectricCarCharger => ELECTRIC_CAR_CHARGER,
    }
}

/// Default working material list for a job type. Per item, the unit price is
/// scaled by an independent factor in [0.85, 1.15] and the quantity by one in
/// [0.9, 1.1], with quantities clamped to at least 1.
pub fn default_materials(job_type: JobType, jitter: &mut dyn Jitter) -> MaterialList {
    let mut list = MaterialList::new();
    for base in base_materials(job_type) {
        let price_factor = jitter.factor(0.85, 1.15);
        let quantity_factor = jitter.factor(0.9, 1.1);

        let unit_price = round_pence(
            Decimal::new(base.unit_price_pence, 2)
                * Decimal::from_f64(price_factor).unwrap_or(Decimal::ONE),
        );
        let quantity = ((base.quantity as f64 * quantity_factor).round() as u32).max(1);
        list.add(base.description.to_string(), quantity, unit_price);
    }
    list
}

/// Scope-of-work narrative for a job type, with a property-age descriptor
/// chosen uniformly and an access-considerations clause included roughly 30%
/// of the time.
pub fn default_scope(job_type: JobType, jitter: &mut dyn Jitter) -> String {
    let age = if jitter.chance(0.5) { "modern" } else { "traditional" };
    let mut scope = match job_type {
        JobType::Rewire => format!(
            "Complete rewire of the {age} property, including removal of existing wiring, \
             installation of new circuits throughout, a new consumer unit, and full testing \
             and certification to BS 7671."
        ),
        JobType::FuseBoxUpgrade => format!(
            "Replacement of the existing fuse box in the {age} property with an 18th Edition \
             consumer unit, including surge protection, upgraded meter tails, earth bonding \
             checks, and certification."
        ),
        JobType::SocketInstallation => format!(
            "Installation of additional socket outlets in the {age} property, including cable \
             runs from existing circuits, chasing and making good, and testing of the altered \
             circuits."
        ),
        JobType::LightingInstallation => format!(
            "Installation of new lighting points and controls in the {age} property, including \
             cabling, fitting of LED luminaires, and testing of the lighting circuits."
        ),
        JobType::ElectricShower => format!(
            "Installation of an electric shower circuit in the {age} property, including a \
             dedicated supply from the consumer unit, an isolation switch, and bonding checks."
        ),
        JobType::ElectricCarCharger => format!(
            "Supply and installation of a 7kW EV charge point at the {age} property, including \
             a dedicated circuit, protective devices, and notification under the IET Wiring \
             Regulations."
        ),
    };

    if jitter.chance(0.3) {
        scope.push_str(ACCESS_CLAUSE);
    }
    scope
}

/// Base labour days before complexity jitter. A rewire scales with bedroom
/// count; everything else is a small per-type constant.
pub fn base_labour_days(job_type: JobType, bedrooms: u32) -> f64 {
    match job_type {
        JobType::Rewire => (bedrooms as f64 * 1.8 + 2.0).max(5.0),
        JobType::FuseBoxUpgrade => 1.0,
        JobType::SocketInstallation => 0.5,
        JobType::LightingInstallation => 0.75,
        JobType::ElectricShower => 0.75,
        JobType::ElectricCarCharger => 1.0,
    }
}

/// Base days times a complexity factor in [0.9, 1.1], rounded to the nearest
/// quarter day.
pub fn default_labour(
    job_type: JobType,
    bedrooms: u32,
    daily_rate: Decimal,
    jitter: &mut dyn Jitter,
) -> LabourEstimate {
    let complexity = jitter.factor(0.9, 1.1);
    let days = quarter_days(base_labour_days(job_type, bedrooms) * complexity);
    LabourEstimate::new(days, daily_rate)
}

fn quarter_days(days: f64) -> Decimal {
    let quarters = (days * 4.0).round().max(0.0);
    Decimal::from_f64(quarters).unwrap_or_default() / Decimal::from(4)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::job::JobType;
    use crate::jitter::{PinnedJitter, StdJitter};

    use super::{base_labour_days, default_labour, default_materials, default_scope};

    #[test]
    fn every_job_type_has_a_non_empty_material_list() {
        let mut jitter = StdJitter::seeded(11);
        for job_type in JobType::ALL {
            let list = default_materials(job_type, &mut jitter);
            assert!(!list.is_empty(), "{job_type:?} should have default materials");
            assert!(list.items().iter().all(|item| item.quantity >= 1));
            assert!(list.items().iter().all(|item| item.unit_price >= Decimal::ZERO));
        }
    }

    #[test]
    fn jittered_values_stay_within_the_advertised_bands() {
        let mut pinned = PinnedJitter::neutral();
        let baseline = default_materials(JobType::Rewire, &mut pinned);

        let mut jitter = StdJitter::seeded(23);
        let varied = default_materials(JobType::Rewire, &mut jitter);

        let tolerance = Decimal::new(1, 2);
        for (base, item) in baseline.items().iter().zip(varied.items()) {
            let lo = base.unit_price * Decimal::new(85, 2) - tolerance;
            let hi = base.unit_price * Decimal::new(115, 2) + tolerance;
            assert!(item.unit_price >= lo && item.unit_price <= hi, "{}", item.description);

            let qty = item.quantity as f64;
            let base_qty = base.quantity as f64;
            assert!(qty >= (base_qty * 0.9).round().max(1.0));
            assert!(qty <= (base_qty * 1.1).round());
        }
    }

    #[test]
    fn unknown_job_keys_get_the_rewire_material_set() {
        let mut first = PinnedJitter::neutral();
        let mut second = PinnedJitter::neutral();

        let fallback = default_materials(JobType::from_key("loft-conversion"), &mut first);
        let rewire = default_materials(JobType::Rewire, &mut second);

        let fallback_descriptions: Vec<_> =
            fallback.items().iter().map(|item| item.description.clone()).collect();
        let rewire_descriptions: Vec<_> =
            rewire.items().iter().map(|item| item.description.clone()).collect();
        assert_eq!(fallback_descriptions, rewire_descriptions);
    }

    #[test]
    fn labour_days_are_quantized_to_quarters_and_at_least_half_a_day() {
        let mut jitter = StdJitter::seeded(31);
        for job_type in JobType::ALL {
            for bedrooms in [1, 3, 5] {
                let labour = default_labour(job_type, bedrooms, Decimal::from(280), &mut jitter);
                assert!(labour.days >= Decimal::new(5, 1), "{job_type:?} days {}", labour.days);
                let quarters = labour.days * Decimal::from(4);
                assert_eq!(quarters, quarters.trunc(), "{job_type:?} not quarter-aligned");
            }
        }
    }

    #[test]
    fn rewire_labour_follows_the_bedroom_formula() {
        assert_eq!(base_labour_days(JobType::Rewire, 1), 5.0);
        assert_eq!(base_labour_days(JobType::Rewire, 3), 7.4);

        let mut pinned = PinnedJitter::neutral();
        let labour = default_labour(JobType::Rewire, 3, Decimal::from(280), &mut pinned);
        // 7.4 rounds up to the 7.5 quarter boundary
        assert_eq!(labour.days, Decimal::new(75, 1));
        assert_eq!(labour.total(), Decimal::from(2_100));
    }

    #[test]
    fn scope_narrative_reflects_jitter_choices() {
        let mut pinned = PinnedJitter { factor: 1.0, include_optional: false };
        let scope = default_scope(JobType::FuseBoxUpgrade, &mut pinned);
        assert!(scope.contains("traditional property"));
        assert!(!scope.contains("access"));

        let mut pinned = PinnedJitter { factor: 1.0, include_optional: true };
        let scope = default_scope(JobType::FuseBoxUpgrade, &mut pinned);
        assert!(scope.contains("modern property"));
        assert!(scope.contains("access"));
    }
}
