//! Stuff estimator: durable purchases, monthly spend, services, recycling discount.

use cf_core::answers::StuffAnswers;
use cf_core::factors::EmissionFactorTable;
use cf_core::rounding::round4;

use crate::MONTHS_PER_YEAR;

/// Recycling discount for `categories` distinct recycled materials.
pub fn recycling_reduction(categories: usize, per_category: f64, cap: f64) -> f64 {
    (categories as f64 * per_category).min(cap)
}

/// Annual consumption emissions in kg CO2e, rounded to 4 dp.
pub fn estimate_stuff(a: &StuffAnswers, t: &EmissionFactorTable) -> f64 {
    let s = &t.stuff;
    let m = t.mapper();

    // Durable goods (one annualized value per distinct item)
    let mut kg: f64 = a.purchases.iter().map(|p| s.item(*p)).sum();

    // Monthly spend
    kg += m.spend(a.clothes()) * MONTHS_PER_YEAR * s.clothes_kg_per_gbp;
    kg += m.spend(a.pets()) * MONTHS_PER_YEAR * s.pets_kg_per_gbp;
    kg += m.spend(a.health()) * MONTHS_PER_YEAR * s.health_kg_per_gbp;
    kg += m.spend(a.hobbies()) * MONTHS_PER_YEAR * s.hobbies_kg_per_gbp;

    // Services: presence of any non-zero contracts band, not its size.
    if m.spend(a.contracts()) > 0.0 {
        kg += s.services_kg_per_year;
    }

    if !a.recycling.is_empty() {
        let r = recycling_reduction(
            a.recycling.len(),
            s.recycling_reduction_per_category,
            s.recycling_reduction_cap,
        );
        kg *= 1.0 - r;
    }

    round4(kg)
}
