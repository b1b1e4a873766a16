//! Food estimator (diet + eating out + food waste, less local sourcing).

use cf_core::answers::FoodAnswers;
use cf_core::factors::EmissionFactorTable;
use cf_core::rounding::round4;

use crate::{DAYS_PER_YEAR, WEEKS_PER_YEAR};

/// Annual food emissions in kg CO2e, rounded to 4 dp.
pub fn estimate_food(a: &FoodAnswers, t: &EmissionFactorTable) -> f64 {
    let f = &t.food;
    let m = t.mapper();
    let diet = a.diet();

    let diet_kg = f.diet_factor(diet) * DAYS_PER_YEAR;
    let restaurant_kg = m.spend(a.eating_out()) * WEEKS_PER_YEAR * f.restaurant_kg_per_gbp;

    let wasted_kg = (m.waste(a.waste()) / 100.0) * f.avg_waste_kg_per_person * f.waste_scale(diet);
    let waste_kg = wasted_kg * f.landfill_kg_per_kg;

    let gross = diet_kg + restaurant_kg + waste_kg;
    round4(gross * (1.0 - f.sourcing_reduction(a.sourcing())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::labels::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn answers(diet: Diet, spend: SpendRange, waste: WasteRange, src: LocalSourcing) -> FoodAnswers {
        FoodAnswers {
            diet_type: Some(diet),
            eating_out_spend_per_week: Some(spend),
            waste_percentage: Some(waste),
            local_sourcing: Some(src),
        }
    }

    #[test]
    fn reference_household() {
        let t = EmissionFactorTable::default();
        let a = answers(Diet::MeatSomeMeals, SpendRange::TenTo40, WasteRange::UpTo10, LocalSourcing::Partly);
        // (2044 + 304.2 + 4.83) * 0.98
        assert!((estimate_food(&a, &t) - 2305.9694).abs() < 1e-9);
    }

    #[test]
    fn empty_answers_use_questionnaire_defaults() {
        let t = EmissionFactorTable::default();
        // 5.6 * 365 + 20% of 70 kg * 1.38
        assert!((estimate_food(&FoodAnswers::default(), &t) - 2063.32).abs() < 1e-9);
    }

    #[test]
    fn waste_scales_with_diet() {
        let t = EmissionFactorTable::default();
        let heavy = answers(Diet::MeatEveryMeal, SpendRange::Zero, WasteRange::MoreThan30, LocalSourcing::DontWorry);
        let vegan = answers(Diet::Vegan, SpendRange::Zero, WasteRange::MoreThan30, LocalSourcing::DontWorry);
        // 12.5*365 + 0.4*70*1.2*1.38 and 2.5*365 + 0.4*70*0.8*1.38
        assert!((estimate_food(&heavy, &t) - 4608.868).abs() < 1e-9);
        assert!((estimate_food(&vegan, &t) - 943.4120).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn more_meat_strictly_increases_food(
            spend in select(SpendRange::ALL),
            waste in select(WasteRange::ALL),
            src in select(LocalSourcing::ALL),
        ) {
            let t = EmissionFactorTable::default();
            // Diet::ALL runs from heaviest meat to vegan.
            let totals: Vec<f64> = Diet::ALL
                .iter()
                .map(|d| estimate_food(&answers(*d, spend, waste, src), &t))
                .collect();
            for pair in totals.windows(2) {
                prop_assert!(pair[0] > pair[1], "{:?}", totals);
            }
        }

        #[test]
        fn vegan_is_the_minimum_diet(
            spend in select(SpendRange::ALL),
            waste in select(WasteRange::ALL),
            src in select(LocalSourcing::ALL),
            diet in select(Diet::ALL),
        ) {
            let t = EmissionFactorTable::default();
            let vegan = estimate_food(&answers(Diet::Vegan, spend, waste, src), &t);
            prop_assert!(estimate_food(&answers(diet, spend, waste, src), &t) >= vegan);
        }
    }
}
