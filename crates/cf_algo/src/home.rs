//! Home estimator: heating + electricity, split between building and occupants.

use cf_core::answers::HomeAnswers;
use cf_core::factors::EmissionFactorTable;
use cf_core::labels::LightsOff;
use cf_core::rounding::round4;

/// Unrounded home components, kg CO2e/year for the whole household.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeParts {
    pub heating: f64,
    pub electricity: f64,
    /// Summed improvement reductions after the cap.
    pub improvement_reduction: f64,
    /// Per-respondent share after the fixed/variable split.
    pub attributed: f64,
}

pub fn home_parts(a: &HomeAnswers, t: &EmissionFactorTable) -> HomeParts {
    let h = &t.home;
    let m = t.mapper();

    let people = m.people(a.people());
    let bedrooms = m.bedrooms(a.bedroom_band());

    // Size-scaled baselines
    let base_heating_kwh = h.base_heating_kwh + h.heating_kwh_per_bedroom * bedrooms;
    let base_electricity_kwh = h.base_electricity_kwh + h.electricity_kwh_per_bedroom * bedrooms;

    // Heating: reductions are summed across upgrades, then capped as a whole.
    let summed: f64 = a.improvements.iter().map(|i| h.improvement(*i)).sum();
    let improvement_reduction = summed.min(h.improvement_cap);
    let heating_kwh =
        base_heating_kwh * (1.0 + h.temp_adjustment(a.temp())) * (1.0 - improvement_reduction);
    let heating = heating_kwh * h.heating_factor(a.heating());

    // Electricity
    let lights = match a.lights() {
        LightsOff::Yes => 1.0 - h.lights_off_reduction,
        LightsOff::No => 1.0,
    };
    let electricity = base_electricity_kwh * lights * h.grid_factor(a.tariff());

    // Fixed building share is not divided among occupants.
    let household = heating + electricity;
    let attributed = household * h.fixed_share + (household * (1.0 - h.fixed_share)) / people;

    HomeParts { heating, electricity, improvement_reduction, attributed }
}

/// Annual home emissions attributed to the respondent, kg CO2e, rounded to 4 dp.
pub fn estimate_home(a: &HomeAnswers, t: &EmissionFactorTable) -> f64 {
    round4(home_parts(a, t).attributed)
}
