//! Energy-use ratios for a household with solar generation and an EV.
//!
//! Pure kWh bookkeeping over one period's meter readings. Ratios whose
//! denominator is zero are rejected rather than defaulted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cf_core::rounding::round2;

/// Meter readings for one period. All values ≥ 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyReadings {
    pub grid_import_kwh: f64,
    pub solar_generation_kwh: f64,
    pub grid_export_kwh: f64,
    pub ev_energy_kwh: f64,
    pub odometer_km: f64,
}

/// Tariff and offset constants used for the savings figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyTariff {
    /// £ per kWh bought from the grid.
    pub grid_rate_gbp_per_kwh: f64,
    /// kg CO2 avoided per kWh generated.
    pub co2_offset_kg_per_kwh: f64,
}

impl Default for EnergyTariff {
    fn default() -> Self {
        Self { grid_rate_gbp_per_kwh: 0.15, co2_offset_kg_per_kwh: 0.7 }
    }
}

/// All values rounded to 2 dp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyUseSummary {
    pub true_consumption_kwh: f64,
    pub home_usage_kwh: f64,
    pub ev_share_pct: f64,
    pub self_consumption_pct: f64,
    pub solar_coverage_pct: f64,
    pub ev_efficiency_wh_per_km: f64,
    pub solar_cost_savings_gbp: f64,
    pub co2_offset_kg: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EnergyError {
    #[error("{field} must be a finite, non-negative number")]
    Invalid { field: &'static str },
    #[error("{field} exceeds {limit}")]
    Exceeds { field: &'static str, limit: &'static str },
    #[error("{field} is zero; ratio is undefined")]
    ZeroDenominator { field: &'static str },
}

fn check(v: f64, field: &'static str) -> Result<f64, EnergyError> {
    if v.is_finite() && v >= 0.0 { Ok(v) } else { Err(EnergyError::Invalid { field }) }
}

fn ratio(num: f64, den: f64, field: &'static str) -> Result<f64, EnergyError> {
    if den == 0.0 {
        return Err(EnergyError::ZeroDenominator { field });
    }
    Ok(num / den)
}

pub fn calculate_energy_use(
    r: &EnergyReadings,
    tariff: &EnergyTariff,
) -> Result<EnergyUseSummary, EnergyError> {
    let import = check(r.grid_import_kwh, "grid_import_kwh")?;
    let solar = check(r.solar_generation_kwh, "solar_generation_kwh")?;
    let export = check(r.grid_export_kwh, "grid_export_kwh")?;
    let ev = check(r.ev_energy_kwh, "ev_energy_kwh")?;
    let odometer = check(r.odometer_km, "odometer_km")?;

    if export > solar {
        return Err(EnergyError::Exceeds { field: "grid_export_kwh", limit: "solar_generation_kwh" });
    }

    let self_used = solar - export;
    let true_consumption = import + self_used;
    if ev > true_consumption {
        return Err(EnergyError::Exceeds { field: "ev_energy_kwh", limit: "true consumption" });
    }

    let ev_share = ratio(ev, true_consumption, "true consumption")? * 100.0;
    let self_consumption = ratio(self_used, solar, "solar_generation_kwh")? * 100.0;
    let solar_coverage = ratio(solar, true_consumption, "true consumption")? * 100.0;
    let ev_efficiency = ratio(ev * 1000.0, odometer, "odometer_km")?;

    Ok(EnergyUseSummary {
        true_consumption_kwh: round2(true_consumption),
        home_usage_kwh: round2(true_consumption - ev),
        ev_share_pct: round2(ev_share),
        self_consumption_pct: round2(self_consumption),
        solar_coverage_pct: round2(solar_coverage),
        ev_efficiency_wh_per_km: round2(ev_efficiency),
        solar_cost_savings_gbp: round2(solar * tariff.grid_rate_gbp_per_kwh),
        co2_offset_kg: round2(solar * tariff.co2_offset_kg_per_kwh),
    })
}
