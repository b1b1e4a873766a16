//! Plain-text printouts for terminals.

use std::fmt::Write as _;

use cf_algo::EnergyUseSummary;

use crate::ReportModel;

const RULE: &str = "---------------------------------";

/// The footprint printout: one line per category, then the total in kg and tonnes.
pub fn render_text(m: &ReportModel) -> String {
    let mut out = String::with_capacity(512);
    let _ = writeln!(out, "--- {} ---", m.title);
    for c in &m.categories {
        let _ = writeln!(out, "{}: {:.2} kg CO2e/year ({}%)", c.name, c.amount.kg, c.share_pct);
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total Annual Footprint: {:.2} kg CO2e/year", m.total.kg);
    let _ = writeln!(out, "Which is equivalent to {:.2} tonnes of CO2e per year.", m.total.tonnes);
    let _ = writeln!(out, "Largest category: {}", m.dominant);
    let _ = writeln!(out, "Factor table: {} ({})", m.factor_table_version, m.result_id);
    out
}

/// The energy-use printout for one period.
pub fn render_energy_text(s: &EnergyUseSummary) -> String {
    let mut out = String::with_capacity(320);
    let _ = writeln!(out, "True consumption: {:.2} kWh", s.true_consumption_kwh);
    let _ = writeln!(out, "Home usage: {:.2} kWh", s.home_usage_kwh);
    let _ = writeln!(out, "EV share: {:.2}%", s.ev_share_pct);
    let _ = writeln!(out, "Self consumption: {:.2}%", s.self_consumption_pct);
    let _ = writeln!(out, "Solar coverage: {:.2}%", s.solar_coverage_pct);
    let _ = writeln!(out, "EV efficiency: {:.2} Wh/km", s.ev_efficiency_wh_per_km);
    let _ = writeln!(out, "Solar cost savings: £{:.2}", s.solar_cost_savings_gbp);
    let _ = writeln!(out, "CO2 offset: {:.2} kg", s.co2_offset_kg);
    out
}
