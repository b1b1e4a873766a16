//! cf_report/src/lib.rs — Pure offline report model + renderers (JSON/text).
//!
//! Determinism rules:
//! - No I/O here. Callers supply artifacts already in memory.
//! - Shares are one-decimal percent strings; amounts are 2 dp.
//! - Stable section order and field names.

#![deny(unsafe_code)]

use std::fmt;

use cf_algo::{Category, FootprintResult};
use cf_core::rounding::percent_one_decimal;
use cf_pipeline::ResultDoc;

pub use cf_core::ids::ResultId;

#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_text")]
pub mod render_text;

#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_text")]
pub use render_text::{render_energy_text, render_text};

pub const REPORT_TITLE: &str = "Carbon Footprint Report";

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Inconsistent(what) => write!(f, "inconsistent result: {what}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Amount {
    pub kg: f64,
    pub tonnes: f64,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRow {
    /// Wire key ("food", "travel", ...).
    pub key: String,
    /// Display name ("Food", "Travel", ...).
    pub name: String,
    pub amount: Amount,
    /// Share of the total, e.g. "55.4".
    pub share_pct: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    pub title: String,
    pub result_id: ResultId,
    pub factor_table_version: String,
    /// Presentation order: food, travel, home, stuff.
    pub categories: Vec<CategoryRow>,
    pub total: Amount,
    pub dominant: String,
}

// ===== API =====

/// Build the report model from a result document (pure, offline).
pub fn build_model(result: &ResultDoc) -> Result<ReportModel, ReportError> {
    let fp: FootprintResult = result.footprint();
    if !(fp.total.is_finite() && fp.total >= 0.0) {
        return Err(ReportError::Inconsistent("total"));
    }
    if Category::ALL.iter().any(|c| {
        let v = fp.breakdown.get(*c);
        !(v.is_finite() && v >= 0.0)
    }) {
        return Err(ReportError::Inconsistent("breakdown"));
    }
    if !fp.is_consistent() {
        return Err(ReportError::Inconsistent("total != sum(breakdown)"));
    }

    let tonnes = fp.to_tonnes();
    let categories = Category::ALL
        .iter()
        .map(|&c| CategoryRow {
            key: c.as_str().to_string(),
            name: display_name(c).to_string(),
            amount: Amount { kg: fp.breakdown.get(c), tonnes: tonnes.breakdown.get(c) },
            share_pct: percent_one_decimal(fp.breakdown.get(c), fp.total),
        })
        .collect();

    Ok(ReportModel {
        title: REPORT_TITLE.to_string(),
        result_id: result.id.clone(),
        factor_table_version: result.factor_table_version.clone(),
        categories,
        total: Amount { kg: fp.total, tonnes: tonnes.total },
        dominant: fp.dominant().as_str().to_string(),
    })
}

fn display_name(c: Category) -> &'static str {
    match c {
        Category::Food => "Food",
        Category::Travel => "Travel",
        Category::Home => "Home",
        Category::Stuff => "Stuff",
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use cf_algo::{Breakdown, FootprintResult};
    use cf_pipeline::build_result::build_result;
    use cf_pipeline::ResultDoc;

    pub fn reference_result() -> ResultDoc {
        let fp = FootprintResult {
            breakdown: Breakdown { food: 2305.97, travel: 6065.12, home: 1724.1, stuff: 850.08 },
            total: 10945.27,
        };
        build_result("uk-refined-2024", &fp).unwrap()
    }
}
