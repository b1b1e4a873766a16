//! BUILD_RESULT: published footprint + content-addressed `RES:` id.
//!
//! The id is the SHA-256 of the canonical body without the id itself
//! (`factor_table_version`, `breakdown`, `total`).

use serde::{Deserialize, Serialize};

use cf_algo::{Breakdown, FootprintResult};
use cf_core::ids::ResultId;
use cf_io::hasher;

use crate::PipelineError;

/// `result.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultDoc {
    pub id: ResultId,
    pub factor_table_version: String,
    /// kg CO2e/year, 2 dp.
    pub breakdown: Breakdown,
    pub total: f64,
}

#[derive(Serialize)]
pub(crate) struct ResultNoId<'a> {
    pub factor_table_version: &'a str,
    pub breakdown: &'a Breakdown,
    pub total: f64,
}

impl ResultDoc {
    pub(crate) fn body(&self) -> ResultNoId<'_> {
        ResultNoId {
            factor_table_version: &self.factor_table_version,
            breakdown: &self.breakdown,
            total: self.total,
        }
    }

    pub fn footprint(&self) -> FootprintResult {
        FootprintResult { breakdown: self.breakdown, total: self.total }
    }
}

pub fn build_result(
    factor_table_version: &str,
    footprint: &FootprintResult,
) -> Result<ResultDoc, PipelineError> {
    let body = ResultNoId {
        factor_table_version,
        breakdown: &footprint.breakdown,
        total: footprint.total,
    };
    let id = hasher::res_id_from_canonical(&body)?;
    Ok(ResultDoc {
        id,
        factor_table_version: factor_table_version.to_string(),
        breakdown: footprint.breakdown,
        total: footprint.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footprint() -> FootprintResult {
        FootprintResult {
            breakdown: Breakdown { food: 2305.97, travel: 6065.12, home: 1724.1, stuff: 850.08 },
            total: 10945.27,
        }
    }

    #[test]
    fn id_is_stable_and_content_addressed() {
        let a = build_result("uk-refined-2024", &footprint()).unwrap();
        let b = build_result("uk-refined-2024", &footprint()).unwrap();
        assert_eq!(a.id, b.id);

        let other = build_result("custom", &footprint()).unwrap();
        assert_ne!(a.id, other.id);

        let digest = hasher::sha256_canonical(&a.body()).unwrap();
        assert_eq!(a.id.digest(), digest.as_str());
    }

    #[test]
    fn wire_shape() {
        let r = build_result("uk-refined-2024", &footprint()).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["breakdown"]["travel"], serde_json::json!(6065.12));
        assert_eq!(v["total"], serde_json::json!(10945.27));
        assert!(v["id"].as_str().unwrap().starts_with("RES:"));
        assert_eq!(r.footprint(), footprint());
    }
}
