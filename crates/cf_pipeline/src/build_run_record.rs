// crates/cf_pipeline/src/build_run_record.rs
//
// BUILD_RUN_RECORD: provenance for one run.
//
// - Run ID = "RUN:" + normalized timestamp + ":" + SHA-256 of the canonical
//   run record body (every field except `id`).
// - The body echoes the result id and the digest of the full result document,
//   the answers digest, and the factor table version + digest.
// - Substitutions made during lenient label normalization are listed in input order.

use serde::{Deserialize, Serialize};

use cf_core::ids::{ResultId, RunId, Sha256};
use cf_io::answers::Substitution;
use cf_io::hasher;

use crate::{EngineMeta, PipelineError, ResultDoc};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunInputs {
    pub answers_sha256: Sha256,
    pub factor_table_version: String,
    pub factor_table_sha256: Sha256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunOutputs {
    pub result_id: ResultId,
    /// Digest of the canonical `result.json` (id included).
    pub result_sha256: Sha256,
}

/// `run_record.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunRecordDoc {
    pub id: RunId,
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    pub inputs: RunInputs,
    pub substitutions: Vec<Substitution>,
    pub outputs: RunOutputs,
}

#[derive(Serialize)]
pub(crate) struct RunNoId<'a> {
    pub timestamp_utc: &'a str,
    pub engine: &'a EngineMeta,
    pub inputs: &'a RunInputs,
    pub substitutions: &'a [Substitution],
    pub outputs: &'a RunOutputs,
}

impl RunRecordDoc {
    pub(crate) fn body(&self) -> RunNoId<'_> {
        RunNoId {
            timestamp_utc: &self.timestamp_utc,
            engine: &self.engine,
            inputs: &self.inputs,
            substitutions: &self.substitutions,
            outputs: &self.outputs,
        }
    }
}

pub fn build_run_record(
    timestamp_utc: &str,
    engine: EngineMeta,
    inputs: RunInputs,
    substitutions: Vec<Substitution>,
    result: &ResultDoc,
) -> Result<RunRecordDoc, PipelineError> {
    let timestamp_utc = hasher::normalize_rfc3339_utc_seconds(timestamp_utc)?;
    let outputs = RunOutputs {
        result_id: result.id.clone(),
        result_sha256: hasher::sha256_canonical(result)?,
    };

    let body = RunNoId {
        timestamp_utc: &timestamp_utc,
        engine: &engine,
        inputs: &inputs,
        substitutions: &substitutions,
        outputs: &outputs,
    };
    let id = hasher::run_id_from_canonical(&timestamp_utc, &body)?;

    Ok(RunRecordDoc { id, timestamp_utc, engine, inputs, substitutions, outputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_result::build_result;
    use cf_algo::{Breakdown, FootprintResult};

    fn result() -> ResultDoc {
        let fp = FootprintResult {
            breakdown: Breakdown { food: 1.0, travel: 2.0, home: 3.0, stuff: 0.0 },
            total: 6.0,
        };
        build_result("uk-refined-2024", &fp).unwrap()
    }

    fn inputs() -> RunInputs {
        RunInputs {
            answers_sha256: hasher::sha256_hex(b"answers").parse().unwrap(),
            factor_table_version: "uk-refined-2024".into(),
            factor_table_sha256: hasher::sha256_hex(b"factors").parse().unwrap(),
        }
    }

    fn engine() -> EngineMeta {
        EngineMeta { vendor: "cf".into(), name: "cf_engine".into(), version: "0.1.0".into(), build: "test".into() }
    }

    #[test]
    fn timestamp_is_normalized_into_id_and_record() {
        let r = result();
        let a = build_run_record("2025-08-12T10:00:00.250+00:00", engine(), inputs(), vec![], &r).unwrap();
        assert_eq!(a.timestamp_utc, "2025-08-12T10:00:00Z");
        assert_eq!(a.id.timestamp(), "2025-08-12T10:00:00Z");
        assert_eq!(a.outputs.result_id, r.id);

        let b = build_run_record("2025-08-12T10:00:00Z", engine(), inputs(), vec![], &r).unwrap();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn substitutions_change_the_run_id() {
        let r = result();
        let plain = build_run_record("2025-08-12T10:00:00Z", engine(), inputs(), vec![], &r).unwrap();
        let noted = build_run_record(
            "2025-08-12T10:00:00Z",
            engine(),
            inputs(),
            vec![Substitution { pointer: "/home/heating_source".into(), label: "Coal".into() }],
            &r,
        )
        .unwrap();
        assert_ne!(plain.id, noted.id);
    }

    #[test]
    fn bad_timestamp_is_a_validation_error() {
        let err = build_run_record("yesterday", engine(), inputs(), vec![], &result()).unwrap_err();
        assert!(matches!(err, PipelineError::Validate(_)));
    }
}
