//! cf_pipeline — deterministic pipeline surface (load → estimate → aggregate → build result → build run record)
//! This crate performs no parsing of its own: JSON, canonicalization and hashing go
//! through `cf_io`, the estimation math through `cf_algo`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use cf_algo::{EnergyError, EnergyReadings, EnergyTariff, EnergyUseSummary};
use cf_core::answers::AnswerRecord;
use cf_core::factors::EmissionFactorTable;
use cf_core::ids::Sha256;
use cf_io::answers::{LabelPolicy, Substitution};
use cf_io::IoError;

pub mod build_result;
pub mod build_run_record;
pub mod load;
pub mod verify;

pub use build_result::ResultDoc;
pub use build_run_record::{RunInputs, RunOutputs, RunRecordDoc};
pub use verify::verify_outputs;

/// Engine identifiers recorded in every run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Everything one run needs, already loaded and validated.
#[derive(Debug, Clone)]
pub struct PipelineCtx {
    pub answers: AnswerRecord,
    /// Labels dropped during lenient normalization.
    pub notes: Vec<Substitution>,
    pub factors: EmissionFactorTable,
    /// Canonical digest of the answers document.
    pub input_digest: Sha256,
    pub engine_meta: EngineMeta,
    /// RFC3339 UTC; normalized to whole seconds in the run record.
    pub timestamp_utc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutputs {
    pub result: ResultDoc,
    pub run_record: RunRecordDoc,
}

/// Single error surface for the pipeline orchestration.
#[derive(Debug)]
pub enum PipelineError {
    Io(String),
    /// Malformed input documents (structure, labels, factor domains).
    Validate(String),
    Build(String),
    /// Recomputed ids disagree with the emitted ones.
    Verify(String),
    Energy(EnergyError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PipelineError::*;
        match self {
            Io(m) => write!(f, "io: {m}"),
            Validate(m) => write!(f, "validate: {m}"),
            Build(m) => write!(f, "build: {m}"),
            Verify(m) => write!(f, "verify: {m}"),
            Energy(e) => write!(f, "energy: {e}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<IoError> for PipelineError {
    fn from(e: IoError) -> Self {
        use PipelineError::*;
        match e {
            IoError::Path(m) => Io(format!("path: {m}")),
            IoError::Limit(m) => Io(format!("limit: {m}")),
            IoError::Json { pointer, msg } => Validate(format!("json {pointer}: {msg}")),
            IoError::Label { pointer, label } => Validate(format!("label {pointer}: {label:?}")),
            IoError::Invalid(m) => Validate(m),
            IoError::Hash(m) => Build(format!("hash: {m}")),
        }
    }
}

impl From<EnergyError> for PipelineError {
    fn from(e: EnergyError) -> Self {
        PipelineError::Energy(e)
    }
}

// -------------------------------------- Public API --------------------------------------

/// Orchestrate one estimation over a preloaded context.
pub fn run_with_ctx(ctx: PipelineCtx) -> Result<PipelineOutputs, PipelineError> {
    let span = info_span!("run", factors = %ctx.factors.version, ts = %ctx.timestamp_utc);
    let _g = span.enter();

    let footprint = {
        let _s = info_span!("estimate").entered();
        let sub = cf_algo::aggregate::estimate_subtotals(&ctx.answers, &ctx.factors);
        debug!(food = sub.food, travel = sub.travel, home = sub.home, stuff = sub.stuff, "subtotals");
        cf_algo::aggregate::aggregate(&sub)
    };

    let result = {
        let _s = info_span!("build_result").entered();
        build_result::build_result(&ctx.factors.version, &footprint)?
    };

    let run_record = {
        let _s = info_span!("build_run_record").entered();
        let factor_table_sha256 = cf_io::hasher::sha256_canonical(&ctx.factors)?;
        let inputs = RunInputs {
            answers_sha256: ctx.input_digest,
            factor_table_version: ctx.factors.version.clone(),
            factor_table_sha256,
        };
        build_run_record::build_run_record(
            &ctx.timestamp_utc,
            ctx.engine_meta,
            inputs,
            ctx.notes,
            &result,
        )?
    };

    info!(result_id = %result.id, run_id = %run_record.id, total = result.total, "run complete");
    Ok(PipelineOutputs { result, run_record })
}

/// Convenience entry: load answers (and an optional factor table) from disk, then run.
pub fn run_from_paths(
    answers: &Path,
    factors: Option<&Path>,
    policy: LabelPolicy,
    timestamp_utc: &str,
) -> Result<PipelineOutputs, PipelineError> {
    let ctx = load::load_ctx(answers, factors, policy, timestamp_utc)?;
    run_with_ctx(ctx)
}

/// Energy-use stage: load meter readings and compute the period summary.
pub fn run_energy_from_path(
    readings: &Path,
    tariff: &EnergyTariff,
) -> Result<EnergyUseSummary, PipelineError> {
    let _s = info_span!("energy_use").entered();
    let r: EnergyReadings = cf_io::loader::load_json(readings)?;
    let summary = cf_algo::calculate_energy_use(&r, tariff)?;
    debug!(true_consumption = summary.true_consumption_kwh, "energy summary");
    Ok(summary)
}

/// Engine identifiers for use in the run record.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "cf".to_string(),
        name: "cf_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: option_env!("CF_ENGINE_BUILD").unwrap_or("dev").to_string(),
    }
}
