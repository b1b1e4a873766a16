//! LOAD stage: answers + factor table from disk into a `PipelineCtx`.

use std::path::Path;

use tracing::{info_span, warn};

use cf_core::factors::{validate_domains, EmissionFactorTable};
use cf_io::answers::{load_answers, LabelPolicy};
use cf_io::loader::load_factor_table;

use crate::{engine_identifiers, PipelineCtx, PipelineError};

/// Load and normalize the answers, and either load `factors` or take the
/// built-in table. The built-in table is validated like a loaded one.
pub fn load_ctx(
    answers: &Path,
    factors: Option<&Path>,
    policy: LabelPolicy,
    timestamp_utc: &str,
) -> Result<PipelineCtx, PipelineError> {
    let _s = info_span!("load").entered();

    let table = match factors {
        Some(p) => load_factor_table(p)?,
        None => {
            let t = EmissionFactorTable::default();
            validate_domains(&t).map_err(|e| PipelineError::Validate(format!("built-in factor table: {e}")))?;
            t
        }
    };

    let loaded = load_answers(answers, policy)?;
    if !loaded.substitutions.is_empty() {
        warn!(count = loaded.substitutions.len(), "answers contained unrecognized labels");
    }

    Ok(PipelineCtx {
        answers: loaded.record,
        notes: loaded.substitutions,
        factors: table,
        input_digest: loaded.sha256,
        engine_meta: engine_identifiers(),
        timestamp_utc: timestamp_utc.to_string(),
    })
}
