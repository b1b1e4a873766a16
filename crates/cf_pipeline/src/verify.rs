//! Self-verification: recompute every id and cross-reference from the
//! documents themselves.

use cf_io::hasher;

use crate::{PipelineError, PipelineOutputs, ResultDoc, RunRecordDoc};

pub fn verify_result(r: &ResultDoc) -> Result<(), PipelineError> {
    let want = hasher::res_id_from_canonical(&r.body())?;
    if want != r.id {
        return Err(PipelineError::Verify(format!("result id {} != recomputed {want}", r.id)));
    }
    if !r.footprint().is_consistent() {
        return Err(PipelineError::Verify(format!("total {} disagrees with breakdown", r.total)));
    }
    Ok(())
}

pub fn verify_run_record(rr: &RunRecordDoc, result: &ResultDoc) -> Result<(), PipelineError> {
    let want = hasher::run_id_from_canonical(&rr.timestamp_utc, &rr.body())?;
    if want != rr.id {
        return Err(PipelineError::Verify(format!("run id {} != recomputed {want}", rr.id)));
    }
    if rr.outputs.result_id != result.id {
        return Err(PipelineError::Verify("run record points at a different result".into()));
    }
    if hasher::sha256_canonical(result)? != rr.outputs.result_sha256 {
        return Err(PipelineError::Verify("result_sha256 mismatch".into()));
    }
    if rr.inputs.factor_table_version != result.factor_table_version {
        return Err(PipelineError::Verify("factor table version mismatch".into()));
    }
    Ok(())
}

pub fn verify_outputs(out: &PipelineOutputs) -> Result<(), PipelineError> {
    verify_result(&out.result)?;
    verify_run_record(&out.run_record, &out.result)
}
