//! Loader: size-limited local reads and typed JSON documents (factor tables,
//! energy readings). No network I/O.

#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use cf_core::factors::{validate_domains, EmissionFactorTable};

use crate::{looks_like_url_strict, IoError, IoResult, MAX_INPUT_BYTES};

/// Read a local file, rejecting URLs and anything over `MAX_INPUT_BYTES`.
pub fn read_local(path: &Path) -> IoResult<Vec<u8>> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Path(format!("URLs are not allowed (offline only): {shown}")));
    }
    let f = File::open(path).map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    let len = f.metadata()?.len();
    if len > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{shown}: {len} bytes > {MAX_INPUT_BYTES}")));
    }

    // Guard against files that grow between stat and read.
    let mut buf = Vec::with_capacity(len as usize);
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{shown}: exceeds {MAX_INPUT_BYTES} bytes")));
    }
    debug!(path = %shown, bytes = buf.len(), "read input");
    Ok(buf)
}

/// Read and deserialize a JSON document of type `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> IoResult<T> {
    let bytes = read_local(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load a custom factor table and check its domains.
pub fn load_factor_table(path: &Path) -> IoResult<EmissionFactorTable> {
    let table: EmissionFactorTable = load_json(path)?;
    validate_domains(&table).map_err(|e| IoError::Invalid(format!("factor table: {e}")))?;
    debug!(version = %table.version, "factor table loaded");
    Ok(table)
}
