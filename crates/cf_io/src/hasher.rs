//! crates/cf_io/src/hasher.rs
//!
//! Deterministic hashing and id builders for canonical artifacts.
//!
//! - Canonical JSON hashing: UTF-8, sorted object keys, array order preserved.
//! - `RES:` derives from the canonical bytes of the result body; `RUN:` joins an
//!   RFC3339 UTC timestamp (normalized to whole seconds + `Z`) with a hash of the
//!   canonical run-record body.
//! - Hex digests are lowercase.
//!
//! Use `sha256_canonical(..)` for values/structs and `sha256_hex(..)` for raw bytes.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use cf_core::ids::{ResultId, RunId, Sha256 as Sha256Hex};

use crate::canonical_json::to_canonical_bytes;
use crate::{IoError, IoResult};

/* ------------------------------- Raw hashing ------------------------------- */

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/* ---------------------------- Canonical hashing ---------------------------- */

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<Sha256Hex> {
    let bytes = to_canonical_bytes(value)?;
    typed_digest(&bytes)
}

fn typed_digest(bytes: &[u8]) -> IoResult<Sha256Hex> {
    sha256_hex(bytes)
        .parse()
        .map_err(|e| IoError::Hash(format!("{e}")))
}

/* ---------------------------- Artifact id builders ---------------------------- */

/// `RES:<hex>` from the canonical bytes of the result body.
pub fn res_id_from_canonical<T: Serialize>(value: &T) -> IoResult<ResultId> {
    let hex = sha256_canonical(value)?;
    format!("RES:{hex}")
        .parse()
        .map_err(|e| IoError::Hash(format!("{e}")))
}

/// `RUN:<timestamp>:<hex>` from canonical run-record bytes.
pub fn run_id_from_bytes(timestamp_utc: &str, run_bytes_canonical: &[u8]) -> IoResult<RunId> {
    let ts = normalize_rfc3339_utc_seconds(timestamp_utc)?;
    let hex = sha256_hex(run_bytes_canonical);
    format!("RUN:{ts}:{hex}")
        .parse()
        .map_err(|e| IoError::Hash(format!("{e}")))
}

/// Convenience: canonicalize `run_value` then build the RUN id.
pub fn run_id_from_canonical<T: Serialize>(timestamp_utc: &str, run_value: &T) -> IoResult<RunId> {
    let bytes = to_canonical_bytes(run_value)?;
    run_id_from_bytes(timestamp_utc, &bytes)
}

/* --------------------------------- Timestamps --------------------------------- */

/// Normalize to `YYYY-MM-DDTHH:MM:SSZ`.
/// Accepts an optional fraction (1..=9 digits) and `Z`, `+00:00` or `-00:00`.
pub fn normalize_rfc3339_utc_seconds(ts: &str) -> IoResult<String> {
    let bad = || IoError::Invalid(format!("timestamp must be RFC3339 UTC (e.g. 2025-08-12T10:00:00Z): {ts:?}"));
    let b = ts.as_bytes();
    if b.len() < 20 {
        return Err(bad());
    }

    let num = |from: usize, to: usize| -> IoResult<u32> {
        let s = ts.get(from..to).ok_or_else(bad)?;
        if !s.bytes().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        s.parse().map_err(|_| bad())
    };
    for (i, sep) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')] {
        if b[i] != sep {
            return Err(bad());
        }
    }
    let (y, m, d) = (num(0, 4)?, num(5, 7)?, num(8, 10)?);
    let (hh, mm, ss) = (num(11, 13)?, num(14, 16)?, num(17, 19)?);
    if !(1..=12).contains(&m) || !(1..=31).contains(&d) || hh > 23 || mm > 59 || ss > 59 {
        return Err(bad());
    }

    let mut idx = 19;
    if b[idx] == b'.' {
        let start = idx + 1;
        idx = start;
        while idx < b.len() && b[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == start || idx - start > 9 {
            return Err(bad());
        }
    }
    match ts.get(idx..) {
        Some("Z" | "+00:00" | "-00:00") => {}
        _ => return Err(bad()),
    }

    Ok(format!("{y:04}-{m:02}-{d:02}T{hh:02}:{mm:02}:{ss:02}Z"))
}

/* ------------------------------------ Tests ------------------------------------ */
