//! crates/cf_io/src/lib.rs
//! Offline I/O for the carbon-footprint engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - `answers`: raw questionnaire JSON → typed `AnswerRecord` under a `LabelPolicy`.
//! - `loader`: size-limited local reads, factor tables, generic JSON documents.
//! - `canonical_json` / `hasher`: sorted-key compact bytes, SHA-256 digests and ids.
//!
//! No network I/O: any path carrying a `<scheme>://` prefix is rejected.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for cf_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// Structural JSON faults with a JSON Pointer to the offending location.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Answer label not recognized (strict label policy only).
    #[error("unrecognized label at {pointer}: {label:?}")]
    Label { pointer: String, label: String },

    /// Hashing / id construction errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Domain validation failures (e.g. a factor table out of range).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Input exceeds a hard size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; callers that know the section enrich it.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

pub mod answers;
pub mod canonical_json;
pub mod hasher;
pub mod loader;

/// Hard cap on any single input document.
pub const MAX_INPUT_BYTES: u64 = 1024 * 1024;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult, MAX_INPUT_BYTES};

    pub use crate::answers::{load_answers, parse_answers, LabelPolicy, LoadedAnswers, Substitution};
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{sha256_canonical, sha256_hex};
    pub use crate::loader::{load_factor_table, load_json, read_local};
}
