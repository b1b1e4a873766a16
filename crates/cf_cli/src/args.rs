// crates/cf_cli/src/args.rs
//
// Offline CLI argument surface: clap types, path checks, normalization.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Exactly one of: --answers  XOR  --energy
// - --factors only applies to --answers runs
// - Output: optional --out dir, optional --render json|text on stdout
// - --validate-only performs load + label/structure checks without estimating

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};

/// Stdout renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Json,
    Text,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "footprint",
    disable_help_subcommand = true,
    about = "Offline, deterministic household carbon-footprint estimator"
)]
pub struct Args {
    // --- Mode selection ---
    /// Questionnaire answers JSON (mutually exclusive with --energy).
    #[arg(long, conflicts_with = "energy")]
    pub answers: Option<PathBuf>,

    /// Meter readings JSON for the energy-use summary (mutually exclusive with --answers).
    #[arg(long, conflicts_with_all = ["answers", "factors"])]
    pub energy: Option<PathBuf>,

    /// Custom emission factor table JSON (default: built-in table).
    #[arg(long)]
    pub factors: Option<PathBuf>,

    // --- Output & rendering ---
    /// Directory for canonical artifacts. Omit to skip writing files.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Print a report on stdout.
    #[arg(long, value_enum)]
    pub render: Option<RenderFormat>,

    // --- Control ---
    /// Reject unrecognized answer labels instead of treating them as unanswered.
    #[arg(long)]
    pub strict_labels: bool,

    /// Validate inputs only (load + label/structure checks), do not estimate.
    #[arg(long)]
    pub validate_only: bool,

    /// Run timestamp, RFC3339; converted to UTC (default: now).
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Suppress non-essential stderr messages.
    #[arg(long)]
    pub quiet: bool,

    /// Log filter (tracing EnvFilter syntax).
    #[arg(long, env = "FOOTPRINT_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Errors surfaced by argument parsing/validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    ModeChoice,
    NonLocalPath(String),
    NotFound(String),
    BadTimestamp(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            ModeChoice => write!(f, "exactly one of --answers/--energy is required"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadTimestamp(s) => write!(f, "invalid --timestamp (want RFC3339): {s}"),
        }
    }
}
impl std::error::Error for CliError {}

impl CliError {
    /// Missing input files are I/O failures; everything else is a usage error.
    pub fn is_io(&self) -> bool {
        matches!(self, CliError::NotFound(_))
    }
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub(crate) fn validate(mut args: Args) -> Result<Args, CliError> {
    for p in iter_all_paths(&args) {
        ensure_local_path(p)?;
    }

    match (&args.answers, &args.energy) {
        (Some(a), None) => ensure_local_exists(a, "--answers")?,
        (None, Some(e)) => ensure_local_exists(e, "--energy")?,
        _ => return Err(CliError::ModeChoice),
    }
    if let Some(f) = &args.factors {
        ensure_local_exists(f, "--factors")?;
    }

    if let Some(ts) = args.timestamp.take() {
        args.timestamp = Some(to_utc_seconds(&ts)?);
    }

    args.answers = args.answers.take().map(|p| normalize_path(&p));
    args.energy = args.energy.take().map(|p| normalize_path(&p));
    args.factors = args.factors.take().map(|p| normalize_path(&p));
    // Output directory may not exist yet
    args.out = args.out.take().map(|p| normalize_path(&p));

    Ok(args)
}

/// Any RFC3339 offset, rewritten as whole-second UTC (`...Z`).
fn to_utc_seconds(ts: &str) -> Result<String, CliError> {
    let dt = DateTime::parse_from_rfc3339(ts.trim()).map_err(|_| CliError::BadTimestamp(ts.to_string()))?;
    Ok(dt.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [
        args.answers.as_deref(),
        args.energy.as_deref(),
        args.factors.as_deref(),
        args.out.as_deref(),
    ]
    .into_iter()
    .flatten()
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    let meta = fs::metadata(p).map_err(|_| CliError::NotFound(format!("{label} {}", p.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!("{label} {}", p.display())));
    }
    Ok(())
}

/// Best-effort normalization to an absolute path.
/// If canonicalize fails (e.g., path doesn't exist yet), produce an absolute path relative to CWD.
fn normalize_path(p: &Path) -> PathBuf {
    fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("footprint").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn ensure_local_path_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file://C:/x.json")).is_err());
        assert!(ensure_local_path(Path::new("https://x/y.json")).is_err());
        assert!(ensure_local_path(Path::new(r"C:\local\file.json")).is_ok());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
    }

    #[test]
    fn answers_and_energy_conflict_at_parse_time() {
        let r = Args::try_parse_from(["footprint", "--answers", "a.json", "--energy", "e.json"]);
        assert!(r.is_err());
        let r = Args::try_parse_from(["footprint", "--energy", "e.json", "--factors", "f.json"]);
        assert!(r.is_err());
    }

    #[test]
    fn neither_mode_is_rejected() {
        let err = validate(parse(&[])).unwrap_err();
        assert!(matches!(err, CliError::ModeChoice));
        assert!(!err.is_io());
    }

    #[test]
    fn missing_input_is_io() {
        let err = validate(parse(&["--answers", "does/not/exist.json"])).unwrap_err();
        assert!(err.is_io(), "{err}");
    }

    #[test]
    fn url_input_is_rejected() {
        let err = validate(parse(&["--answers", "https://example.org/a.json"])).unwrap_err();
        assert!(matches!(err, CliError::NonLocalPath(_)));
    }

    #[test]
    fn timestamp_must_be_rfc3339() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        fs::write(&a, "{}").unwrap();
        let a = a.to_str().unwrap();

        let err = validate(parse(&["--answers", a, "--timestamp", "yesterday"])).unwrap_err();
        assert!(matches!(err, CliError::BadTimestamp(_)));

        let ok = validate(parse(&["--answers", a, "--timestamp", "2025-08-12T10:00:00Z"])).unwrap();
        assert!(ok.answers.unwrap().is_absolute());
        assert_eq!(ok.timestamp.as_deref(), Some("2025-08-12T10:00:00Z"));
        assert_eq!(ok.render, None);
    }

    #[test]
    fn offsets_are_converted_to_utc() {
        assert_eq!(to_utc_seconds("2025-08-12T12:00:00+02:00").unwrap(), "2025-08-12T10:00:00Z");
        assert_eq!(to_utc_seconds("2025-08-12T09:30:00.750-00:30").unwrap(), "2025-08-12T10:00:00Z");
        assert!(to_utc_seconds("2025-08-12 10:00").is_err());
    }

    #[test]
    fn render_values() {
        let a = parse(&["--render", "text"]);
        assert_eq!(a.render, Some(RenderFormat::Text));
        assert!(Args::try_parse_from(["footprint", "--render", "html"]).is_err());
    }
}
