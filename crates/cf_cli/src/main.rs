// crates/cf_cli/src/main.rs
//
// Exit codes, typed error mapping, logging setup, and the two run paths
// (footprint estimate and energy-use summary).

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const SELF_VERIFY: i32 = 3;
    pub const IO: i32 = 4;
    pub const DOMAIN: i32 = 5;
}

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use args::{parse_and_validate as parse_cli, Args, RenderFormat};

use cf_algo::{EnergyError, EnergyReadings, EnergyTariff, EnergyUseSummary};
use cf_io::answers::LabelPolicy;
use cf_io::canonical_json;
use cf_pipeline::{load::load_ctx, run_with_ctx, verify_outputs, PipelineError, PipelineOutputs};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Flags, JSON shape, labels in strict mode, factor-table domains
    Validation(String),
    /// Recomputed ids disagree with the emitted ones
    SelfVerify(String),
    /// Read/write/path/limits
    Io(String),
    /// Undefined energy ratios
    Domain(String),
    /// Report build or output
    Render(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::SelfVerify(m) => write!(f, "self-verify: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Domain(m) => write!(f, "domain: {m}"),
            MainError::Render(m) => write!(f, "render: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("footprint: error: {e}");
            let rc = if e.is_io() { exitcodes::IO } else { exitcodes::VALIDATION };
            return ExitCode::from(rc as u8);
        }
    };

    init_logging(&args.log_level);

    let res = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    let rc = match res {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("footprint: error: {e}");
            map_error(&e)
        }
    };

    ExitCode::from(rc as u8)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn policy(args: &Args) -> LabelPolicy {
    if args.strict_labels {
        LabelPolicy::Strict
    } else {
        LabelPolicy::Lenient
    }
}

fn timestamp(args: &Args) -> String {
    args.timestamp
        .clone()
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

/// Validate-only path (no estimation, no artifacts).
fn validate_only(args: &Args) -> Result<(), MainError> {
    if let Some(energy) = &args.energy {
        let _: EnergyReadings = cf_io::loader::load_json(energy)
            .map_err(|e| map_pipeline_err(PipelineError::from(e)))?;
    } else if let Some(answers) = &args.answers {
        let ctx = load_ctx(answers, args.factors.as_deref(), policy(args), &timestamp(args))
            .map_err(map_pipeline_err)?;
        debug!(substitutions = ctx.notes.len(), factors = %ctx.factors.version, "inputs loaded");
    }
    if !args.quiet {
        eprintln!("validate-only: inputs OK");
    }
    Ok(())
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::SelfVerify(_) => SELF_VERIFY,
        MainError::Io(_) => IO,
        MainError::Domain(_) => DOMAIN,
        MainError::Render(_) => IO,
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    use PipelineError::*;
    match e {
        Validate(m) => MainError::Validation(m),
        Io(m) | Build(m) => MainError::Io(m),
        Verify(m) => MainError::SelfVerify(m),
        Energy(e @ EnergyError::ZeroDenominator { .. }) => MainError::Domain(e.to_string()),
        Energy(e) => MainError::Validation(e.to_string()),
    }
}

fn run_once(args: &Args) -> Result<(), MainError> {
    if let Some(energy) = &args.energy {
        return run_energy(args, energy);
    }
    let Some(answers) = &args.answers else {
        return Err(MainError::Validation("exactly one of --answers/--energy is required".into()));
    };

    // 1) Load (labels, structure, factor domains)
    let ctx = load_ctx(answers, args.factors.as_deref(), policy(args), &timestamp(args))
        .map_err(map_pipeline_err)?;

    // 2) Estimate and build documents
    let outs = run_with_ctx(ctx).map_err(map_pipeline_err)?;

    // 3) Recompute ids before anything leaves the process
    verify_outputs(&outs).map_err(map_pipeline_err)?;

    // 4) Canonical artifacts
    if let Some(out_dir) = &args.out {
        write_artifacts(out_dir, &outs)?;
        if !args.quiet {
            eprintln!("run: artifacts written to {}", out_dir.to_string_lossy());
        }
    }

    // 5) Optional stdout report
    maybe_render_report(args.render, &outs)?;

    info!(result_id = %outs.result.id, total = outs.result.total, "done");
    Ok(())
}

fn run_energy(args: &Args, readings: &Path) -> Result<(), MainError> {
    let summary =
        cf_pipeline::run_energy_from_path(readings, &EnergyTariff::default()).map_err(map_pipeline_err)?;

    if let Some(out_dir) = &args.out {
        create_out_dir(out_dir)?;
        canonical_json::write_canonical_file(&out_dir.join("energy_use.json"), &summary)
            .map_err(|e| MainError::Io(format!("write energy_use.json: {e}")))?;
        if !args.quiet {
            eprintln!("run: energy_use.json written to {}", out_dir.to_string_lossy());
        }
    }

    maybe_render_energy(args.render, &summary)
}

fn create_out_dir(out_dir: &Path) -> Result<(), MainError> {
    fs::create_dir_all(out_dir)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", out_dir.to_string_lossy())))
}

fn write_artifacts(out_dir: &Path, outs: &PipelineOutputs) -> Result<(), MainError> {
    create_out_dir(out_dir)?;

    canonical_json::write_canonical_file(&out_dir.join("result.json"), &outs.result)
        .map_err(|e| MainError::Io(format!("write result.json: {e}")))?;

    canonical_json::write_canonical_file(&out_dir.join("run_record.json"), &outs.run_record)
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;

    Ok(())
}

fn maybe_render_report(fmt: Option<RenderFormat>, outs: &PipelineOutputs) -> Result<(), MainError> {
    let Some(fmt) = fmt else {
        return Ok(());
    };
    let model = cf_report::build_model(&outs.result).map_err(|e| MainError::Render(e.to_string()))?;
    match fmt {
        RenderFormat::Json => render_json_report(&model),
        RenderFormat::Text => render_text_report(&model),
    }
}

fn render_json_report(model: &cf_report::ReportModel) -> Result<(), MainError> {
    #[cfg(feature = "report-json")]
    {
        let s = serde_json::to_string_pretty(&cf_report::render_json(model))
            .map_err(|e| MainError::Render(format!("report to JSON: {e}")))?;
        println!("{s}");
        Ok(())
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = model;
        Err(MainError::Render("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_text_report(model: &cf_report::ReportModel) -> Result<(), MainError> {
    #[cfg(feature = "report-text")]
    {
        print!("{}", cf_report::render_text(model));
        Ok(())
    }
    #[cfg(not(feature = "report-text"))]
    {
        let _ = model;
        Err(MainError::Render("text renderer not enabled (build with feature `report-text`)".into()))
    }
}

fn maybe_render_energy(fmt: Option<RenderFormat>, s: &EnergyUseSummary) -> Result<(), MainError> {
    match fmt {
        None => Ok(()),
        Some(RenderFormat::Json) => {
            let v = serde_json::to_string_pretty(s)
                .map_err(|e| MainError::Render(format!("energy summary to JSON: {e}")))?;
            println!("{v}");
            Ok(())
        }
        Some(RenderFormat::Text) => {
            #[cfg(feature = "report-text")]
            {
                print!("{}", cf_report::render_energy_text(s));
                Ok(())
            }
            #[cfg(not(feature = "report-text"))]
            {
                Err(MainError::Render("text renderer not enabled (build with feature `report-text`)".into()))
            }
        }
    }
}
