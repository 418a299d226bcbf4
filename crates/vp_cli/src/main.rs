// crates/vp_cli/src/main.rs
//
// load scenario -> build universe -> session (presets, --pin, --outcome) -> refresh -> render.
// Exit codes: 0 ok, 2 validation/usage, 4 I/O, 5 engine.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    pub const VALIDATION: i32 = 2;
    pub const IO: i32 = 4;
    pub const ENGINE: i32 = 5;
}

use std::fmt;
use std::io::Write as _;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, RenderFormat};
use vp_io::{builtin_scenario, load_scenario, write_atomic, Scenario};
use vp_pipeline::{build_universe, Session, SessionError};
use vp_report::{build_model, ReportError, ReportModel};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Scenario shape/domain problems, unknown pinned regions
    Validation(String),
    /// Read/write/path/limits
    Io(String),
    /// Filter or report consistency failures
    Engine(String),
}

impl fmt::Display for MainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Engine(m) => write!(f, "engine: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("vp: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    init_tracing(args.quiet);

    let rc = match run(&args) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("vp: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr logging; `RUST_LOG` overrides the default directive.
fn init_tracing(quiet: bool) {
    let default = if quiet { "vp=warn" } else { "vp=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: &Args) -> Result<(), MainError> {
    let scenario = match &args.scenario {
        Some(path) => load_scenario(path),
        None => builtin_scenario(),
    }
    .map_err(map_vpio_err)?;

    if args.validate_only {
        return validate_only(&scenario);
    }

    let universe = build_universe(&scenario);
    let mut session = if args.no_presets {
        Session::new(universe)
    } else {
        Session::with_presets(universe, &scenario.presets).map_err(map_session_err)?
    };
    for pin in &args.pins {
        session.pin(pin.region.as_str(), pin.candidate).map_err(map_session_err)?;
    }
    session.set_outcome_filter(args.outcome);

    let view = session.refresh().map_err(map_session_err)?;
    let model = build_model(&view, Some(&scenario.fingerprint))
        .map_err(map_report_err)?
        .with_title(scenario.title.clone());

    let rendered = render(&model, args.render)?;
    match &args.out {
        Some(path) => write_report(path, rendered.as_bytes()),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|_| stdout.flush())
                .map_err(|e| MainError::Io(format!("stdout: {e}")))
        }
    }
}

/// Validate-only path: scenario loaded and checked, nothing enumerated.
fn validate_only(scenario: &Scenario) -> Result<(), MainError> {
    println!(
        "ok: {} ({} regions, {} outcomes, {} presets) sha256:{}",
        scenario.title,
        scenario.regions.len(),
        scenario.regions.outcome_count(),
        scenario.presets.len(),
        scenario.fingerprint
    );
    Ok(())
}

fn render(model: &ReportModel, format: RenderFormat) -> Result<String, MainError> {
    match format {
        RenderFormat::Text => Ok(vp_report::render_text(model)),
        RenderFormat::Json => render_json(model),
        RenderFormat::Html => render_html(model),
    }
}

fn render_json(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-json")]
    {
        vp_report::render_json(model).map_err(map_report_err)
    }
    #[cfg(not(feature = "report-json"))]
    {
        let _ = model;
        Err(MainError::Validation("json renderer not enabled (build with feature `report-json`)".into()))
    }
}

fn render_html(model: &ReportModel) -> Result<String, MainError> {
    #[cfg(feature = "report-html")]
    {
        Ok(vp_report::render_html(model))
    }
    #[cfg(not(feature = "report-html"))]
    {
        let _ = model;
        Err(MainError::Validation("html renderer not enabled (build with feature `report-html`)".into()))
    }
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<(), MainError> {
    write_atomic(path, bytes).map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(())
}

/// Map typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Engine(_) => ENGINE,
    }
}

/// Translate vp_io::IoError into MainError buckets.
fn map_vpio_err(e: vp_io::IoError) -> MainError {
    use vp_io::IoError::*;
    match e {
        // Validation-ish (shape/domain/config)
        NonLocal(p) => MainError::Validation(format!("non-local path: {p}")),
        Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        Core(c) => MainError::Validation(c.to_string()),
        Invalid(m) => MainError::Validation(m),
        Hash(h) => MainError::Validation(format!("hash: {h}")),

        // I/O-ish
        Path(m) => MainError::Io(m),
        TooLarge { path, limit } => MainError::Io(format!("{path} exceeds {limit} bytes")),
    }
}

fn map_session_err(e: SessionError) -> MainError {
    match e {
        SessionError::UnknownRegion(r) => MainError::Validation(format!("unknown region: {r}")),
        SessionError::Filter(f) => MainError::Engine(f.to_string()),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    match e {
        ReportError::Serialize(m) => MainError::Engine(format!("serialize: {m}")),
        ReportError::Inconsistent(m) => MainError::Engine(format!("inconsistent: {m}")),
    }
}
