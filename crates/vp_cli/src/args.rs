// crates/vp_cli/src/args.rs
//
// Offline CLI argument surface.
// - No networked paths (reject any scheme:// for --scenario and --out)
// - --pin REGION=a|b is repeatable and applied after presets
// - Region names are checked against the scenario later, once it is loaded

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use vp_core::{Candidate, FilterClass, RegionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Text,
    Json,
    Html,
}

/// One `--pin REGION=a|b` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinArg {
    pub region: RegionId,
    pub candidate: Candidate,
}

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "vp",
    version,
    disable_help_subcommand = true,
    about = "Enumerate every way the contested regions can fall and show the paths that remain"
)]
pub struct Args {
    /// Scenario JSON (default: built-in 2024 battleground).
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Pin a region to a candidate, e.g. `--pin Georgia=b`. Repeatable.
    #[arg(long = "pin", value_name = "REGION=a|b", value_parser = parse_pin)]
    pub pins: Vec<PinArg>,

    /// Start with nothing pinned instead of the scenario presets.
    #[arg(long)]
    pub no_presets: bool,

    /// Show only outcomes of this class.
    #[arg(long, value_name = "all|a|b|tie|none", default_value = "all", value_parser = parse_outcome)]
    pub outcome: FilterClass,

    /// Output format.
    #[arg(long, value_enum, default_value_t = RenderFormat::Text)]
    pub render: RenderFormat,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Load and validate the scenario, then exit.
    #[arg(long)]
    pub validate_only: bool,

    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument validation.
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    DuplicatePin(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            CliError::DuplicatePin(r) => write!(f, "region pinned more than once: {r}"),
        }
    }
}
impl std::error::Error for CliError {}

/// `REGION=a|b`; the region part may contain spaces (`North Carolina=a`).
pub fn parse_pin(s: &str) -> Result<PinArg, String> {
    let (region, cand) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected REGION=a|b, got {s:?}"))?;
    let region: RegionId = region.trim().parse().map_err(|e| format!("{e}"))?;
    let candidate: Candidate = cand.parse().map_err(|_| format!("candidate must be a or b, got {cand:?}"))?;
    Ok(PinArg { region, candidate })
}

pub fn parse_outcome(s: &str) -> Result<FilterClass, String> {
    s.trim().to_ascii_lowercase().parse().map_err(|e| format!("{e}"))
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

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

/// Checks that do not need the scenario.
pub fn validate(args: Args) -> Result<Args, CliError> {
    for p in [args.scenario.as_deref(), args.out.as_deref()].into_iter().flatten() {
        ensure_local_path(p)?;
    }
    let mut seen = std::collections::BTreeSet::new();
    for pin in &args.pins {
        if !seen.insert(pin.region.as_str()) {
            return Err(CliError::DuplicatePin(pin.region.to_string()));
        }
    }
    Ok(args)
}
