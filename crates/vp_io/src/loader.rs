//! Loader: read a local scenario JSON (candidates, threshold, ordered regions,
//! preset pins), validate it, and return a typed `Scenario`. No network I/O.
//!
//! Every configuration-class error (duplicate region, negative weight, too many
//! regions, unknown preset) surfaces here so that enumeration never sees a
//! malformed region set.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use vp_core::{Candidate, CandidateSpec, Params, Region, RegionId, RegionSet};

use crate::{hasher, looks_like_url_strict, IoError, IoResult};

/// Upper bound on scenario file size.
pub const MAX_SCENARIO_BYTES: u64 = 1024 * 1024;

/// Only schema version understood by this loader.
pub const SCHEMA_VERSION: &str = "1";

const BUILTIN_BATTLEGROUND_2024: &str = include_str!("../fixtures/battleground_2024.json");

// ----------------------------- Wire-facing types -----------------------------

/// On-disk shape. Numbers are read signed so negative values get a precise error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioWire {
    schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    candidates: CandidatesWire,
    #[serde(default = "default_threshold")]
    threshold: i64,
    #[serde(default = "default_tie_value")]
    tie_value: i64,
    regions: Vec<RegionWire>,
    #[serde(default)]
    presets: Vec<PresetWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CandidatesWire {
    a: CandidateWire,
    b: CandidateWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CandidateWire {
    label: String,
    base: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegionWire {
    name: String,
    weight: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PresetWire {
    region: String,
    candidate: Candidate,
}

fn default_threshold() -> i64 {
    270
}

fn default_tie_value() -> i64 {
    269
}

// ----------------------------- Typed scenario -----------------------------

/// A region pinned at session start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub region: RegionId,
    pub candidate: Candidate,
}

/// Validated scenario: everything the enumerator and session need.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub title: String,
    pub regions: RegionSet,
    pub params: Params,
    pub presets: Vec<Preset>,
    /// SHA-256 (lowercase hex) over the canonical JSON of the normalized scenario.
    pub fingerprint: String,
}

impl Scenario {
    fn to_wire(&self) -> ScenarioWire {
        let cand = |s: &CandidateSpec| CandidateWire { label: s.label.clone(), base: s.base as i64 };
        ScenarioWire {
            schema_version: SCHEMA_VERSION.to_string(),
            title: Some(self.title.clone()),
            candidates: CandidatesWire {
                a: cand(&self.params.candidate_a),
                b: cand(&self.params.candidate_b),
            },
            threshold: self.params.threshold as i64,
            tie_value: self.params.tie_value as i64,
            regions: self
                .regions
                .iter()
                .map(|r| RegionWire { name: r.id.to_string(), weight: i64::from(r.weight) })
                .collect(),
            presets: self
                .presets
                .iter()
                .map(|p| PresetWire { region: p.region.to_string(), candidate: p.candidate })
                .collect(),
        }
    }

    /// Normalized scenario as a JSON value (region order preserved).
    pub fn to_json(&self) -> IoResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_wire())?)
    }
}

// ----------------------------- Entry points -----------------------------

/// Load a scenario from a local JSON file.
pub fn load_scenario(path: &Path) -> IoResult<Scenario> {
    let bytes = read_bytes_with_limit(path, MAX_SCENARIO_BYTES)?;
    let scenario = parse_scenario(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        regions = scenario.regions.len(),
        fingerprint = %scenario.fingerprint,
        "scenario loaded"
    );
    Ok(scenario)
}

/// Parse and validate scenario JSON from memory.
pub fn parse_scenario(bytes: &[u8]) -> IoResult<Scenario> {
    let wire: ScenarioWire = serde_json::from_slice(bytes)?;
    from_wire(wire)
}

/// The embedded reference scenario (ten 2024 battleground regions, three presets).
pub fn builtin_scenario() -> IoResult<Scenario> {
    parse_scenario(BUILTIN_BATTLEGROUND_2024.as_bytes())
}

// ----------------------------- Validation -----------------------------

fn from_wire(w: ScenarioWire) -> IoResult<Scenario> {
    if w.schema_version != SCHEMA_VERSION {
        return Err(IoError::Invalid(format!(
            "unsupported schema_version {:?} (expected {SCHEMA_VERSION:?})",
            w.schema_version
        )));
    }

    let params = Params {
        candidate_a: CandidateSpec {
            label: w.candidates.a.label.trim().to_string(),
            base: non_negative("candidates.a.base", w.candidates.a.base)?,
        },
        candidate_b: CandidateSpec {
            label: w.candidates.b.label.trim().to_string(),
            base: non_negative("candidates.b.base", w.candidates.b.base)?,
        },
        threshold: non_negative("threshold", w.threshold)?,
        tie_value: non_negative("tie_value", w.tie_value)?,
    };
    params.validate_domains()?;

    let mut regions: Vec<Region> = Vec::with_capacity(w.regions.len());
    for (i, r) in w.regions.into_iter().enumerate() {
        let id: RegionId = r.name.parse()?;
        if r.weight < 0 {
            return Err(IoError::Invalid(format!("regions[{i}] ({id}): negative weight {}", r.weight)));
        }
        let weight = u32::try_from(r.weight)
            .map_err(|_| IoError::Invalid(format!("regions[{i}] ({id}): weight {} out of range", r.weight)))?;
        regions.push(Region::new(id, weight));
    }
    let regions = RegionSet::new(regions)?;

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut presets: Vec<Preset> = Vec::with_capacity(w.presets.len());
    for p in w.presets {
        if regions.index_of(&p.region).is_none() {
            return Err(IoError::Invalid(format!("preset names unknown region {:?}", p.region)));
        }
        if !seen.insert(p.region.clone()) {
            return Err(IoError::Invalid(format!("region {:?} preset more than once", p.region)));
        }
        presets.push(Preset { region: p.region.parse()?, candidate: p.candidate });
    }

    let title = w
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Victory paths".to_string());

    let mut scenario = Scenario { title, regions, params, presets, fingerprint: String::new() };
    scenario.fingerprint = hasher::sha256_canonical(&scenario.to_wire())?;
    Ok(scenario)
}

fn non_negative(field: &'static str, v: i64) -> IoResult<u64> {
    u64::try_from(v).map_err(|_| IoError::Invalid(format!("{field} must be >= 0, got {v}")))
}

/// Read at most `limit` bytes from a local path; larger files are an error.
fn read_bytes_with_limit(path: &Path, limit: u64) -> IoResult<Vec<u8>> {
    let shown = path.display().to_string();
    if looks_like_url_strict(&shown) {
        return Err(IoError::NonLocal(shown));
    }
    let f = File::open(path).map_err(|e| IoError::Path(format!("open {shown}: {e}")))?;
    let mut buf = Vec::new();
    f.take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Path(format!("read {shown}: {e}")))?;
    if buf.len() as u64 > limit {
        return Err(IoError::TooLarge { path: shown, limit });
    }
    Ok(buf)
}
