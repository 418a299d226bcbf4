//! vp_report: presentation model + renderers (text/JSON/HTML) for a session view.
//!
//! - No I/O here. Callers hand in a computed `View`; writing files is the CLI's job.
//! - Percentages come from `Stats` as integer tenths; this crate does no float math.
//! - Column order follows region order, which is also bit order in the outcome id.

#![deny(unsafe_code)]

use thiserror::Error;
use vp_algo::Stats;
use vp_core::{Candidate, FilterClass, Percent1dp, Winner};
use vp_pipeline::View;

pub mod render_text;
#[cfg(feature = "render_json")]
pub mod render_json;
#[cfg(feature = "render_html")]
pub mod render_html;

pub use render_text::render_text;
#[cfg(feature = "render_json")]
pub use render_json::render_json;
#[cfg(feature = "render_html")]
pub use render_html::render_html;

// ===== Errors =====
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("inconsistent view: {0}")]
    Inconsistent(&'static str),
}

// ===== Colors =====

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const TAN: Rgb = Rgb::new(210, 180, 140);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(feature = "render_json")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.hex())
    }
}

/// Background and text color for one table cell.
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellStyle {
    pub background: Rgb,
    pub text: Rgb,
}

impl CellStyle {
    pub fn for_candidate(c: Candidate) -> CellStyle {
        match c {
            Candidate::A => CellStyle { background: Rgb::BLUE, text: Rgb::WHITE },
            Candidate::B => CellStyle { background: Rgb::RED, text: Rgb::WHITE },
        }
    }

    /// Winner cell: blue / red / tan; no style when nobody wins.
    pub fn for_winner(w: Winner) -> Option<CellStyle> {
        match w {
            Winner::A => Some(CellStyle::for_candidate(Candidate::A)),
            Winner::B => Some(CellStyle::for_candidate(Candidate::B)),
            Winner::Tie => Some(CellStyle { background: Rgb::TAN, text: Rgb::BLACK }),
            Winner::None => None,
        }
    }
}

// ===== Model =====

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug)]
pub struct ReportModel {
    pub title: String,
    pub candidate_a: String,
    pub candidate_b: String,
    pub threshold: u64,
    pub tie_value: u64,
    #[cfg_attr(feature = "render_json", serde(skip_serializing_if = "Option::is_none"))]
    pub fingerprint: Option<String>,
    pub pins: Vec<PinEcho>,
    pub outcome_filter: FilterClass,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    pub summary: Summary,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinEcho {
    pub region: String,
    pub candidate: Candidate,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionCell {
    pub candidate: Candidate,
    pub label: String,
    pub style: CellStyle,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: u32,
    pub regions: Vec<RegionCell>,
    pub total_a: u64,
    pub total_b: u64,
    pub winner: Winner,
    pub winner_label: String,
    pub winner_style: Option<CellStyle>,
    pub margin: u64,
    pub margin_style: CellStyle,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathLine {
    pub label: String,
    pub count: u64,
    pub pct: Percent1dp,
}

impl PathLine {
    /// `"Harris Paths: 71 (55.5%)"`
    pub fn text(&self) -> String {
        format!("{}: {} ({}%)", self.label, self.count, self.pct)
    }
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub a: PathLine,
    pub tie: PathLine,
    pub b: PathLine,
    pub remaining: u64,
}

impl Summary {
    fn from_stats(stats: &Stats, label_a: &str, label_b: &str) -> Summary {
        Summary {
            a: PathLine { label: format!("{label_a} Paths"), count: stats.count_a, pct: stats.pct_a },
            tie: PathLine { label: "Tie Paths".into(), count: stats.count_tie, pct: stats.pct_tie },
            b: PathLine { label: format!("{label_b} Paths"), count: stats.count_b, pct: stats.pct_b },
            remaining: stats.total,
        }
    }

    /// Panel lines in display order: A, Tie, B.
    pub fn lines(&self) -> [&PathLine; 3] {
        [&self.a, &self.tie, &self.b]
    }

    pub fn remaining_text(&self) -> String {
        format!("Paths remaining: {}", self.remaining)
    }
}

// ===== API =====

/// Build the presentation model from a computed view (pure).
pub fn build_model(view: &View, fingerprint: Option<&str>) -> Result<ReportModel, ReportError> {
    let universe = view.universe();
    let regions = universe.regions();
    let params = universe.params();

    let decided = view.outcomes.iter().filter(|o| o.winner != Winner::None).count() as u64;
    if decided != view.stats.total {
        return Err(ReportError::Inconsistent("stats total does not match outcomes"));
    }

    let label_a = params.label(Candidate::A).to_string();
    let label_b = params.label(Candidate::B).to_string();

    let mut headers = Vec::with_capacity(regions.len() + 5);
    headers.push("#".to_string());
    headers.extend(regions.iter().map(|r| r.id.to_string()));
    headers.push(format!("{label_a} total"));
    headers.push(format!("{label_b} total"));
    headers.push("Winner".to_string());
    headers.push("Margin".to_string());

    let rows = view
        .outcomes
        .iter()
        .map(|o| Row {
            id: o.id.as_u32(),
            regions: o
                .assignment(regions)
                .map(|(_, c)| RegionCell {
                    candidate: c,
                    label: params.label(c).to_string(),
                    style: CellStyle::for_candidate(c),
                })
                .collect(),
            total_a: o.total_a,
            total_b: o.total_b,
            winner: o.winner,
            winner_label: params.winner_label(o.winner).to_string(),
            winner_style: CellStyle::for_winner(o.winner),
            margin: o.margin,
            margin_style: {
                let (r, g, b) = view.scale.rgb(o.margin);
                CellStyle { background: Rgb::new(r, g, b), text: Rgb::WHITE }
            },
        })
        .collect();

    let pins = view
        .constraints
        .iter()
        .map(|(region, c)| PinEcho { region: region.to_string(), candidate: *c })
        .collect();

    Ok(ReportModel {
        title: "Victory paths".to_string(),
        summary: Summary::from_stats(&view.stats, &label_a, &label_b),
        candidate_a: label_a,
        candidate_b: label_b,
        threshold: params.threshold,
        tie_value: params.tie_value,
        fingerprint: fingerprint.map(str::to_string),
        pins,
        outcome_filter: view.outcome_filter,
        headers,
        rows,
    })
}

impl ReportModel {
    /// Replace the default heading (scenario title).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
