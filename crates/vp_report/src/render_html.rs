// crates/vp_report/src/render_html.rs
//
// Self-contained HTML page: heading, pin echo, outcome table with colored
// cells, then the path summary panel. No external assets or scripts.

use std::fmt::Write as _;

use crate::{CellStyle, ReportModel, Row};

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

fn style_attr(style: Option<CellStyle>) -> String {
    match style {
        Some(s) => format!(" style=\"background-color:{};color:{}\"", s.background.css(), s.text.css()),
        None => String::new(),
    }
}

struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    fn new() -> Self {
        Self { buf: String::with_capacity(64 * 1024) }
    }

    fn start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\
             <title>{}</title>\
             <style>\
             body{{font-family:system-ui,-apple-system,Segoe UI,Roboto,Ubuntu,Arial,sans-serif;margin:24px;}}\
             table{{border-collapse:collapse}}\
             td,th{{padding:4px 8px;border-bottom:1px solid #ddd;text-align:center}}\
             .muted{{opacity:0.8}}\
             .victory-paths{{display:flex;gap:16px}}\
             .victory-paths-cell{{margin:0}}\
             </style></head><body>",
            esc(title)
        );
    }

    fn finish(mut self) -> String {
        self.buf.push_str("</body></html>\n");
        self.buf
    }

    fn section_heading(&mut self, model: &ReportModel) {
        let _ = write!(
            self.buf,
            "<h1>{}</h1><p class=\"muted\">{} vs {}, threshold {}, tie at {}</p>",
            esc(&model.title),
            esc(&model.candidate_a),
            esc(&model.candidate_b),
            model.threshold,
            model.tie_value
        );
        if !model.pins.is_empty() {
            self.buf.push_str("<p class=\"pins\">Pinned: ");
            for (i, p) in model.pins.iter().enumerate() {
                if i > 0 {
                    self.buf.push_str(", ");
                }
                let label = match p.candidate {
                    vp_core::Candidate::A => &model.candidate_a,
                    vp_core::Candidate::B => &model.candidate_b,
                };
                let _ = write!(
                    self.buf,
                    "<span{}>{}</span>",
                    style_attr(Some(CellStyle::for_candidate(p.candidate))),
                    esc(&format!("{} → {}", p.region, label))
                );
            }
            self.buf.push_str("</p>");
        }
        let _ = write!(self.buf, "<p class=\"muted\">Showing: {}</p>", esc(model.outcome_filter.as_token()));
        if let Some(fp) = &model.fingerprint {
            let _ = write!(self.buf, "<p class=\"muted\">Scenario {}</p>", esc(fp));
        }
    }

    fn section_summary(&mut self, model: &ReportModel) {
        self.buf.push_str("<div class=\"victory-paths\">");
        for line in model.summary.lines() {
            let _ = write!(self.buf, "<p class=\"victory-paths-cell\">{}</p>", esc(&line.text()));
        }
        let _ = write!(
            self.buf,
            "</div><div class=\"paths-summary\"><p>{}</p></div>",
            esc(&model.summary.remaining_text())
        );
    }

    fn section_table(&mut self, model: &ReportModel) {
        self.buf.push_str("<table><thead><tr>");
        for h in &model.headers {
            let _ = write!(self.buf, "<th>{}</th>", esc(h));
        }
        self.buf.push_str("</tr></thead><tbody>");
        for row in &model.rows {
            self.row(row);
        }
        self.buf.push_str("</tbody></table>");
    }

    fn row(&mut self, row: &Row) {
        let _ = write!(self.buf, "<tr><td>{}</td>", row.id);
        for cell in &row.regions {
            let _ = write!(self.buf, "<td{}>{}</td>", style_attr(Some(cell.style)), esc(&cell.label));
        }
        let a = CellStyle::for_candidate(vp_core::Candidate::A);
        let b = CellStyle::for_candidate(vp_core::Candidate::B);
        let _ = write!(
            self.buf,
            "<td{}>{}</td><td{}>{}</td><td{}>{}</td><td{}>{}</td></tr>",
            style_attr(Some(a)),
            row.total_a,
            style_attr(Some(b)),
            row.total_b,
            style_attr(row.winner_style),
            esc(&row.winner_label),
            style_attr(Some(row.margin_style)),
            row.margin
        );
    }
}

/// Render the full page.
pub fn render_html(model: &ReportModel) -> String {
    let mut h = HtmlBuilder::new();
    h.start(&model.title);
    h.section_heading(model);
    h.section_summary(model);
    h.section_table(model);
    h.finish()
}
