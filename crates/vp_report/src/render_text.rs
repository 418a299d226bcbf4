//! Plain-text table: one line per outcome, columns padded to the widest cell,
//! followed by the path summary panel.

use std::fmt::Write as _;

use crate::ReportModel;

pub fn render_text(model: &ReportModel) -> String {
    let table: Vec<Vec<String>> = model
        .rows
        .iter()
        .map(|r| {
            let mut cells = Vec::with_capacity(model.headers.len());
            cells.push(r.id.to_string());
            cells.extend(r.regions.iter().map(|c| c.label.clone()));
            cells.push(r.total_a.to_string());
            cells.push(r.total_b.to_string());
            cells.push(r.winner_label.clone());
            cells.push(r.margin.to_string());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = model.headers.iter().map(|h| h.chars().count()).collect();
    for row in &table {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", model.title);
    let _ = writeln!(
        out,
        "{} (a) vs {} (b); threshold {}, tie at {}",
        model.candidate_a, model.candidate_b, model.threshold, model.tie_value
    );
    if !model.pins.is_empty() {
        let pins: Vec<String> = model.pins.iter().map(|p| format!("{}={}", p.region, p.candidate)).collect();
        let _ = writeln!(out, "pinned: {}", pins.join(", "));
    }
    let _ = writeln!(out, "outcome filter: {}", model.outcome_filter);
    if let Some(fp) = &model.fingerprint {
        let _ = writeln!(out, "scenario: {fp}");
    }
    out.push('\n');

    push_line(&mut out, &widths, model.headers.iter().map(String::as_str));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &widths, rule.iter().map(String::as_str));
    for row in &table {
        push_line(&mut out, &widths, row.iter().map(String::as_str));
    }

    out.push('\n');
    for line in model.summary.lines() {
        let _ = writeln!(out, "{}", line.text());
    }
    let _ = writeln!(out, "{}", model.summary.remaining_text());
    out
}

fn push_line<'a, I>(out: &mut String, widths: &[usize], cells: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut line = String::new();
    for (i, (cell, w)) in cells.into_iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<w$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
