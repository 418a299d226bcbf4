//! JSON renderer. Field order follows struct layout; colors are `#rrggbb`.

use crate::{ReportError, ReportModel};

/// Pretty-printed JSON with a trailing newline.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    let mut s = serde_json::to_string_pretty(model).map_err(|e| ReportError::Serialize(e.to_string()))?;
    s.push('\n');
    Ok(s)
}
