use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::SheetInfo;
use crate::service::BatchResult;

pub fn serialize_to_json<T: Serialize>(data: &T) -> Result<String> {
    serde_json::to_string_pretty(data).context("Failed to serialize data to JSON")
}

pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    println!("{}", serialize_to_json(data)?);
    Ok(())
}

pub fn render_batch(result: &BatchResult) -> String {
    let mut out = format!(
        "{} of {} sheets updated\n",
        result.successes.len(),
        result.len()
    );
    for sheet in &result.successes {
        out.push_str(&format!("  ok    {}\n", sheet));
    }
    for failure in &result.failures {
        out.push_str(&format!("  FAIL  {}: {}\n", failure.sheet, failure.error));
        for cause in &failure.context {
            out.push_str(&format!("        caused by: {}\n", cause));
        }
    }
    out
}

pub fn render_sheet_list(sheets: &[SheetInfo]) -> String {
    let id_width = sheets
        .iter()
        .map(|s| s.id.to_string().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for sheet in sheets {
        let modified = sheet
            .modified_at
            .map(|at| at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>width$}  {:<16}  {}\n",
            sheet.id,
            modified,
            sheet.name,
            width = id_width
        ));
    }
    out
}
