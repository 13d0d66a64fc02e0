use std::path::Path;

use anyhow::{bail, Context, Result};

use super::model::{ParameterRecord, ParameterTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a parameter table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "name": "...", "central": 0.307, "sigma": 0.013 }, ...]`
/// * `.csv`  – header `name,central,sigma`, one parameter per row
///
/// Row order in the file becomes parameter order in the output.
pub fn load_table(path: &Path) -> Result<ParameterTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported parameter-table extension: .{other}"),
    };

    ParameterTable::new(records)
        .with_context(|| format!("invalid parameter table {}", path.display()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<ParameterRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON table")?;
    let records: Vec<ParameterRecord> =
        serde_json::from_str(&text).context("parsing JSON table")?;
    Ok(records)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<ParameterRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV table")?;
    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<ParameterRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    Ok(records)
}
