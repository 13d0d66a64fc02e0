use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Float64Builder, ListBuilder, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use log::{debug, info};
use parquet::arrow::ArrowWriter;

use super::model::OscDataset;

/// Column (entry) names in the output container.
pub const NAMES_COLUMN: &str = "osc_param_names";
pub const PRIORS_COLUMN: &str = "osc_param_priors";
pub const COV_COLUMN: &str = "osc_param_cov";

/// Output schema: one row per parameter.
///
/// * `osc_param_names`  – Utf8, the parameter name
/// * `osc_param_priors` – Float64, the prior central value
/// * `osc_param_cov`    – List<Float64>, row i of the N×N covariance matrix
pub fn output_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new(NAMES_COLUMN, DataType::Utf8, false),
        Field::new(PRIORS_COLUMN, DataType::Float64, false),
        Field::new(
            COV_COLUMN,
            DataType::List(Arc::new(Field::new("item", DataType::Float64, true))),
            false,
        ),
    ]))
}

/// Write the dataset to `path` with recreate semantics.
///
/// The Parquet file is written to a sibling temp path and renamed over the
/// destination only after a successful close, so the destination is never
/// left readable-but-incomplete. On failure the temp file is removed.
pub fn write_dataset(path: &Path, dataset: &OscDataset) -> Result<()> {
    let tmp_path = tmp_sibling(path);
    debug!("writing {} parameters to {}", dataset.len(), tmp_path.display());

    if let Err(err) = write_parquet(&tmp_path, dataset) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} to {}", tmp_path.display(), path.display()))?;
    info!("wrote {} ({} parameters)", path.display(), dataset.len());
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "osc_params.parquet".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_parquet(path: &Path, dataset: &OscDataset) -> Result<()> {
    let batch = to_record_batch(dataset)?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating output file {}", path.display()))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Assemble the Arrow record batch for a dataset.
fn to_record_batch(dataset: &OscDataset) -> Result<RecordBatch> {
    let n = dataset.len();

    let name_array = StringArray::from(
        dataset.names.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
    );
    let prior_array = Float64Array::from(dataset.priors.clone());

    let mut cov_builder = ListBuilder::new(Float64Builder::new());
    for i in 0..n {
        let values = cov_builder.values();
        for &v in dataset.covariance.row(i) {
            values.append_value(v);
        }
        cov_builder.append(true);
    }
    let cov_array = cov_builder.finish();

    RecordBatch::try_new(
        output_schema(),
        vec![
            Arc::new(name_array),
            Arc::new(prior_array),
            Arc::new(cov_array),
        ],
    )
    .context("assembling record batch")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::data::builder::build_dataset;
    use crate::data::presets::Preset;

    #[test]
    fn record_batch_has_one_row_per_parameter() {
        let ds = build_dataset(&Preset::InvertedPdg24.table());
        let batch = to_record_batch(&ds).unwrap();
        assert_eq!(batch.num_rows(), 7);
        assert_eq!(batch.num_columns(), 3);
        assert_eq!(batch.schema().field(0).name(), NAMES_COLUMN);
        assert_eq!(batch.schema().field(1).name(), PRIORS_COLUMN);
        assert_eq!(batch.schema().field(2).name(), COV_COLUMN);
    }

    #[test]
    fn no_temp_file_survives_a_successful_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.parquet");
        let ds = build_dataset(&Preset::InvertedPdg24.table());

        write_dataset(&path, &ds).unwrap();
        assert!(path.exists());

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, ["out.parquet"]);
    }

    #[test]
    fn write_to_unreachable_path_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("out.parquet");
        let ds = build_dataset(&Preset::InvertedPdg24.table());
        assert!(write_dataset(&path, &ds).is_err());
    }
}
