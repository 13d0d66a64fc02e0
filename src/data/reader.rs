use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{Array, Float64Array, ListArray, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CovarianceMatrix, OscDataset};
use super::writer::{COV_COLUMN, NAMES_COLUMN, PRIORS_COLUMN};

/// Read a previously written dataset back from a Parquet file.
///
/// Locates the three entry columns by name, reassembles the name list, the
/// prior vector, and the covariance matrix, and checks that the matrix rows
/// form a square N×N matrix for N parameters.
pub fn read_dataset(path: &Path) -> Result<OscDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut names: Vec<String> = Vec::new();
    let mut priors: Vec<f64> = Vec::new();
    let mut cov_rows: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let name_idx = schema
            .index_of(NAMES_COLUMN)
            .map_err(|_| anyhow!("file missing '{NAMES_COLUMN}' column"))?;
        let prior_idx = schema
            .index_of(PRIORS_COLUMN)
            .map_err(|_| anyhow!("file missing '{PRIORS_COLUMN}' column"))?;
        let cov_idx = schema
            .index_of(COV_COLUMN)
            .map_err(|_| anyhow!("file missing '{COV_COLUMN}' column"))?;

        let name_col = batch
            .column(name_idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected Utf8 name column")?;
        let prior_col = batch
            .column(prior_idx)
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64 prior column")?;
        let cov_col = batch.column(cov_idx);

        for row in 0..batch.num_rows() {
            if name_col.is_null(row) || prior_col.is_null(row) {
                bail!("row {row}: null name or prior entry");
            }
            names.push(name_col.value(row).to_string());
            priors.push(prior_col.value(row));
            cov_rows.push(
                extract_f64_list(cov_col, row)
                    .with_context(|| format!("row {row}: failed to read covariance row"))?,
            );
        }
    }

    let n = names.len();
    if n == 0 {
        bail!("file contains no parameters");
    }
    for (i, row) in cov_rows.iter().enumerate() {
        if row.len() != n {
            bail!(
                "covariance row {i} has {} entries, expected {n}",
                row.len()
            );
        }
    }

    let covariance = CovarianceMatrix::from_rows(cov_rows)
        .map_err(|e| anyhow!("reassembling covariance matrix: {e}"))?;

    Ok(OscDataset {
        names,
        priors,
        covariance,
    })
}

/// Extract a `Vec<f64>` from a List column at the given row.
fn extract_f64_list(col: &Arc<dyn Array>, row: usize) -> Result<Vec<f64>> {
    if col.is_null(row) {
        bail!("null value in list column");
    }
    let list_arr = match col.data_type() {
        DataType::List(_) => col
            .as_any()
            .downcast_ref::<ListArray>()
            .context("expected ListArray")?,
        other => bail!("Expected List column, got {other:?}"),
    };
    let values = list_arr.value(row);
    let f64_arr = values
        .as_any()
        .downcast_ref::<Float64Array>()
        .with_context(|| format!("list inner type is {:?}, expected Float64", values.data_type()))?;
    Ok(f64_arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
