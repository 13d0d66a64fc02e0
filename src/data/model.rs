use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DatasetError – configuration-level failures
// ---------------------------------------------------------------------------

/// Errors raised while validating a parameter table.
///
/// Only reachable when the table comes from runtime data (`--table`); the
/// built-in presets are constructed from literals that satisfy every check.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("parameter table is empty")]
    EmptyTable,
    #[error("duplicate parameter name '{0}'")]
    DuplicateName(String),
    #[error("parameter '{name}': {field} is not finite ({value})")]
    NonFinite {
        name: String,
        field: &'static str,
        value: f64,
    },
}

// ---------------------------------------------------------------------------
// ParameterRecord – one row of the parameter table
// ---------------------------------------------------------------------------

/// A single oscillation parameter: its name, prior central value, and
/// 1-sigma uncertainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    /// Identifier, e.g. `PMNS_SIN_SQUARED_12`. Position in the table is
    /// significant: it is the shared index into the prior vector and both
    /// covariance-matrix dimensions.
    pub name: String,
    /// Prior (central) value.
    pub central: f64,
    /// 1-sigma uncertainty. Squared onto the covariance diagonal.
    pub sigma: f64,
}

impl ParameterRecord {
    pub fn new(name: impl Into<String>, central: f64, sigma: f64) -> Self {
        ParameterRecord {
            name: name.into(),
            central,
            sigma,
        }
    }
}

impl fmt::Display for ParameterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ± {}", self.name, self.central, self.sigma)
    }
}

// ---------------------------------------------------------------------------
// ParameterTable – ordered, validated sequence of records
// ---------------------------------------------------------------------------

/// An ordered set of parameters, fixed and validated at construction.
///
/// Invariants: non-empty, pairwise-distinct names, finite centrals and
/// sigmas. Order is preserved from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    records: Vec<ParameterRecord>,
}

impl ParameterTable {
    /// Validate and wrap a list of records.
    pub fn new(records: Vec<ParameterRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::EmptyTable);
        }
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for rec in &records {
            if !seen.insert(rec.name.as_str()) {
                return Err(DatasetError::DuplicateName(rec.name.clone()));
            }
            if !rec.central.is_finite() {
                return Err(DatasetError::NonFinite {
                    name: rec.name.clone(),
                    field: "central",
                    value: rec.central,
                });
            }
            if !rec.sigma.is_finite() {
                return Err(DatasetError::NonFinite {
                    name: rec.name.clone(),
                    field: "sigma",
                    value: rec.sigma,
                });
            }
        }
        Ok(ParameterTable { records })
    }

    /// Number of parameters (N).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ParameterRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterRecord> {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// CovarianceMatrix – dense row-major N×N storage
// ---------------------------------------------------------------------------

/// A square covariance matrix, row-major.
///
/// Constructed diagonal here (parameters are treated as uncorrelated), but
/// storage and accessors are general so a read-back of an externally produced
/// file with correlations still round-trips.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    dim: usize,
    values: Vec<f64>,
}

impl CovarianceMatrix {
    /// Diagonal matrix with `sigma[i]^2` at (i, i), zero elsewhere.
    pub fn from_sigmas(sigmas: &[f64]) -> Self {
        let dim = sigmas.len();
        let mut values = vec![0.0; dim * dim];
        for (i, s) in sigmas.iter().enumerate() {
            values[i * dim + i] = s * s;
        }
        CovarianceMatrix { dim, values }
    }

    /// Assemble from explicit rows. Every row must have length `rows.len()`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DatasetError> {
        let dim = rows.len();
        if dim == 0 {
            return Err(DatasetError::EmptyTable);
        }
        let mut values = Vec::with_capacity(dim * dim);
        for row in &rows {
            assert_eq!(row.len(), dim, "covariance rows must form a square matrix");
            values.extend_from_slice(row);
        }
        Ok(CovarianceMatrix { dim, values })
    }

    /// Matrix dimension N.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Entry (i, j). Panics on out-of-range indices.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.dim && j < self.dim, "index out of range");
        self.values[i * self.dim + j]
    }

    /// Row i as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.dim, "row index out of range");
        &self.values[i * self.dim..(i + 1) * self.dim]
    }

    /// The diagonal, i.e. the per-parameter variances.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.get(i, i)).collect()
    }
}

// ---------------------------------------------------------------------------
// OscDataset – the three output artifacts
// ---------------------------------------------------------------------------

/// The complete dataset handed to the serializer: name list, prior vector,
/// covariance matrix. Index-aligned; immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OscDataset {
    pub names: Vec<String>,
    pub priors: Vec<f64>,
    pub covariance: CovarianceMatrix,
}

impl OscDataset {
    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ParameterRecord {
        ParameterRecord::new(name, 1.0, 0.1)
    }

    #[test]
    fn table_rejects_empty_input() {
        assert_eq!(ParameterTable::new(vec![]), Err(DatasetError::EmptyTable));
    }

    #[test]
    fn table_rejects_duplicate_names() {
        let err = ParameterTable::new(vec![record("a"), record("b"), record("a")]);
        assert_eq!(err, Err(DatasetError::DuplicateName("a".into())));
    }

    #[test]
    fn table_rejects_non_finite_values() {
        let mut bad = record("a");
        bad.sigma = f64::INFINITY;
        let err = ParameterTable::new(vec![bad]);
        assert!(matches!(
            err,
            Err(DatasetError::NonFinite { field: "sigma", .. })
        ));

        let mut bad = record("b");
        bad.central = f64::NAN;
        let err = ParameterTable::new(vec![bad]);
        assert!(matches!(
            err,
            Err(DatasetError::NonFinite {
                field: "central",
                ..
            })
        ));
    }

    #[test]
    fn table_preserves_order() {
        let table =
            ParameterTable::new(vec![record("z"), record("a"), record("m")]).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn covariance_from_sigmas_is_diagonal() {
        let cov = CovarianceMatrix::from_sigmas(&[0.5, 2.0, 3.0]);
        assert_eq!(cov.dim(), 3);
        assert_eq!(cov.get(0, 0), 0.25);
        assert_eq!(cov.get(1, 1), 4.0);
        assert_eq!(cov.get(2, 2), 9.0);
        for i in 0..3 {
            for j in 0..3 {
                if i != j {
                    assert_eq!(cov.get(i, j), 0.0);
                }
            }
        }
    }

    #[test]
    fn covariance_rows_round_trip() {
        let cov = CovarianceMatrix::from_sigmas(&[1.0, 2.0]);
        let rows: Vec<Vec<f64>> = (0..cov.dim()).map(|i| cov.row(i).to_vec()).collect();
        let rebuilt = CovarianceMatrix::from_rows(rows).unwrap();
        assert_eq!(rebuilt, cov);
    }
}
