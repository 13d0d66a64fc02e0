use super::model::{CovarianceMatrix, OscDataset, ParameterTable};

/// Build the three output artifacts from a validated parameter table.
///
/// Pure construction, no I/O: `priors[i]` takes the central value of
/// parameter i, and the covariance matrix gets `sigma[i]^2` at (i, i) with
/// all off-diagonal entries zero. The table's validation guarantees the
/// preconditions (N ≥ 1, distinct names, finite values), so this step
/// cannot fail.
pub fn build_dataset(table: &ParameterTable) -> OscDataset {
    let names: Vec<String> = table.iter().map(|r| r.name.clone()).collect();
    let priors: Vec<f64> = table.iter().map(|r| r.central).collect();
    let sigmas: Vec<f64> = table.iter().map(|r| r.sigma).collect();

    OscDataset {
        names,
        priors,
        covariance: CovarianceMatrix::from_sigmas(&sigmas),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::ParameterRecord;
    use crate::data::presets::Preset;

    #[test]
    fn dataset_is_index_aligned() {
        let table = ParameterTable::new(vec![
            ParameterRecord::new("alpha", 1.5, 0.3),
            ParameterRecord::new("beta", -2.0, 0.5),
        ])
        .unwrap();

        let ds = build_dataset(&table);
        assert_eq!(ds.names, ["alpha", "beta"]);
        assert_eq!(ds.priors, [1.5, -2.0]);
        assert_eq!(ds.covariance.dim(), 2);
        assert_eq!(ds.covariance.get(0, 0), 0.3 * 0.3);
        assert_eq!(ds.covariance.get(1, 1), 0.5 * 0.5);
        assert_eq!(ds.covariance.get(0, 1), 0.0);
        assert_eq!(ds.covariance.get(1, 0), 0.0);
    }

    #[test]
    fn inverted_pdg24_matches_published_numbers() {
        let ds = build_dataset(&Preset::InvertedPdg24.table());
        assert_eq!(ds.len(), 7);
        assert_eq!(
            ds.names,
            [
                "PMNS_SIN_SQUARED_12",
                "PMNS_SIN_SQUARED_13",
                "PMNS_SIN_SQUARED_23",
                "PMNS_DELTA_MASS_SQUARED_21",
                "PMNS_DELTA_MASS_SQUARED_32",
                "PMNS_DELTA_CP",
                "PMNS_SIGN_MASS_SQUARED_32",
            ]
        );
        assert_eq!(
            ds.priors,
            [0.307, 0.0219, 0.553, 7.53e-5, 2.529e-3, 0.22, 0.5]
        );

        let expected_diag = [1.69e-4, 4.9e-7, 5.76e-4, 3.24e-12, 8.41e-10, 0.0484, 100.0];
        for (i, &expected) in expected_diag.iter().enumerate() {
            let got = ds.covariance.get(i, i);
            assert!(
                (got - expected).abs() <= expected * 1e-12,
                "diagonal[{i}]: got {got}, expected {expected}"
            );
        }
        for i in 0..7 {
            for j in 0..7 {
                if i != j {
                    assert_eq!(ds.covariance.get(i, j), 0.0);
                }
            }
        }
    }

    proptest! {
        /// For any N ≥ 1, the artifacts agree in size and the diagonal is
        /// exactly the squared sigmas.
        #[test]
        fn dimensions_and_diagonal(values in prop::collection::vec((-1e6f64..1e6, 0f64..1e3), 1..32)) {
            let records: Vec<ParameterRecord> = values
                .iter()
                .enumerate()
                .map(|(i, &(central, sigma))| ParameterRecord::new(format!("p{i}"), central, sigma))
                .collect();
            let table = ParameterTable::new(records).unwrap();
            let n = table.len();

            let ds = build_dataset(&table);
            prop_assert_eq!(ds.names.len(), n);
            prop_assert_eq!(ds.priors.len(), n);
            prop_assert_eq!(ds.covariance.dim(), n);

            for (i, rec) in table.iter().enumerate() {
                prop_assert_eq!(ds.priors[i], rec.central);
                prop_assert_eq!(ds.covariance.get(i, i), rec.sigma * rec.sigma);
                for j in 0..n {
                    if i != j {
                        prop_assert_eq!(ds.covariance.get(i, j), 0.0);
                    }
                }
            }
        }
    }
}
