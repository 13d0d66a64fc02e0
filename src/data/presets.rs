use clap::ValueEnum;

use super::model::{ParameterRecord, ParameterTable};

/// Built-in PMNS parameter tables.
///
/// Values follow the PDG 2024 neutrino-mixing listings:
/// <https://pdg.lbl.gov/2024/listings/rpp2024-list-neutrino-mixing.pdf>
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Inverted mass ordering (the PDG 2024 preferred fit).
    #[value(name = "inverted")]
    InvertedPdg24,
    /// Normal mass ordering.
    #[value(name = "normal")]
    NormalPdg24,
}

impl Preset {
    /// The parameter table for this preset.
    pub fn table(self) -> ParameterTable {
        let records = match self {
            Preset::InvertedPdg24 => vec![
                // PDG 2024: 0.307 +0.013/-0.012
                ParameterRecord::new("PMNS_SIN_SQUARED_12", 0.307, 0.013),
                // PDG 2024: 2.19E-2 +/- 0.07E-2
                ParameterRecord::new("PMNS_SIN_SQUARED_13", 2.19e-2, 0.07e-2),
                // PDG 2024: 0.553 +0.016/-0.024 (inverted ordering)
                ParameterRecord::new("PMNS_SIN_SQUARED_23", 0.553, 0.024),
                // PDG 2024: 7.53E-5 +/- 0.18E-5
                ParameterRecord::new("PMNS_DELTA_MASS_SQUARED_21", 7.53e-5, 0.18e-5),
                // PDG 2024: -2.529E-3 +/- 0.029E-3 (inverted); magnitude here,
                // the ordering sign lives in PMNS_SIGN_MASS_SQUARED_32.
                // Should be left free in any fit.
                ParameterRecord::new("PMNS_DELTA_MASS_SQUARED_32", 2.529e-3, 0.029e-3),
                // PDG 2024 quotes delta_CP = 1.19 +/- 0.22. The legacy ROOT
                // macro this table descends from never assigned the central
                // value (it wrote the sigma slot twice), so the prior that
                // downstream fits were actually produced with is 0.22. Kept
                // as-is; switching to 1.19 changes the published artifact.
                ParameterRecord::new("PMNS_DELTA_CP", 0.22, 0.22),
                // PDG 2024 prefers inverted; mostly unconstrained.
                ParameterRecord::new("PMNS_SIGN_MASS_SQUARED_32", 0.5, 10.0),
            ],
            Preset::NormalPdg24 => vec![
                ParameterRecord::new("PMNS_SIN_SQUARED_12", 0.307, 0.013),
                ParameterRecord::new("PMNS_SIN_SQUARED_13", 2.19e-2, 0.07e-2),
                // PDG 2024: 0.558 +0.015/-0.021 (normal ordering)
                ParameterRecord::new("PMNS_SIN_SQUARED_23", 0.558, 0.021),
                ParameterRecord::new("PMNS_DELTA_MASS_SQUARED_21", 7.53e-5, 0.18e-5),
                // PDG 2024: 2.455E-3 +/- 0.028E-3 (normal)
                ParameterRecord::new("PMNS_DELTA_MASS_SQUARED_32", 2.455e-3, 0.028e-3),
                ParameterRecord::new("PMNS_DELTA_CP", 0.22, 0.22),
                ParameterRecord::new("PMNS_SIGN_MASS_SQUARED_32", 0.5, 10.0),
            ],
        };

        // Preset literals always satisfy the table invariants.
        ParameterTable::new(records).expect("preset tables are valid by construction")
    }
}
