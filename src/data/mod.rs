/// Data layer: parameter tables, dataset construction, and Parquet I/O.
///
/// Architecture:
/// ```text
///  preset / .json / .csv
///        │
///        ▼
///   ┌───────────┐
///   │  loader    │  parse file → ParameterTable (validated)
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  builder   │  names + priors + diagonal covariance → OscDataset
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐      ┌───────────┐
///   │  writer    │ ───▶ │  reader    │  Parquet out / verification read-back
///   └───────────┘      └───────────┘
/// ```

pub mod builder;
pub mod loader;
pub mod model;
pub mod presets;
pub mod reader;
pub mod writer;
