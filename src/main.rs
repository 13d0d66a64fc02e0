use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use oscprior::data::builder::build_dataset;
use oscprior::data::loader::load_table;
use oscprior::data::model::{OscDataset, ParameterTable};
use oscprior::data::presets::Preset;
use oscprior::data::reader::read_dataset;
use oscprior::data::writer::{write_dataset, COV_COLUMN, NAMES_COLUMN, PRIORS_COLUMN};

/// Generate a PMNS oscillation-parameter prior vector and diagonal
/// covariance matrix and write them to a Parquet file.
#[derive(Debug, Parser)]
#[command(name = "oscprior", version)]
struct Cli {
    /// Output file path (overwritten if it exists).
    #[arg(default_value = "osc_params.parquet")]
    output: PathBuf,

    /// Built-in PDG 2024 parameter table to use.
    #[arg(long, value_enum, default_value = "inverted", conflicts_with = "table")]
    preset: Preset,

    /// Load the parameter table from a JSON or CSV file instead of a preset.
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,

    /// Read the output file back after writing and check it matches.
    #[arg(long)]
    verify: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let table: ParameterTable = match &cli.table {
        Some(path) => load_table(path).context("constructing parameter table")?,
        None => cli.preset.table(),
    };
    info!("parameter table has {} entries", table.len());

    let dataset = build_dataset(&table);
    let n = dataset.len();

    write_dataset(&cli.output, &dataset)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    if cli.verify {
        let readback = read_dataset(&cli.output)
            .with_context(|| format!("verifying {}", cli.output.display()))?;
        if !datasets_match(&dataset, &readback) {
            bail!("verification failed: {} does not match the written dataset", cli.output.display());
        }
        info!("verification passed");
    }

    println!("Wrote {} with:", cli.output.display());
    println!("  • {NAMES_COLUMN}  (Utf8, {n} entries)");
    println!("  • {PRIORS_COLUMN} (Float64, {n} entries)");
    println!("  • {COV_COLUMN}    (List<Float64>, {n}×{n} matrix)");
    Ok(())
}

/// Names bit-exact, floats within a relative epsilon.
fn datasets_match(a: &OscDataset, b: &OscDataset) -> bool {
    const EPS: f64 = 1e-12;
    let close = |x: f64, y: f64| (x - y).abs() <= EPS * x.abs().max(y.abs()).max(1.0);

    a.names == b.names
        && a.priors.len() == b.priors.len()
        && a.priors.iter().zip(&b.priors).all(|(&x, &y)| close(x, y))
        && a.covariance.dim() == b.covariance.dim()
        && (0..a.covariance.dim()).all(|i| {
            a.covariance
                .row(i)
                .iter()
                .zip(b.covariance.row(i))
                .all(|(&x, &y)| close(x, y))
        })
}
