use std::path::PathBuf;

use clap::Parser;
use salescope_core::{dataset, generate, DatasetSummary, GeneratorConfig, SalesRecord};
use tracing::info;

/// Generate a synthetic sales dataset for the Salescope dashboard.
#[derive(Debug, Parser)]
#[command(name = "datagen", version, about)]
struct Args {
    /// Number of records to generate
    #[arg(short = 'n', long, default_value_t = 2000)]
    samples: usize,

    /// CSV file to create or overwrite
    #[arg(short, long, default_value = "sales_data.csv")]
    output: PathBuf,

    /// RNG seed; the same seed reproduces the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

impl Args {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            samples: self.samples,
            seed: self.seed,
            ..Default::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Args::parse();
    run(&args)?;
    Ok(())
}

fn run(args: &Args) -> salescope_core::Result<Vec<SalesRecord>> {
    println!(
        "--- Generating {} Synthetic Sales Data Samples ---",
        args.samples
    );
    let records = generate(&args.generator_config());
    dataset::save(&args.output, &records)?;
    info!(path = %args.output.display(), seed = args.seed, "Dataset written");
    println!("Synthetic data saved to '{}'", args.output.display());

    println!("\nDataset head:\n{}", head(&records, 5));
    println!("Dataset info:\n{}", column_info(&records));
    println!("Dataset description:\n{}", DatasetSummary::from_records(&records));
    Ok(records)
}

fn head(records: &[SalesRecord], n: usize) -> String {
    let mut out = format!(
        "{:<12}{:<10}{:<14}{:>10}{:>14}{:>12}{:>12}\n",
        "Date", "Region", "Category", "Units", "PricePerUnit", "Sales", "Profit"
    );
    for r in records.iter().take(n) {
        out.push_str(&format!(
            "{:<12}{:<10}{:<14}{:>10}{:>14.2}{:>12.2}{:>12.2}\n",
            r.date.to_string(),
            r.region.as_str(),
            r.category.as_str(),
            r.units_sold,
            r.price_per_unit,
            r.sales,
            r.profit
        ));
    }
    out
}

/// Column names with their non-null counts and value types.
fn column_info(records: &[SalesRecord]) -> String {
    const TYPES: [&str; 7] = ["date", "string", "string", "u32", "f64", "f64", "f64"];
    let mut out = format!("{} entries, {} columns\n", records.len(), dataset::COLUMNS.len());
    out.push_str(&format!("{:<4}{:<18}{:>10}  {}\n", "#", "Column", "Non-Null", "Type"));
    for (i, (column, ty)) in dataset::COLUMNS.iter().zip(TYPES).enumerate() {
        out.push_str(&format!("{:<4}{:<18}{:>10}  {}\n", i, column, records.len(), ty));
    }
    out
}
