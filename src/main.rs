//! @ai:module:intent CLI for sales analysis
//! @ai:module:layer presentation

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sales_insights::{
    config::AnalysisConfig,
    report::{format_currency, JsonReporter, JsonReporterTrait},
    ConsoleReporter, CsvLoader, DataGenerator, Dimension, Measure, Record, ReportGenerator,
    SalesAnalyzer, SalesLoaderTrait, TracingObserver,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "sales-insights")]
#[command(about = "Exact-decimal analysis of transactional sales records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and print a report
    Analyze {
        /// CSV file or directory of CSV files (defaults to the configured input)
        input: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Flat tax rate, e.g. 0.10 for 10%
        #[arg(long)]
        tax_rate: Option<Decimal>,

        /// Number of top products to list
        #[arg(long, allow_negative_numbers = true)]
        top: Option<i64>,

        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only include this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,

        /// Also write JSON, Markdown and chart reports to this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write reports to the configured reports directory
        #[arg(long)]
        save: bool,
    },

    /// Sum a measure grouped by a dimension
    Breakdown {
        /// CSV file or directory of CSV files
        input: PathBuf,

        /// Grouping key: category, region, product or month
        #[arg(long, default_value = "category")]
        by: Dimension,

        /// Summed value: revenue, quantity or unit-price
        #[arg(long, default_value = "revenue")]
        measure: Measure,
    },

    /// Generate a synthetic sales CSV
    Generate {
        /// Output CSV path
        #[arg(short, long, default_value = "sales_data.csv")]
        output: PathBuf,

        /// Number of records
        #[arg(short, long, default_value = "1000")]
        records: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generate reports from a saved results.json
    Report {
        /// Path to results JSON file
        #[arg(short, long)]
        results: PathBuf,

        /// Output directory for reports (defaults to the configured reports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "sales.toml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sales_insights=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            tax_rate,
            top,
            from,
            to,
            category,
            output,
            save,
        } => run_analysis(AnalyzeArgs {
            input,
            config,
            tax_rate,
            top,
            from,
            to,
            category,
            output,
            save,
        }),
        Commands::Breakdown { input, by, measure } => run_breakdown(&input, by, measure),
        Commands::Generate {
            output,
            records,
            seed,
        } => generate_data(&output, records, seed),
        Commands::Report {
            results,
            output,
            config,
        } => generate_reports(&results, output, config),
        Commands::Init { output } => init_config(&output),
    }
}

struct AnalyzeArgs {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    tax_rate: Option<Decimal>,
    top: Option<i64>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    category: Option<String>,
    output: Option<PathBuf>,
    save: bool,
}

/// @ai:intent Load, filter, aggregate and report
/// @ai:effects fs:read, fs:write, io
fn run_analysis(args: AnalyzeArgs) -> Result<()> {
    let mut config = load_or_default_config(args.config)?;

    if let Some(rate) = args.tax_rate {
        config.analysis.tax_rate = rate;
    }
    if let Some(top) = args.top {
        config.analysis.top_n = top;
    }
    if args.category.is_some() {
        config.filter.category = args.category;
    }
    if args.from.is_some() {
        config.filter.from = args.from;
    }
    if args.to.is_some() {
        config.filter.to = args.to;
    }

    let input = match args.input {
        Some(path) => path,
        None => ensure_default_input(&config)?,
    };

    tracing::info!("Loading data from {}", input.display());
    let records = load_records(&input)?;

    if records.is_empty() {
        anyhow::bail!(
            "No valid sales data found in {}. Check the file path and required headers.",
            input.display()
        );
    }

    tracing::info!("Loaded {} sales records", records.len());

    let mut analyzer = SalesAnalyzer::new(records).with_observer(Arc::new(TracingObserver));

    if !config.filter.is_empty() {
        tracing::info!("Applying filter: {:?}", config.filter);
    }
    if let Some((start, end)) = config.filter.date_range() {
        analyzer = analyzer.filter_by_date_range(start, end);
    }
    if let Some(category) = &config.filter.category {
        analyzer = analyzer.filter_by_category(category);
    }

    let report = analyzer.summarize(config.analysis.tax_rate, config.analysis.top_n)?;

    println!();
    print!("{}", ConsoleReporter::new().render(&report));

    if let Some(output_dir) = config.paths.reports_target(args.output, args.save) {
        let written = ReportGenerator::new().generate_all(&report, &output_dir)?;
        println!();
        for path in written {
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// @ai:intent Use the configured input, generating sample data if absent
/// @ai:effects fs:read, fs:write
fn ensure_default_input(config: &AnalysisConfig) -> Result<PathBuf> {
    let path = config.paths.input.clone();

    if !path.exists() {
        tracing::info!("Default file {} not found. Generating sample data...", path.display());
        let mut generator = match config.generator.seed {
            Some(seed) => DataGenerator::with_seed(seed),
            None => DataGenerator::new(),
        };
        generator.write_csv(&path, config.generator.records)?;
    }

    Ok(path)
}

/// @ai:intent Load a single CSV or every CSV under a directory
/// @ai:effects fs:read
fn load_records(input: &Path) -> Result<Vec<Record>> {
    let loader = CsvLoader::new();

    let records = if input.is_dir() {
        loader.load_dir(input)
    } else {
        loader.load(input)
    };

    records.with_context(|| format!("Failed to load sales data from {}", input.display()))
}

/// @ai:intent Print a generic grouped sum
/// @ai:effects fs:read, io
fn run_breakdown(input: &Path, by: Dimension, measure: Measure) -> Result<()> {
    let analyzer = SalesAnalyzer::new(load_records(input)?);
    let totals = analyzer.breakdown(by, measure)?;

    println!("{} by {} ({} records):", measure, by, analyzer.count());
    println!("{}", "-".repeat(50));

    for (key, value) in &totals {
        let shown = match measure {
            Measure::Quantity => value.to_string(),
            Measure::Revenue | Measure::UnitPrice => format_currency(*value),
        };
        println!("{:<30} {:>18}", key, shown);
    }

    Ok(())
}

/// @ai:intent Write a synthetic data file
/// @ai:effects fs:write
fn generate_data(output: &Path, records: usize, seed: Option<u64>) -> Result<()> {
    let mut generator = match seed {
        Some(seed) => DataGenerator::with_seed(seed),
        None => DataGenerator::new(),
    };

    generator.write_csv(output, records)?;
    println!("Generated {} records in {}", records, output.display());
    Ok(())
}

/// @ai:intent Generate reports from results file
/// @ai:effects fs:read, fs:write
fn generate_reports(
    results_path: &Path,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let report = JsonReporter::new().load(results_path)?;
    let output_dir = match output {
        Some(dir) => dir,
        None => load_or_default_config(config)?.paths.reports_dir,
    };

    ReportGenerator::new().generate_all(&report, &output_dir)?;
    println!("Reports generated in {}", output_dir.display());
    Ok(())
}

/// @ai:intent Initialize default configuration file
/// @ai:effects fs:write
fn init_config(output: &Path) -> Result<()> {
    let config = AnalysisConfig::default();
    config.save(output)?;
    println!("Configuration saved to {}", output.display());
    Ok(())
}

/// @ai:intent Load configuration or use defaults
/// @ai:effects fs:read
fn load_or_default_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::load(&p)
            .with_context(|| format!("Failed to load config {}", p.display())),
        None => {
            let default_path = PathBuf::from("sales.toml");

            if default_path.exists() {
                AnalysisConfig::load(&default_path)
            } else {
                Ok(AnalysisConfig::default())
            }
        }
    }
}
