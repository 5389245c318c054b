mod commands;

use clap::{Parser, Subcommand};
use partscout_core::{ComponentGrade, Distributor};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "partscout")]
#[command(about = "Find, compare, and vet electronic components across distributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find qualified replacements for a part
    FindAlternative {
        /// Manufacturer part number of the original component
        mpn: String,
        /// Required minimum operating temperature in °C
        #[arg(long, default_value_t = -40.0, allow_negative_numbers = true)]
        temp_min: f64,
        /// Required maximum operating temperature in °C
        #[arg(long, default_value_t = 125.0, allow_negative_numbers = true)]
        temp_max: f64,
        /// Acceptable grade (repeatable; any grade when omitted)
        #[arg(long = "grade")]
        grades: Vec<ComponentGrade>,
        /// Minimum stock a replacement must have
        #[arg(long, default_value_t = 0)]
        min_stock: u64,
        /// Do not flag package differences
        #[arg(long)]
        any_footprint: bool,
        /// Price increase above which a note is added
        #[arg(long, default_value_t = 50.0)]
        max_price_increase_pct: f64,
    },
    /// Show stock and pricing at each distributor
    Availability {
        mpn: String,
        /// Restrict the lookup to a distributor (repeatable)
        #[arg(long = "distributor")]
        distributors: Vec<Distributor>,
    },
    /// Compare stock and pricing for several parts at once
    Compare {
        /// Manufacturer part numbers to look up
        #[arg(required = true, num_args = 1..)]
        mpns: Vec<String>,
    },
    /// Check a part against the -40°C to 125°C aviation range
    Compliance { mpn: String },
    /// Keyword search with local filters
    Search {
        keyword: String,
        /// Restrict the search to a distributor (repeatable)
        #[arg(long = "distributor")]
        distributors: Vec<Distributor>,
        /// Case-insensitive manufacturer name
        #[arg(long)]
        manufacturer: Option<String>,
        #[arg(long)]
        min_stock: Option<u64>,
        /// Acceptable grade (repeatable)
        #[arg(long = "grade")]
        grades: Vec<ComponentGrade>,
        /// Required minimum operating temperature in °C
        #[arg(long, requires = "temp_max", allow_negative_numbers = true)]
        temp_min: Option<f64>,
        /// Required maximum operating temperature in °C
        #[arg(long, requires = "temp_min", allow_negative_numbers = true)]
        temp_max: Option<f64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = partscout_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let sources = partscout_distributors::build_sources(&config)?;
    let finder = partscout_matcher::AlternativeFinder::new(sources);

    match cli.command {
        Commands::FindAlternative {
            mpn,
            temp_min,
            temp_max,
            grades,
            min_stock,
            any_footprint,
            max_price_increase_pct,
        } => {
            let requirements = commands::requirements(
                temp_min,
                temp_max,
                grades,
                min_stock,
                any_footprint,
                max_price_increase_pct,
            )?;
            commands::run_find_alternative(&finder, &mpn, &requirements).await
        }
        Commands::Availability { mpn, distributors } => {
            commands::run_availability(&finder, &mpn, &distributors).await
        }
        Commands::Compare { mpns } => commands::run_compare(&finder, &mpns).await,
        Commands::Compliance { mpn } => commands::run_compliance(&finder, &mpn).await,
        Commands::Search {
            keyword,
            distributors,
            manufacturer,
            min_stock,
            grades,
            temp_min,
            temp_max,
        } => {
            let filters =
                commands::search_filters(manufacturer, min_stock, grades, temp_min, temp_max)?;
            commands::run_search(&finder, &keyword, &filters, &distributors).await
        }
    }
}
