//! PL Analyzer CLI - Premier League player statistics
//!
//! # Main Commands
//!
//! ```bash
//! pl-analyzer serve                         # Start HTTP server (port 3000)
//! pl-analyzer dashboard --team Arsenal      # Full report as JSON
//! pl-analyzer kpis --age 18-23              # Headline KPIs only
//! ```
//!
//! # Inspection Commands
//!
//! ```bash
//! pl-analyzer load                          # Cleaning report for the data file
//! pl-analyzer filters                       # Available filter values
//! pl-analyzer plan                          # Print the default cleaning plan
//! pl-analyzer plan --describe               # Show available cleaning operations
//! ```
//!
//! The data file comes from `--data`, else `PL_DATA_PATH`, else `database.csv`.

use clap::{Args, Parser, Subcommand};
use pl_analyzer::api::logs::log_info;
use pl_analyzer::{
    apply_filters, build_dashboard, compute_kpis, default_plan, extended_insights, load_cached,
    operations_description, run_basic_questions, AppConfig, FilterOptions, FilterSet,
    InsightSummary, PlayerTable, RangeFilter, TeamSelection,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pl-analyzer")]
#[command(about = "Analyze Premier League player statistics", long_about = None)]
struct Cli {
    /// Statistics file (overrides PL_DATA_PATH)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Cleaning plan JSON (overrides PL_CLEANING_PLAN)
    #[arg(long, global = true)]
    plan: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and clean the data file, then print a cleaning report
    Load {
        /// Also print every cleaned row
        #[arg(long)]
        rows: bool,
    },

    /// Print the values each filter can take
    Filters,

    /// Headline KPIs for a filter selection
    Kpis {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Ranked question tables with chart descriptions
    Questions {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Extended insights over players with more than 60 minutes
    Insights {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Full dashboard report
    Dashboard {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default cleaning plan
    Plan {
        /// Describe the available operations instead
        #[arg(long)]
        describe: bool,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides PL_SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Row filters shared by the analysis commands
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep only these players (repeatable)
    #[arg(long = "player")]
    players: Vec<String>,

    /// Keep one team ("All" for every team)
    #[arg(long)]
    team: Option<String>,

    /// Keep only these positions (repeatable)
    #[arg(long = "position")]
    positions: Vec<String>,

    /// Age range, MIN-MAX
    #[arg(long)]
    age: Option<RangeFilter>,

    /// Minutes range, MIN-MAX
    #[arg(long)]
    minutes: Option<RangeFilter>,

    /// Goals range, MIN-MAX
    #[arg(long)]
    goals: Option<RangeFilter>,
}

impl From<FilterArgs> for FilterSet {
    fn from(args: FilterArgs) -> Self {
        let non_empty = |v: Vec<String>| (!v.is_empty()).then_some(v);
        FilterSet {
            players: non_empty(args.players),
            team: args.team.map(TeamSelection::from).unwrap_or_default(),
            positions: non_empty(args.positions),
            age: args.age,
            minutes: args.minutes,
            goals: args.goals,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadReport<'a> {
    rows: usize,
    columns: &'a [String],
    parse_errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [pl_analyzer::PlayerRecord]>,
}

#[derive(Serialize)]
struct InsightsReport {
    insights: pl_analyzer::ExtendedInsights,
    summary: InsightSummary,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(plan) = cli.plan {
        config.plan_path = Some(plan);
    }

    match cli.command {
        Commands::Load { rows } => cmd_load(&config, rows),
        Commands::Filters => {
            let table = load_table(&config)?;
            print_json(&FilterOptions::from_table(&table))
        }
        Commands::Kpis { filters } => {
            let table = load_table(&config)?;
            let rows = apply_filters(&table, &filters.into());
            print_json(&compute_kpis(&rows))
        }
        Commands::Questions { filters } => {
            let table = load_table(&config)?;
            let rows = apply_filters(&table, &filters.into());
            print_json(&run_basic_questions(&rows))
        }
        Commands::Insights { filters } => {
            let table = load_table(&config)?;
            let rows = apply_filters(&table, &filters.into());
            let insights = extended_insights(&rows);
            let summary = InsightSummary::from_insights(&insights);
            print_json(&InsightsReport { insights, summary })
        }
        Commands::Dashboard { filters, output } => {
            let table = load_table(&config)?;
            let report = build_dashboard(&table, &filters.into());
            log_info(format!(
                "{} of {} rows match the filters",
                report.filtered_rows, report.total_rows
            ));
            let json = serde_json::to_string_pretty(&report)?;
            write_output(&json, output.as_deref())
        }
        Commands::Plan { describe } => cmd_plan(describe),
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let plan = config.plan()?;
            pl_analyzer::server::start_server(config, plan).await
        }
    }
}

fn load_table(config: &AppConfig) -> Result<Arc<PlayerTable>, Box<dyn std::error::Error>> {
    let plan = config.plan()?;
    Ok(load_cached(&config.data_path, &plan)?)
}

fn cmd_load(config: &AppConfig, with_rows: bool) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Loading: {}", config.data_path.display());
    let table = load_table(config)?;

    let report = LoadReport {
        rows: table.len(),
        columns: &table.columns,
        parse_errors: table.parse_errors.iter().map(ToString::to_string).collect(),
        records: with_rows.then_some(table.records.as_slice()),
    };
    print_json(&report)
}

fn cmd_plan(describe: bool) -> Result<(), Box<dyn std::error::Error>> {
    if describe {
        println!("{}", operations_description());
    } else {
        println!("{}", default_plan().to_json()?);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
