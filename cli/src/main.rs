//! fcisim CLI - FIFO balance estimation for FCI movement workbooks
//!
//! Reads an XLSX export, matches subscriptions and redemptions first-in
//! first-out, and prints balances and table totals.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use fcisim::fund::{DEFAULT_LEDGER_SHEET, DEFAULT_VALUATION_SHEET, DEFAULT_WITHHOLDING_SHEET};
use fcisim::render::JsonFormat;
use fcisim::{Simulator, SimulatorConfig, Workbook};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Workbook read when no input is given.
const DEFAULT_INPUT_FILE: &str = "FCI Abril 2025.xlsx";

/// FIFO balance estimation for mutual-fund movement workbooks
#[derive(Parser)]
#[command(
    name = "fcisim",
    author = "iyulab",
    version,
    about = "Estimate FCI balances from an XLSX movement export",
    long_about = "fcisim - FIFO position estimator for mutual-fund ledgers.\n\n\
                  Reads subscriptions and redemptions from the unit-class ledger, \
                  rebuilds open lots first-in first-out, and totals the valuation \
                  and IIBB withholding tables."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SheetArgs {
    /// Unit-class ledger sheet
    #[arg(long, default_value = DEFAULT_LEDGER_SHEET)]
    ledger_sheet: String,

    /// Tax/accounting valuation sheet
    #[arg(long, default_value = DEFAULT_VALUATION_SHEET)]
    valuation_sheet: String,

    /// IIBB withholding sheet
    #[arg(long, default_value = DEFAULT_WITHHOLDING_SHEET)]
    withholding_sheet: String,
}

impl From<SheetArgs> for SimulatorConfig {
    fn from(args: SheetArgs) -> Self {
        SimulatorConfig::new()
            .with_ledger_sheet(args.ledger_sheet)
            .with_valuation_sheet(args.valuation_sheet)
            .with_withholding_sheet(args.withholding_sheet)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation and print the report
    Run {
        /// Input XLSX file
        #[arg(default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        #[command(flatten)]
        sheets: SheetArgs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the sheets of a workbook
    Sheets {
        /// Input XLSX file
        #[arg(default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,
    },

    /// Show the open FIFO lots of the ledger sheet
    Lots {
        /// Input XLSX file
        #[arg(default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        /// Unit-class ledger sheet
        #[arg(long, default_value = DEFAULT_LEDGER_SHEET)]
        ledger_sheet: String,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

/// Report output format
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON object
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            input,
            sheets,
            format,
            compact,
            output,
        } => {
            let pb = create_spinner("Reading workbook...");
            let workbook = open_workbook(&input)?;

            pb.set_message("Matching lots...");
            let report = Simulator::new(&workbook, sheets.into()).run()?;
            pb.finish_and_clear();

            let rendered = match format {
                OutputFormat::Text => fcisim::render::to_text(&report),
                OutputFormat::Json => fcisim::render::to_json(&report, json_format(compact))?,
            };
            write_output(output.as_deref(), &rendered)?;

            if let Some(path) = output {
                println!(
                    "{} Report written: {}",
                    "✓".green().bold(),
                    path.display()
                );
            }
        }

        Commands::Sheets { input } => {
            let workbook = open_workbook(&input)?;

            println!("{}", "Sheets".cyan().bold());
            println!("{}", "─".repeat(40));
            for name in workbook.sheet_names() {
                println!("  {}", name);
            }
        }

        Commands::Lots {
            input,
            ledger_sheet,
            format,
        } => {
            let workbook = open_workbook(&input)?;
            let config = SimulatorConfig::new().with_ledger_sheet(ledger_sheet);
            let outcome = Simulator::new(&workbook, config).fifo()?;

            match format {
                OutputFormat::Text => print!("{}", fcisim::render::lots_to_text(&outcome)),
                OutputFormat::Json => println!(
                    "{}",
                    fcisim::render::to_json(&outcome, JsonFormat::Pretty)?
                ),
            }

            if outcome.unmatched_units > 0.0 {
                eprintln!(
                    "{} redemptions exceeded open lots by {:.6} units",
                    "!".yellow().bold(),
                    outcome.unmatched_units
                );
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

/// Reject non-spreadsheet input before handing it to the simulator.
fn open_workbook(path: &Path) -> fcisim::Result<Workbook> {
    fcisim::ensure_spreadsheet_path(path)?;
    Workbook::open(path)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn print_version() {
    println!("{} {}", "fcisim".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("FIFO balance estimation for FCI movement workbooks");
    println!();
    println!(
        "Default sheets: {}, {}, {}",
        DEFAULT_LEDGER_SHEET, DEFAULT_VALUATION_SHEET, DEFAULT_WITHHOLDING_SHEET
    );
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{}", content)?;
            if !content.ends_with('\n') {
                writeln!(handle)?;
            }
        }
    }
    Ok(())
}
