use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use finance_report::display::{render_dashboard, render_metrics};
use finance_report::model::{NewRecord, TableKind};
use finance_report::{DashboardState, Result, WorkbookStore, logging, submit};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Init => {
            let store = WorkbookStore::create(&cli.store)?;
            println!("Record store created at {}", store.path().display());
            Ok(())
        }
        Command::Show(args) => {
            let store = WorkbookStore::open(&cli.store)?;
            let state = DashboardState::load(&store)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                print!("{}", render_dashboard(&state));
            }
            Ok(())
        }
        Command::Add(args) => execute_add(&cli.store, args),
        Command::Render(args) => {
            let store = WorkbookStore::open(&cli.store)?;
            let state = DashboardState::load(&store)?;
            state.render_workbook(&args.output)?;
            println!("Dashboard written to {}", args.output.display());
            Ok(())
        }
    }
}

fn execute_add(store_path: &Path, args: AddArgs) -> Result<()> {
    let mut store = WorkbookStore::open(store_path)?;
    let kind = TableKind::from(args.kind);
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let record = NewRecord::new(kind, date, args.category, args.description, args.amount)?;

    let state = submit(&mut store, &record)?;
    println!("✅ {} berhasil ditambahkan!", kind.label());
    println!();
    print!("{}", render_metrics(&state.summary));
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Personal finance dashboard over an Assets/Liabilities workbook."
)]
struct Cli {
    /// Workbook holding the Assets and Liabilities sheets.
    #[arg(long, global = true, default_value = "finance.xlsx")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty record store.
    Init,
    /// Print the dashboard.
    Show(ShowArgs),
    /// Append a record and print the refreshed totals.
    Add(AddArgs),
    /// Write the dashboard, with charts, to an Excel workbook.
    Render(RenderArgs),
}

#[derive(clap::Args)]
struct ShowArgs {
    /// Emit the dashboard state as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Table the record belongs to.
    #[arg(long, value_enum)]
    kind: RecordKind,

    /// Record date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Free-text category.
    #[arg(long, default_value = "")]
    category: String,

    /// Free-text description.
    #[arg(long, default_value = "")]
    description: String,

    /// Amount in rupiah; must not be negative.
    #[arg(long)]
    amount: f64,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Output workbook path.
    #[arg(long)]
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RecordKind {
    #[value(alias = "asset", alias = "assets")]
    Aset,
    #[value(alias = "liability", alias = "liabilities")]
    Liabilitas,
}

impl From<RecordKind> for TableKind {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Aset => TableKind::Assets,
            RecordKind::Liabilitas => TableKind::Liabilities,
        }
    }
}
