use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use loader::{
    BarProgress, LoadError, LoadPlan, LoadSummary, LogProgress, POKEDEX_PLAN, SilentProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;

/// The main entry point for the Pokédex loader.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; DB_URI may already be in the environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _log_guard =
        configuration::init_tracing(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Load(args) => handle_load(args, config).await,
        Commands::Plan => handle_plan(),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Seeds a PostgreSQL database with Pokédex reference data from CSV files.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every Pokédex table, in dependency order.
    Load(LoadArgs),
    /// Print the load plan: which source feeds which table, in order.
    Plan,
}

#[derive(Parser)]
struct LoadArgs {
    /// PostgreSQL connection URI. Falls back to `database.url` in the configuration.
    #[arg(long, env = "DB_URI")]
    db_uri: Option<String>,

    /// Directory holding the Pokédex CSV files.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Refuse to load while migrations in this directory are unapplied
    /// (defaults to `database.migrations_dir`, itself `migrations`).
    #[arg(long, conflicts_with = "skip_migration_check")]
    migrations_dir: Option<PathBuf>,

    /// Load without checking for unapplied migrations.
    #[arg(long)]
    skip_migration_check: bool,

    /// Suppress progress output.
    #[arg(long, short)]
    quiet: bool,
}

// ==============================================================================
// Load Command Logic
// ==============================================================================

async fn handle_load(args: LoadArgs, mut config: Config) -> anyhow::Result<()> {
    let database_url = args
        .db_uri
        .or_else(|| config.database.url.clone())
        .context("No database URI given; pass --db-uri or set DB_URI")?;

    if let Some(dir) = args.data_dir {
        config.data.csv_dir = dir;
    }
    if args.skip_migration_check {
        config.database.migrations_dir = None;
    } else if let Some(dir) = args.migrations_dir {
        config.database.migrations_dir = Some(dir);
    }

    tracing::info!(data_dir = %config.data.csv_dir.display(), "Starting Pokédex load.");

    let result = if args.quiet {
        loader::load_all(&database_url, &config, SilentProgress).await
    } else if std::io::stderr().is_terminal() {
        loader::load_all(&database_url, &config, BarProgress::new()?).await
    } else {
        loader::load_all(&database_url, &config, LogProgress::default()).await
    };

    match result {
        Ok(summary) => {
            println!("Successfully loaded Pokémon data into the database.");
            println!("{}", summary_table(&summary));
            Ok(())
        }
        Err(LoadError::PendingMigrations(pending)) => {
            anyhow::bail!("Please apply {pending} outstanding migrations before loading data.")
        }
        Err(e) => Err(e).context("Pokédex load failed"),
    }
}

fn summary_table(summary: &LoadSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Table", "Source", "Read", "Written", "Skipped", "Affected"]);
    for t in &summary.tables {
        table.add_row(vec![
            t.table.clone(),
            t.source.clone(),
            t.rows_read.to_string(),
            t.rows_written.to_string(),
            t.rows_skipped.to_string(),
            t.rows_affected.to_string(),
        ]);
    }
    table
}

// ==============================================================================
// Plan Command Logic
// ==============================================================================

fn handle_plan() -> anyhow::Result<()> {
    let plan = LoadPlan::new(POKEDEX_PLAN.to_vec()).context("The built-in load plan is invalid")?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Source", "Table", "Conflict key", "References"]);
    for (i, entry) in plan.entries().iter().enumerate() {
        let key = if entry.primary_key.is_empty() {
            "(plain insert)".to_string()
        } else {
            entry.primary_key.join(", ")
        };
        table.add_row(vec![
            (i + 1).to_string(),
            entry.source.to_string(),
            entry.table.to_string(),
            key,
            entry.references.join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
