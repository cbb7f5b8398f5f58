use anyhow::{Context, Result};
use clap::Parser;
use sales_insight::config::{Cli, Command};
use sales_insight::engine::{ListingRequest, SalesAnalytics};
use sales_insight::{logging, seed, SqliteStore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let mut store = SqliteStore::open(&cli.db_path)?;

    match cli.command {
        Command::Import { file } => run_import(&mut store, &file)?,
        Command::Report { month } => {
            let combined = SalesAnalytics::new(&store).combined(Some(month.as_str()))?;
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        Command::List { month, search, page, page_size } => {
            let listing = SalesAnalytics::new(&store).list(&ListingRequest {
                month: Some(month),
                search,
                page,
                page_size,
            })?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}

fn run_import(store: &mut SqliteStore, file: &std::path::Path) -> Result<()> {
    println!("📂 Loading {}...", file.display());
    let records = seed::load_file(file)?;
    println!("✓ Loaded {} records", records.len());

    let inserted = store
        .replace_all(&records)
        .context("Failed to replace store contents")?;
    let count = store.verify_count()?;

    println!("✓ Inserted: {} records", inserted);
    println!("✓ Database contains {} records", count);

    Ok(())
}
