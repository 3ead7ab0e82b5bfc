mod cleanup;
mod config;
mod display;
mod error;
mod export;
mod form;
mod parser;
mod store;
mod web;

use std::env;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cleanup::cleanup_week;
use config::ServerConfig;
use display::print_cleanup_report;
use export::write_assignments;
use parser::load_assignments;
use store::{AssignmentStore, InMemoryStore};

const DEFAULT_WEEK: &str = "local";
const DEFAULT_OUTPUT: &str = "assignments_clean.csv";

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLEANUP_LOG")
        .unwrap_or_else(|_| EnvFilter::new("assignment_cleanup=info,actix_web=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);

    match env::var("CLEANUP_LOG_FORMAT").as_deref() {
        Ok("json") => registry.with(fmt::layer().json().with_ansi(false)).init(),
        _ => registry.with(fmt::layer().compact()).init(),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  assignment-cleanup web [port]");
    println!("  assignment-cleanup cleanup <input.csv> [output.csv] [--week WEEK]");
}

/// Runs one cleanup pass over a CSV export and writes the survivors back out
fn run_cleanup(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let mut week = DEFAULT_WEEK.to_string();
    let mut paths = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--week" {
            week = iter.next().ok_or("--week needs a value")?.clone();
        } else {
            paths.push(arg.as_str());
        }
    }

    let input = *paths.first().ok_or("missing input CSV path")?;
    let output = paths.get(1).copied().unwrap_or(DEFAULT_OUTPUT);

    println!("Loading assignments from {input}...");
    let records = load_assignments(input)?;
    println!("Loaded {} assignments", records.len());

    let store = InMemoryStore::with_records(&week, records);
    let report = cleanup_week(&store, &week)?;
    print_cleanup_report(&report);

    let remaining = store.list(&week)?;
    write_assignments(output, &remaining)?;
    println!("Remaining assignments saved to {output}");

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("web") => {
            let config = ServerConfig::from_env().with_port_arg(args.get(2).map(String::as_str));
            println!("Access the API at http://localhost:{}", config.port);

            let store: Arc<dyn AssignmentStore> = Arc::new(InMemoryStore::new());
            web::start_server(config, store).await?;
        }
        Some("cleanup") => run_cleanup(&args[2..])?,
        _ => print_usage(),
    }

    Ok(())
}
