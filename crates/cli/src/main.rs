use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "termquery")]
#[command(about = "Get-or-create SEO search queries for keyword terms", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the database schema
    Migrate,
    /// Return the search query for a term, generating it if missing
    Resolve {
        #[arg(value_parser = parse_term)]
        term: String,
    },
    /// Print the stored search query for a term without generating one
    Show {
        #[arg(value_parser = parse_term)]
        term: String,
    },
}

fn parse_term(raw: &str) -> Result<String, String> {
    let term = raw.trim();
    if term.is_empty() {
        return Err("term must not be empty".to_owned());
    }
    Ok(term.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Resolve { term } => commands::resolve::run(&term).await,
        Commands::Show { term } => commands::show::run(&term).await,
    }
}
