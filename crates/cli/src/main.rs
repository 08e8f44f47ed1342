//! HomeValueIQ CLI
//!
//! A command-line tool for requesting house price estimates, inspecting
//! the feature schema and checking on the estimator server.

mod client;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ask, estimate, health, schema};
use estimator_lib::advisory::FaqQuestion;

/// HomeValueIQ CLI
#[derive(Parser)]
#[command(name = "hviq")]
#[command(author, version, about = "CLI for the HomeValueIQ house price estimator", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via HVIQ_API_URL env var or the config file)
    #[arg(long, env = "HVIQ_API_URL")]
    pub api_url: Option<String>,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the price of a house
    Estimate(estimate::EstimateArgs),

    /// Show the ordered feature schema
    Schema {
        /// Use the schema built into this binary instead of asking the server
        #[arg(long)]
        local: bool,
    },

    /// Ask the FAQ bot; lists the questions when none is given
    Ask {
        /// Question id, e.g. how-it-works
        #[arg(value_parser = ask::parse_question)]
        question: Option<FaqQuestion>,
    },

    /// Show a house tip
    Tip,

    /// Check server health and readiness
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load()?;
    let api_url = config.api_url(cli.api_url.as_deref());
    if cli.verbose {
        output::print_info(&format!("Using API at {}", api_url));
    }

    // Initialize client
    let client = client::ApiClient::new(&api_url)?;

    // Execute command
    match cli.command {
        Commands::Estimate(args) => {
            estimate::run(&client, &args, cli.format).await?;
        }
        Commands::Schema { local } => {
            schema::show_schema(&client, local, cli.format).await?;
        }
        Commands::Ask { question } => {
            ask::ask(question, cli.format)?;
        }
        Commands::Tip => {
            ask::tip(cli.format)?;
        }
        Commands::Health => {
            health::show_health(&client, cli.format).await?;
        }
    }

    Ok(())
}
