mod client;
mod commands;
mod config;
mod models;
mod roster;
mod web;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use client::DEFAULT_SERVER;

/// Mergington High School activities: sign students up for extracurriculars.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging and raw JSON output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the activities HTTP service
    Serve {
        /// Path to an activity catalog (defaults to the built-in catalog)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Listen address, overrides [server].addr (e.g. "0.0.0.0:8000")
        #[arg(short = 'a', long)]
        addr: Option<String>,
    },

    /// List activities, spots left and participants from a running server
    List {
        /// Base URL of the activities service
        #[arg(short = 's', long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Sign a student up for an activity
    ///
    /// Example:
    ///   signup "Chess Club" student@mergington.edu
    Signup {
        /// Activity name (case-sensitive)
        activity: String,

        /// Student email
        email: String,

        /// Base URL of the activities service
        #[arg(short = 's', long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Unregister a student from an activity
    Unregister {
        /// Activity name (case-sensitive)
        activity: String,

        /// Student email
        email: String,

        /// Base URL of the activities service
        #[arg(short = 's', long, default_value = DEFAULT_SERVER)]
        server: String,
    },

    /// Validate an activity catalog and print it
    Catalog {
        /// Path to an activity catalog (defaults to the built-in catalog)
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match &cli.command {
        Command::Serve { config, addr } => {
            let cfg = config::resolve_config(config.as_deref())?;
            let addr = addr.clone().unwrap_or_else(|| cfg.server.addr.clone());
            web::serve(cfg, &addr).await?;
        }
        Command::List { server } => {
            commands::run_list(server, cli.verbose).await?;
        }
        Command::Signup {
            activity,
            email,
            server,
        } => {
            commands::run_signup(server, activity, email).await?;
        }
        Command::Unregister {
            activity,
            email,
            server,
        } => {
            commands::run_unregister(server, activity, email).await?;
        }
        Command::Catalog { config } => {
            commands::run_catalog(config.as_deref())?;
        }
    }

    Ok(())
}
