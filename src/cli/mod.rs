//! CLI for the ingestion gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Ingest Gateway - submission ingestion with admission control and fan-out
#[derive(Parser)]
#[command(name = "ingest-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the ingestion API server
    Serve,
}
