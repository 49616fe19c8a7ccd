use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "chile-rut")]
#[command(about = "Validate and format Chilean RUT numbers")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Check one or more RUTs; exits with status 1 if any is invalid
    Validate {
        #[arg(required = true)]
        ruts: Vec<String>,

        /// Print one JSON object per RUT
        #[arg(long)]
        json: bool,
    },

    /// Print RUTs as XX.XXX.XXX-X
    Format {
        #[arg(required = true)]
        ruts: Vec<String>,
    },

    /// Compute the check digit for numeric bodies
    CheckDigit {
        #[arg(required = true)]
        bodies: Vec<String>,
    },

    /// Validate and format the tax_id column of a doctype,name,tax_id CSV
    Batch {
        #[arg(short, long)]
        input: String,

        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Round up flagged tax rows read from a JSON array
    RoundTaxes {
        #[arg(short, long)]
        input: String,
    },
}
