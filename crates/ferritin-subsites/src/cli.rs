use super::commands;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare designed-molecule fingerprints against the resolved inhibitor.
    Compare {
        /// Fingerprint table of the resolved inhibitor (csv, tsv or parquet)
        #[arg(long, required = true)]
        resolved: PathBuf,

        /// Fingerprint table of the designed molecules, one row per molecule
        #[arg(long, required = true)]
        designed: PathBuf,

        /// SDF file supplying designed-molecule names
        #[arg(long)]
        designed_sdf: Option<PathBuf>,

        /// Output path without extension; the report is written to `<prefix>.csv`
        #[arg(long, default_value = "comparison")]
        output_prefix: String,

        /// JSON file with interaction keywords and subsite definitions
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Compare {
                resolved,
                designed,
                designed_sdf,
                output_prefix,
                config,
            } => commands::compare::execute(commands::compare::CompareArgs {
                resolved,
                designed,
                designed_sdf,
                output_prefix,
                config,
            }),
        }
    }
}
