use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pokeapi-to-sqlite")]
#[command(version, about = "Convert PokeAPI csv data to a SQLite database")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert local csv files to a SQLite database
    Convert {
        /// Directory containing the pokeapi csv files
        csv_dir: PathBuf,

        /// Output SQLite database path (must not exist)
        output_db: PathBuf,
    },

    /// List all output table names
    ListTables,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
