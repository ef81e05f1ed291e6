use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "linecfg")]
#[command(about = "Inspect and edit flat and sectioned config files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Treat the file as sectioned ([group] headers) instead of flat
    #[arg(short, long, global = true)]
    pub sectioned: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value of a key
    Get {
        file: PathBuf,
        key: String,

        /// Section holding the key (implies --sectioned)
        #[arg(long)]
        section: Option<String>,
    },

    /// Insert or update a key and save the file
    Set {
        file: PathBuf,
        key: String,
        value: String,

        /// Section holding the key, created if missing (implies --sectioned)
        #[arg(long)]
        section: Option<String>,
    },

    /// Remove a key and save the file
    Unset {
        file: PathBuf,
        key: String,

        /// Section holding the key (implies --sectioned)
        #[arg(long)]
        section: Option<String>,
    },

    /// List keys and values
    #[command(alias = "ls")]
    List { file: PathBuf },

    /// Print the file contents as JSON
    Export { file: PathBuf },
}
