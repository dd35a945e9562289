use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::{MbgError, Result};
use crate::interface::parse_portion;
use crate::models::DEFAULT_PORTION_GRAMS;

/// MBG menu validator: checks a school-meal menu against the nutrition standard for a student group.
#[derive(Parser, Debug)]
#[command(name = "mbg_menu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory with reference CSV tables (falls back to $MBG_DATA_DIR, then built-in tables).
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Show debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Build and validate menus interactively.
    #[default]
    Interactive,

    /// Validate one menu from the command line.
    Validate {
        /// Student age in years.
        #[arg(long, conflicts_with = "class", required_unless_present = "class")]
        age: Option<u8>,

        /// Class label, e.g. "SD Kelas VI" or "grade 8".
        #[arg(long)]
        class: Option<String>,

        /// Gender: male, female or all.
        #[arg(long, default_value = "all")]
        gender: String,

        /// Menu item as NAME or NAME:GRAMS (repeatable).
        #[arg(long = "item", value_name = "NAME[:GRAMS]", required = true)]
        items: Vec<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List foods in the reference tables.
    Foods,

    /// List standard groups and their thresholds.
    Groups,
}

/// Parse a `NAME[:GRAMS]` menu item.
pub fn parse_item(raw: &str) -> Result<(String, u32)> {
    let (name, grams) = match raw.rsplit_once(':') {
        Some((name, grams)) => (name, parse_portion(grams)?),
        None => (raw, DEFAULT_PORTION_GRAMS),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(MbgError::InvalidInput(format!("menu item '{}' has no name", raw)));
    }
    Ok((name.to_string(), grams))
}
