//! Command-line parsing for the SLCSP resolver.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! resolution code. Everything here is converted into a plain `RunConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::domain::{OutputFormat, RunConfig};

/// Top-level CLI.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "slcsp",
    version,
    about = "Find the second lowest cost silver plan (SLCSP) for a list of zip codes"
)]
pub struct Cli {
    /// CSV of zip codes that need an SLCSP (`zipcode,rate`; incoming rates are ignored).
    #[arg(value_name = "SLCSP_CSV")]
    pub slcsp_file: PathBuf,

    /// CSV with geographical information (`zipcode,state,county_code,name,rate_area`).
    #[arg(short = 'z', long = "zips", env = "SLCSP_ZIPS", default_value = "zips.csv")]
    pub zips: PathBuf,

    /// CSV with health plan information (`plan_id,state,metal_level,rate,rate_area`).
    #[arg(short = 'p', long = "plans", env = "SLCSP_PLANS", default_value = "plans.csv")]
    pub plans: PathBuf,

    /// Output format for stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print a run summary (input sizes, join stats, outcome breakdown) before the table.
    #[arg(long)]
    pub summary: bool,

    /// Also write results to a file (`.json` for JSON, anything else for CSV).
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (`-v` info, `-vv` debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            slcsp_path: self.slcsp_file.clone(),
            zips_path: self.zips.clone(),
            plans_path: self.plans.clone(),
            format: self.format,
            summary: self.summary,
            export: self.export.clone(),
        }
    }
}
