//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - initializes logging
//! - runs the SLCSP pipeline
//! - prints the summary/table
//! - writes the optional export

use clap::Parser;
use env_logger::Env;
use log::info;

use crate::cli::Cli;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `slcsp` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` is optional; it only feeds clap's env-backed defaults.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    init_logging(cli.verbose);

    let config = cli.run_config();
    let run = pipeline::run_slcsp(&config)?;

    if config.summary {
        println!(
            "{}",
            crate::report::format_run_summary(&run.inputs, &run.resolver, &run.counts)
        );
    }

    print!("{}", crate::report::render(&run.rows, config.format)?);

    if let Some(path) = &config.export {
        crate::io::export::write_results(path, &run.rows)?;
        info!("exported {} rows to {}", run.rows.len(), path.display());
    }

    Ok(())
}

/// Rewrite argv so the single-dash long flags `-zips` / `-plans` keep working.
///
/// clap would read `-zips` as `-z ips`. Rules:
/// - `-zips FILE`  -> `--zips FILE`  (also `-zips=FILE`)
/// - `-plans FILE` -> `--plans FILE` (also `-plans=FILE`)
/// - everything after `--` is left as-is
fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(argv.len());
    let mut passthrough = false;
    for arg in argv {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        let rewritten = ["zips", "plans"].iter().find_map(|name| {
            let rest = arg.strip_prefix('-')?.strip_prefix(*name)?;
            (rest.is_empty() || rest.starts_with('=')).then(|| format!("--{name}{rest}"))
        });
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // Logs go to stderr; stdout carries only the result table.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let args = rewrite_args(argv(&["slcsp", "slcsp.csv", "-zips", "z.csv", "-plans=p.csv"]));
        assert_eq!(args, argv(&["slcsp", "slcsp.csv", "--zips", "z.csv", "--plans=p.csv"]));

        let config = Cli::try_parse_from(args).unwrap().run_config();
        assert_eq!(config.zips_path, PathBuf::from("z.csv"));
        assert_eq!(config.plans_path, PathBuf::from("p.csv"));
    }

    #[test]
    fn short_flags_and_lookalikes_are_untouched() {
        let original = argv(&["slcsp", "slcsp.csv", "-z", "z.csv", "-zipsx", "--", "-plans"]);
        assert_eq!(rewrite_args(original.clone()), original);
    }
}
