#[macro_use]
extern crate log;

use clap::Parser;
use rusty_nn_fixtures::*;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Check the quantized SUB conformance fixtures against the reference evaluator",
    long_about = None
)]
struct Cli {
    /// Only consider fixtures whose name contains this substring.
    #[arg(long)]
    filter: Option<String>,
    /// Print the names of the selected fixtures and exit.
    #[arg(long)]
    list: bool,
    /// Print the operands and operations of a single fixture and exit.
    #[arg(long, value_name = "NAME")]
    dump: Option<String>,
}

/// Tally of a verification run.
#[derive(Debug, Default)]
struct Summary {
    passed: usize,
    skipped: usize,
    failed: Vec<String>,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(true) => info!("Exited great."),
        Ok(false) => process::exit(1),
        Err(err) => {
            error!("Exited with error: {}.", err);
            process::exit(2);
        }
    }
}

/// Returns whether every selected fixture passed or was skipped.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let registry = create_registry()?;

    if let Some(name) = cli.dump {
        let model = registry.require(&name)?;
        print!("{}", describe_model(&name, model));
        return Ok(true);
    }

    let pattern = cli.filter.unwrap_or_default();
    if cli.list {
        for (name, _) in registry.filter(&pattern) {
            println!("{}", name);
        }
        return Ok(true);
    }

    let start_time = Instant::now();
    let mut summary = Summary::default();
    for (name, model) in registry.filter(&pattern) {
        match check_model(model) {
            Ok(Verdict::Passed) => {
                debug!("{}: passed", name);
                summary.passed += 1;
            }
            Ok(Verdict::Skipped(reason)) => {
                info!("{}: skipped, {}", name, reason);
                summary.skipped += 1;
            }
            Err(err) => {
                warn!("{}: failed, {}", name, err);
                summary.failed.push(name.to_owned());
            }
        }
    }
    info!(
        "Checked fixtures in {} ms.",
        duration_between(start_time, Instant::now())
    );

    println!(
        "{} passed, {} skipped, {} failed",
        summary.passed,
        summary.skipped,
        summary.failed.len()
    );
    for name in &summary.failed {
        println!("  FAILED {}", name);
    }
    Ok(summary.failed.is_empty())
}
