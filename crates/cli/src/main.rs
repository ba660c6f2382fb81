use std::io;

use clap::Parser;
use sim_check_core::check_paths;

mod args;
mod json;
mod text;

use args::Args;
use json::{JsonCheckStats, map_report, write_json};
use text::{format_check_stats, format_pairs, is_incomplete};

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(args.log_level())
        .init();

    match run(&args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> io::Result<i32> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| io::Error::other(format!("thread pool: {e}")))?;
    }

    let options = args.check_options();
    let outcome = check_paths(&args.paths, &options).map_err(io::Error::other)?;
    let stats = outcome.stats;

    if args.json {
        let report = map_report(outcome.report);
        if args.stats {
            write_json(&serde_json::json!({
                "report": report,
                "checkStats": JsonCheckStats::from(stats.clone()),
            }))?;
        } else {
            write_json(&report)?;
        }
    } else {
        print!("{}", format_pairs(&outcome.report));
        if args.stats {
            eprint!("{}", format_check_stats(&stats));
        }
    }

    if args.strict && is_incomplete(&stats) {
        if !args.stats {
            eprint!("{}", format_check_stats(&stats));
        }
        return Ok(1);
    }

    Ok(0)
}
