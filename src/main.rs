use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use clause_check::driver::{check_directory, write_report};
use clause_check::DriverError;

/// Checks numbered clause files (1.txt, 2.txt, ...) and writes one report.
#[derive(Parser)]
#[command(name = "clause-check", version, about = "Syntax checker for Prolog-style clause files")]
struct Cli {
    /// Directory holding 1.txt, 2.txt, ...
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Where to write the aggregate report
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Print the report instead of writing it
    #[arg(long)]
    stdout: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, wins over -v.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), DriverError> {
    let summary = check_directory(&cli.dir)?;
    log::info!("checked {} file(s)", summary.files);

    if cli.stdout {
        print!("{}", summary.output);
        Ok(())
    } else {
        write_report(&cli.output, &summary.output)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
