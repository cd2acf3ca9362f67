//! registry-check CLI entry point
//!
//! Pull-request validator for the Flow builders team registry.

use clap::Parser;
use flow_registry_check::checks::get_all_checks;
use flow_registry_check::cli::args::{Args, CheckArgs, Command};
use flow_registry_check::cli::output::get_formatter;
use flow_registry_check::version::get_build_info;
use flow_registry_check::{run_validation, ValidationResult, ValidatorConfig};

use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 3 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match &args.command {
        Some(Command::Version) => {
            println!("{}", get_build_info());
            ExitCode::SUCCESS
        }
        Some(Command::List) => {
            print_check_list();
            ExitCode::SUCCESS
        }
        Some(Command::Check(_)) | None => run_checks(args.check_args()),
    }
}

/// Logs go to stderr; RUST_LOG overrides the level implied by --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_check_list() {
    println!("Available checks:");
    println!();
    for check in get_all_checks() {
        println!("  {:<9}{:<28}{}", check.id, check.name, check.description);
    }
}

fn run_checks(args: &CheckArgs) -> ExitCode {
    init_tracing(args.verbose);

    let config = ValidatorConfig::from_args(args);

    let report = match run_validation(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("validation could not run: {}", e);
            eprintln!("Error running checks: {}", e);
            let failure =
                ValidationResult::from_errors(vec![format!("Validation could not run: {}", e)]);
            if let Err(e) = failure.write_to(&config.output_path) {
                eprintln!("Error writing result: {}", e);
            }
            return ExitCode::from(3);
        }
    };

    let result = report.result();
    if let Err(e) = result.write_to(&config.output_path) {
        eprintln!("Error writing result: {}", e);
        return ExitCode::from(3);
    }
    info!(output = %config.output_path.display(), "wrote validation result");

    let no_color = args.no_color || std::env::var_os("NO_COLOR").is_some();
    let formatter = get_formatter(args.format, no_color, args.verbose, args.quiet);
    println!("{}", formatter.format(&report));

    if result.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
