//! tc-release CLI entry point.

use clap::Parser;
use std::process::ExitCode;

use tc_release::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let request = match cli.to_request() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::from(2);
        }
    };

    match tc_release::release::run(&request) {
        Ok(report) => {
            if cli.json {
                match report.to_json() {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error: {e:#}");
                        return ExitCode::from(1);
                    }
                }
            } else {
                report.print_terminal(cli.verbose > 0);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
