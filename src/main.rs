use std::process::ExitCode;

use clap::Parser;
use envcheck::cli::{Arguments, ExitStatus, init_logging};

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.debug());

    match envcheck::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
