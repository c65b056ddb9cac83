use agecalc::cli::{self, Cli};
use agecalc::logger;
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let now = cli.reference_now();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match cli::run(&cli, now, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(cli::exit_code(&e))
        }
    }
}
