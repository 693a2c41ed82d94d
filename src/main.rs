use clap::Parser;
use pricer::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
