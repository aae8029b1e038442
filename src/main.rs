use clap::Parser;
use tickerscan::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
