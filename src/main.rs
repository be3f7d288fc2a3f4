//! CLI entry point for the image partitioning toolkit

use clap::Parser;
use imgproc::io::cli::Cli;

fn main() -> imgproc::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    cli.run()
}
