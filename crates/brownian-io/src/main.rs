use brownian_io::cli::{run, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
