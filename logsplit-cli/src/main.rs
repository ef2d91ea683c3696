use clap::Parser;
use logsplit_cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
