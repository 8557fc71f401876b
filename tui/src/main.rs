use catalog_tui::Cli;
use catalog_tui::run_main;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_main(cli)
}
