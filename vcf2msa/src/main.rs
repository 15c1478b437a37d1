use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use vcf2msa::project;

fn main() -> Result<()> {
    let cli = project::Cli::parse();

    TermLogger::init(
        LevelFilter::Info,
        Default::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    project::cli(cli)
}
