mod cli;
mod docx;
mod engine;
mod model;
mod reference;
mod storage;
mod templates;
mod text_summary;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    cli::run(args)
}
