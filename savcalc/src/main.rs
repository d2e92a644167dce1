// src/main.rs
use anyhow::Result;
use clap::Parser;
use savcalc::{Args, logging, run};

fn main() -> Result<()> {
    logging::init()?;
    let args = Args::parse();
    run(args)
}
