mod aggregator;
mod args;
mod lookup;
mod output;
mod parsers;
mod records;
mod tests;

use std::time::Instant;

use anyhow::Context;
use args::{Cli, ConfigFile};
use clap::Parser;
use log::{debug, error};

use crate::{aggregator::aggregate_flow_log, lookup::load_lookup_table, output::OutputWriter};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.config_file {
        Some(config_path) => ConfigFile::load(&config_path)?.output,
        None => cli.output,
    };

    let start = Instant::now();

    let lookup = load_lookup_table(&cli.lookup_file).with_context(|| {
        format!(
            "failed to load lookup table from {}",
            cli.lookup_file.display()
        )
    })?;

    let counts = aggregate_flow_log(&cli.flow_log_file, &lookup).with_context(|| {
        format!(
            "failed to process flow log {}",
            cli.flow_log_file.display()
        )
    })?;

    // Nothing is written until both inputs have been read in full.
    let mut output_writer = OutputWriter::new(&output)?;
    output_writer
        .write_counts(&counts)
        .context("failed to write report")?;
    output_writer
        .flush_and_close()
        .context("failed to flush report")?;

    debug!(
        "Duration: {:?} milliseconds",
        Instant::now().duration_since(start).as_millis()
    );
    Ok(())
}
