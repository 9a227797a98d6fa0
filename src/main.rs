//! daddy - check availability of domains listed in a TXT file at godaddy.com

use clap::Parser;
use std::process;

use daddy::{
    batch::{check_and_write, output_conflict, WriteOutcome},
    cli::{prompt_conflict, Cli},
    display::{batch_progress_bar, update_progress, ProgressSlot},
    domain::{words, DomainChecker},
    logging, DaddyError, OutputMode, Result,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let slot = ProgressSlot::new();
    logging::init_cli_logger(cli.verbose, slot.clone());

    if let Err(e) = run(cli, &slot).await {
        slot.clear();
        eprintln!("{}", e.user_message());
        process::exit(e.exit_code());
    }
}

/// Main daddy workflow
async fn run(cli: Cli, slot: &ProgressSlot) -> Result<()> {
    // Input problems are reported before anything else happens
    let candidates = words::load_candidates(&cli.filename)?;
    let config = cli.into_run_config()?;

    let mode = if output_conflict(&config.output_path)? {
        prompt_conflict(&config.output_path)?
    } else {
        OutputMode::Create
    };

    let checker = DomainChecker::new(&config)?;
    tracing::debug!(
        candidates = candidates.len(),
        tld = %config.tld,
        output = %config.output_path.display(),
        "Starting batch"
    );

    let bar = batch_progress_bar(candidates.len());
    slot.set(bar.clone());

    let outcome = tokio::select! {
        result = check_and_write(checker, &config, &candidates, mode, |p| update_progress(&bar, p)) => result,
        _ = tokio::signal::ctrl_c() => Err(DaddyError::Interrupted),
    };

    slot.clear();
    match outcome {
        Ok(WriteOutcome::NothingAvailable) => {
            bar.finish();
            println!(
                "There are no available domain names in {}.",
                config.input_path.display()
            );
        }
        Ok(WriteOutcome::Written(count)) => {
            bar.finish();
            tracing::info!(
                count,
                output = %config.output_path.display(),
                "Saved available domains"
            );
        }
        Err(e) => {
            bar.abandon();
            return Err(e);
        }
    }

    Ok(())
}
