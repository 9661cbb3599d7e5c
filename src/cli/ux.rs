use crate::cli::error::StepwiseError;
use crate::cli::output::{StepwiseOutput, StepwiseStatus};
use crate::migration::{Limit, SelectionPlan};

use serde::Serialize;
use std::fmt::Write as _;
use std::io::{self, Write};


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), StepwiseError> {
    if json {
        // Mute all logging if JSON output is enabled
        tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default())?;
        return Ok(());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    // Logs go to stderr: stdout carries the progress transcript.
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}


/// Log the migrations a run will attempt, marking those left out by `limit`.
pub fn show_plan(plan: &SelectionPlan, limit: Limit) {
    let operation = plan.direction().noun();
    let mut output = format!("Generating {} plan...\n--- {} plan ---", plan.direction(), operation);

    for (index, file) in plan.iter().enumerate() {
        let skipped = if limit.reached(index) { " (skipped: limit reached)" } else { "" };
        // Writing into a String cannot fail
        let _ = write!(&mut output, "\n-> {}/{}: {}{}", index + 1, plan.len(), file.name, skipped);
    }

    if plan.is_empty() {
        output.push_str("\n(nothing to apply)");
    }

    tracing::info!("{}\n--- End of {} plan ---", output, operation.to_lowercase());
}

/// Human-readable listing of a `--plan` run.
pub fn write_plan(plan: &SelectionPlan, limit: Limit, sink: &mut dyn Write) -> io::Result<()> {
    let operation = plan.direction().noun();
    let mut selected = 0;

    for (index, file) in plan.iter().enumerate() {
        if limit.reached(index) {
            break;
        }
        writeln!(sink, "{} {}/{}: {}", operation, index + 1, plan.len(), file.name)?;
        selected += 1;
    }

    writeln!(sink, "{selected} of {} migration(s) selected (limit: {limit})", plan.len())?;
    sink.flush()
}

pub fn render_human_output<T: Serialize>(output: &StepwiseOutput<T>) {
    match (&output.status, &output.error) {
        (StepwiseStatus::Error, Some(error)) => eprintln!("Error: {}", error.message()),
        (StepwiseStatus::Error, None) => eprintln!("Error: '{}' failed", output.command),
        (StepwiseStatus::Success, _) => tracing::info!("'{}' completed 🐦", output.command),
    }
}
