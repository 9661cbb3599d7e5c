use stepwise::cli::{self, output::{PlanData, RunData, StepwiseErrorJson, StepwiseOutput, StepwiseStatus}};
use stepwise::db::RetryPolicy;
use stepwise::{commands, ux, MigrationDirection};

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;


async fn run_command(args: cli::Cli) -> anyhow::Result<StepwiseOutput<serde_json::Value>> {
    let command_name = args.command.to_string();
    let db_connection_string = args.db_connection_string.as_deref();
    let migration_directory = Path::new(&args.migration_directory);
    let policy = RetryPolicy::new(args.connect_attempts, Duration::from_millis(args.connect_delay_ms));

    // The transcript streams to stdout, or is captured for the JSON document.
    let mut captured: Vec<u8> = Vec::new();
    let mut stdout = io::stdout();
    let sink: &mut dyn Write = if args.json { &mut captured } else { &mut stdout };

    let (direction, flags) = match args.command {
        cli::Commands::Peck { } => {
            return Ok(match commands::peck(db_connection_string, &policy).await {
                Ok(()) => StepwiseOutput::success(command_name, None),
                Err(e) => StepwiseOutput::failure(command_name, None, StepwiseErrorJson::from(&e)),
            });
        }
        cli::Commands::Up { args: flags } => (MigrationDirection::Up, flags),
        cli::Commands::Down { args: flags } => (MigrationDirection::Down, flags),
    };

    if flags.plan {
        return Ok(match commands::plan(migration_directory, direction, flags.num, sink) {
            Ok(plan) => {
                let data = serde_json::to_value(PlanData::new(&plan, flags.num))?;
                StepwiseOutput::success(command_name, Some(data))
            }
            Err(e) => StepwiseOutput::failure(command_name, None, StepwiseErrorJson::from(&e)),
        });
    }

    let result = commands::migrate(
        db_connection_string,
        &policy,
        migration_directory,
        direction,
        flags.num,
        sink,
    ).await;

    let output = match result {
        Ok(run) => {
            let data = serde_json::to_value(RunData::new(&run, &captured))?;
            match &run.error {
                None => StepwiseOutput::success(command_name, Some(data)),
                Some(e) => StepwiseOutput::failure(command_name, Some(data), StepwiseErrorJson::from(e)),
            }
        }
        Err(e) => StepwiseOutput::failure(command_name, None, StepwiseErrorJson::from(&e)),
    };

    Ok(output)
}


/// Entry point for the Stepwise CLI tool.
///
/// Subcommands:
/// - `peck`: Verify connectivity to the database.
/// - `up`: Apply `*.up.sql` files in ascending order, optionally only `--num` of them.
/// - `down`: Apply `*.down.sql` files in descending order, optionally only `--num` of them.
///
/// `--plan` lists the selection without connecting. Exits with status 1 on any error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: cli::Cli = cli::Cli::parse();
    let json = args.json;

    ux::setup_logging(args.verbose, args.quiet, json)
        .context("Failed to set up logging")?;

    let output = run_command(args).await?;

    if json {
        let document = serde_json::to_string_pretty(&output)
            .context("Failed to serialize output")?;
        println!("{document}");
    } else {
        ux::render_human_output(&output);
    }

    if output.status == StepwiseStatus::Error {
        std::process::exit(1);
    }

    Ok(())
}
