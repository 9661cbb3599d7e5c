use crate::db::Store;
use crate::migration::{
    read_entries, Limit, MigrationDirection, MigrationError, MigrationErrorKind, MigrationFile,
    Reporter, SelectionPlan,
};

use std::io::Write;
use std::path::Path;


/// Outcome of one run: the migrations applied, in order, and the error that halted it.
#[derive(Debug)]
pub struct RunResult {
    pub direction: MigrationDirection,
    /// Size of the selection plan before the limit was applied.
    pub total: usize,
    pub applied: Vec<String>,
    pub error: Option<MigrationError>,
}

impl RunResult {
    fn failed(direction: MigrationDirection, error: MigrationError) -> Self {
        RunResult { direction, total: 0, applied: Vec::new(), error: Some(error) }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<String>, MigrationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.applied),
        }
    }
}


/// Read `directory` and select the migrations of `direction`, in traversal order.
pub fn load_plan(
    directory: &Path,
    direction: MigrationDirection,
) -> Result<SelectionPlan, MigrationError> {
    let entries = read_entries(directory)?;
    Ok(SelectionPlan::select(directory, entries, direction))
}

/// Apply the migrations of `plan` in order until `limit` of them succeeded.
///
/// The first failure halts the run: nothing after it is loaded or reported,
/// and nothing already applied is reverted.
pub async fn execute<S: Store + ?Sized>(
    plan: &SelectionPlan,
    limit: Limit,
    store: &mut S,
    sink: &mut dyn Write,
) -> RunResult {
    let direction = plan.direction();
    let total = plan.len();
    let mut reporter = Reporter::new(sink, total);
    let mut applied = Vec::new();

    for (index, file) in plan.iter().enumerate() {
        if limit.reached(applied.len()) {
            tracing::debug!("Limit of {limit} reached, {} migration(s) left untouched", total - index);
            break;
        }

        tracing::info!("{} {}...", direction.verb(), file.name);
        if let Err(error) = step(&mut reporter, store, file, index + 1, &mut applied).await {
            tracing::error!("{} {} failed: {error}", direction.noun(), file.name);
            return RunResult { direction, total, applied, error: Some(error) };
        }
    }

    tracing::info!("{} complete: {} of {total} applied", direction.noun(), applied.len());
    RunResult { direction, total, applied, error: None }
}

async fn step<S: Store + ?Sized>(
    reporter: &mut Reporter<'_>,
    store: &mut S,
    file: &MigrationFile,
    position: usize,
    applied: &mut Vec<String>,
) -> Result<(), MigrationError> {
    let report = |source: std::io::Error| MigrationError { kind: MigrationErrorKind::Report(source) };

    reporter.attempt(position, &file.name).map_err(report)?;

    let outcome = match file.load() {
        Ok(statement) => {
            tracing::trace!("Loaded {} ({} bytes)", file.name, statement.len());
            store
                .apply_migration(&file.name, &statement)
                .await
                .map_err(|source| MigrationError {
                    kind: MigrationErrorKind::Apply { name: file.name.clone(), source }
                })
        }
        Err(source) => Err(MigrationError {
            kind: MigrationErrorKind::Read { name: file.name.clone(), path: file.path.clone(), source }
        }),
    };

    match outcome {
        Ok(()) => {
            // Recorded before narrating: the store has applied it even if the sink fails.
            applied.push(file.name.clone());
            reporter.success().map_err(report)
        }
        Err(error) => {
            if let Err(e) = reporter.failure(error.outcome()) {
                tracing::warn!("Failed to report failure of {}: {e}", file.name);
            }
            Err(error)
        }
    }
}

/// Select the migrations of `direction` in `directory` and apply up to `limit` of them.
pub async fn run<S: Store + ?Sized>(
    store: &mut S,
    directory: &Path,
    direction: MigrationDirection,
    limit: Limit,
    sink: &mut dyn Write,
) -> RunResult {
    tracing::info!("Loading migrations from {directory:?}");
    let plan = match load_plan(directory, direction) {
        Ok(plan) => plan,
        Err(error) => return RunResult::failed(direction, error),
    };

    execute(&plan, limit, store, sink).await
}

/// Apply up to `limit` up-migrations in ascending order.
pub async fn run_up<S: Store + ?Sized>(
    store: &mut S,
    directory: &Path,
    limit: Limit,
    sink: &mut dyn Write,
) -> RunResult {
    run(store, directory, MigrationDirection::Up, limit, sink).await
}

/// Apply up to `limit` down-migrations in descending order.
pub async fn run_down<S: Store + ?Sized>(
    store: &mut S,
    directory: &Path,
    limit: Limit,
    sink: &mut dyn Write,
) -> RunResult {
    run(store, directory, MigrationDirection::Down, limit, sink).await
}
