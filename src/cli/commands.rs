use crate::cli::error::{StepwiseError, StepwiseErrorKind};
use crate::db::{PostgresStore, RetryPolicy};
use crate::migration::{
    self, Limit, MigrationDirection, MigrationError, MigrationErrorKind, RunResult, SelectionPlan,
};
use crate::ux;

use std::io::Write;
use std::path::Path;


fn require_connection_string(db_connection_string: Option<&str>) -> Result<&str, StepwiseError> {
    db_connection_string.ok_or_else(|| StepwiseError { kind: StepwiseErrorKind::MissingConnectionString })
}

/// Checks that the database is reachable.
pub async fn peck(
    db_connection_string: Option<&str>,
    policy: &RetryPolicy,
) -> Result<(), StepwiseError> {
    let conn_str = require_connection_string(db_connection_string)?;

    tracing::info!("Pecking database...");
    let store = PostgresStore::connect(conn_str, policy).await?;
    let result = store.peck().await;
    store.close().await;
    result?;
    tracing::info!("Pecking successful 🐦");

    Ok(())
}

/// Builds the selection plan and lists it without touching the database.
pub fn plan(
    migration_dir: &Path,
    direction: MigrationDirection,
    limit: Limit,
    sink: &mut dyn Write,
) -> Result<SelectionPlan, StepwiseError> {
    tracing::info!("Loading migrations from {migration_dir:?}");
    let plan = migration::load_plan(migration_dir, direction)?;

    ux::write_plan(&plan, limit, sink)
        .map_err(|e| MigrationError { kind: MigrationErrorKind::Report(e) })?;
    tracing::info!("Planning complete - no migrations executed 🐦");

    Ok(plan)
}

/// Applies up to `limit` migrations of `direction`, narrating into `sink`.
///
/// The directory is read before connecting, so directory errors never open a connection.
/// Errors raised while applying are carried by the returned `RunResult`.
pub async fn migrate(
    db_connection_string: Option<&str>,
    policy: &RetryPolicy,
    migration_dir: &Path,
    direction: MigrationDirection,
    limit: Limit,
    sink: &mut dyn Write,
) -> Result<RunResult, StepwiseError> {
    let conn_str = require_connection_string(db_connection_string)?;

    tracing::info!("Loading migrations from {migration_dir:?}");
    let plan = migration::load_plan(migration_dir, direction)?;
    ux::show_plan(&plan, limit);

    let mut store = PostgresStore::connect(conn_str, policy).await?;
    let result = migration::execute(&plan, limit, &mut store, sink).await;
    store.close().await;

    if result.is_success() {
        tracing::info!("{} completed 🐦", direction.noun());
    } else {
        tracing::warn!(
            "{} halted after {} of {} migration(s); nothing was reverted",
            direction.noun(),
            result.applied.len(),
            result.total
        );
    }

    Ok(result)
}
