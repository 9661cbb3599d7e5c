mod error;
mod postgres;
mod retry;

pub use error::{EngineError, EngineErrorKind};
pub use postgres::PostgresStore;
pub use retry::RetryPolicy;


/// The database side of a run: applies one migration's statement text.
///
/// Implementations own their connection; the engine only borrows a store for the
/// duration of a run and awaits each call before the next. Errors are not interpreted,
/// any error halts the run.
#[async_trait::async_trait]
pub trait Store: Send {
    async fn apply_migration(&mut self, name: &str, statement: &str) -> Result<(), EngineError>;
}
