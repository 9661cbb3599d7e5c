use super::{EngineError, EngineErrorKind, RetryPolicy, Store};

use sqlx::postgres::{PgPool, PgPoolOptions};


pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a single-connection pool, retrying with `policy` while the server is unreachable.
    pub async fn connect(conn_str: &str, policy: &RetryPolicy) -> Result<Self, EngineError> {
        let pool = policy
            .run("Connecting to database", || {
                PgPoolOptions::new()
                    .max_connections(1)
                    .connect(conn_str)
            })
            .await
            .map_err(|(attempts, source)| EngineError {
                kind: EngineErrorKind::Connect { attempts, source },
            })?;

        Ok(PostgresStore { pool })
    }

    pub async fn peck(&self) -> Result<(), EngineError> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn close(self) {
        tracing::debug!("Closing database connection...");
        self.pool.close().await;
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    /// Statement text may hold several statements; it is sent as-is.
    async fn apply_migration(&mut self, name: &str, statement: &str) -> Result<(), EngineError> {
        tracing::debug!("Executing '{name}'");

        sqlx::raw_sql(statement)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
