use crate::db::{EngineError, Store};

use std::collections::HashMap;
use std::fs;


/// In-memory store recording every application, keyed by migration name.
#[derive(Default)]
pub struct MemoryStore {
    /// Names in the order they were applied.
    pub calls: Vec<String>,
    pub counts: HashMap<String, usize>,
    /// Last statement text received per name.
    pub statements: HashMap<String, String>,
    fail_on: Option<String>,
}

impl MemoryStore {
    pub fn failing_on(name: &str) -> Self {
        MemoryStore { fail_on: Some(name.to_string()), ..Default::default() }
    }

    /// The error returned when `name` is rejected.
    pub fn rejection(name: &str) -> EngineError {
        EngineError::store(format!("rejected migration '{name}'"))
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn apply_migration(&mut self, name: &str, statement: &str) -> Result<(), EngineError> {
        self.calls.push(name.to_string());
        *self.counts.entry(name.to_string()).or_default() += 1;
        self.statements.insert(name.to_string(), statement.to_string());

        if self.fail_on.as_deref() == Some(name) {
            return Err(Self::rejection(name));
        }
        Ok(())
    }
}

/// Temporary migration directory holding `files` as (name, content) pairs.
pub fn migration_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}
