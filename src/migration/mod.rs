mod direction;
mod error;
mod limit;
mod plan;
mod report;
mod runner;
mod source;

pub use direction::MigrationDirection;
pub use error::{MigrationError, MigrationErrorKind};
pub use limit::Limit;
pub use plan::SelectionPlan;
pub use report::Reporter;
pub use runner::{execute, load_plan, run, run_down, run_up, RunResult};
pub use source::read_entries;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};


/// A single directional migration file: `<prefix><label>.<up|down>.sql`.
/// The content is opaque statement text, read only when the migration is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MigrationFile {
    pub name: String,
    pub path: PathBuf,
}

impl MigrationFile {
    pub fn new(directory: &Path, name: String) -> Self {
        let path = directory.join(&name);
        MigrationFile { name, path }
    }

    pub fn load(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }
}
