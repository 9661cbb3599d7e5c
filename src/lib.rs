pub mod cli;
pub mod db;
pub mod migration;

#[cfg(test)]
mod test_utils;

pub use cli::{commands, ux};
pub use migration::{Limit, MigrationDirection, RunResult};
