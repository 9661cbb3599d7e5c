use crate::db::EngineError;

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;


#[derive(Debug)]
#[non_exhaustive]
pub struct MigrationError {
    pub kind: MigrationErrorKind
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MigrationError: {}", self.kind)
    }
}

impl Error for MigrationError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum MigrationErrorKind {
    Apply { name: String, source: EngineError },
    DirectoryEmpty(PathBuf),
    DirectoryNotFound(PathBuf),
    DirectoryRead { path: PathBuf, source: io::Error },
    InvalidLimit(String),
    Read { name: String, path: PathBuf, source: io::Error },
    Report(io::Error),
}

impl fmt::Display for MigrationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply { name, source } => write!(f, "Failed to apply '{name}': {source}"),
            Self::DirectoryEmpty(path) => write!(f, "Migration directory is empty: '{}'", path.display()),
            Self::DirectoryNotFound(path) => write!(f, "Migration directory does not exist or is not a directory: '{}'", path.display()),
            Self::DirectoryRead { path, source } => write!(f, "Failed to read directory '{}': {source}", path.display()),
            Self::InvalidLimit(value) => write!(f, "Invalid migration count: '{value}' (expected a non-negative number, 'all' or -1)"),
            Self::Read { path, source, .. } => write!(f, "Failed to read file '{}': {source}", path.display()),
            Self::Report(source) => write!(f, "Failed to write progress: {source}"),
        }
    }
}

impl Error for MigrationErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Apply { source, .. } => Some(source),
			Self::DirectoryRead { source, .. } => Some(source),
			Self::Read { source, .. } => Some(source),
			Self::Report(source) => Some(source),
			_ => None,
		}
	}
}

impl MigrationError {
    /// The message shown after `...FAILURE:` in the progress transcript.
    /// Store rejections are shown verbatim; everything else uses the kind's message.
    pub fn outcome(&self) -> String {
        match &self.kind {
            MigrationErrorKind::Apply { source, .. } => source.to_string(),
            kind => kind.to_string(),
        }
    }

    /// The Store error that halted the run, if any.
    pub fn engine_error(&self) -> Option<&EngineError> {
        match &self.kind {
            MigrationErrorKind::Apply { source, .. } => Some(source),
            _ => None,
        }
    }
}
