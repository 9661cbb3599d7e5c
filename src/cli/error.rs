use crate::{db::EngineError, migration::MigrationError};

use std::error::Error;
use std::fmt;
use tracing::subscriber::SetGlobalDefaultError;


#[derive(Debug)]
pub struct StepwiseError {
    pub kind: StepwiseErrorKind
}

impl fmt::Display for StepwiseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepwiseError: {}", self.kind)
    }
}

impl Error for StepwiseError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum StepwiseErrorKind {
    Engine(EngineError),
    Migration(MigrationError),
    MissingConnectionString,
    SetGlobalDefault(SetGlobalDefaultError),
}

impl fmt::Display for StepwiseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(error) => write!(f, "{}", error.kind),
            Self::Migration(error) => write!(f, "{}", error.kind),
            Self::MissingConnectionString => write!(f, "No database connection string given: set --db or DB_CONNECTION_STRING"),
            Self::SetGlobalDefault(error) => write!(f, "Failed to set global default subscriber: {}", error),
        }
    }
}

impl Error for StepwiseErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Engine(source) => Some(source),
			Self::Migration(source) => Some(source),
			Self::SetGlobalDefault(source) => Some(source),
			_ => None,
		}
	}
}

impl From<EngineError> for StepwiseError {
    fn from(error: EngineError) -> Self {
        StepwiseError { kind: StepwiseErrorKind::Engine(error) }
    }
}

impl From<MigrationError> for StepwiseError {
    fn from(error: MigrationError) -> Self {
        StepwiseError { kind: StepwiseErrorKind::Migration(error) }
    }
}

impl From<SetGlobalDefaultError> for StepwiseError {
    fn from(error: SetGlobalDefaultError) -> Self {
        StepwiseError { kind: StepwiseErrorKind::SetGlobalDefault(error) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::EngineErrorKind, migration::MigrationErrorKind};
    use std::path::PathBuf;

    #[test]
    fn stepwise_error_display_formats_correctly() {
        let cases: Vec<(StepwiseErrorKind, &str)> = vec![
            (
                StepwiseErrorKind::Engine(EngineError { kind: EngineErrorKind::SQLX(sqlx::Error::PoolClosed) }),
                "closed",
            ),
            (
                StepwiseErrorKind::Migration(MigrationError {
                    kind: MigrationErrorKind::DirectoryEmpty(PathBuf::from("/tmp/m")),
                }),
                "Migration directory is empty",
            ),
            (StepwiseErrorKind::MissingConnectionString, "No database connection string"),
        ];

        for (kind, expect) in cases {
            let text = kind.to_string();
            assert!(
                text.contains(expect),
                "Expected `{}` in `{}`",
                expect,
                text
            );
        }
    }

    #[test]
    fn stepwise_error_from_conversions_work() {
        let engine_err = EngineError { kind: EngineErrorKind::SQLX(sqlx::Error::RowNotFound) };
        let migration_err = MigrationError { kind: MigrationErrorKind::InvalidLimit("x".into()) };

        let s1: StepwiseError = engine_err.into();
        let s2: StepwiseError = migration_err.into();

        assert!(matches!(s1.kind, StepwiseErrorKind::Engine(_)));
        assert!(matches!(s2.kind, StepwiseErrorKind::Migration(_)));
        assert!(s2.source().unwrap().source().is_some());
    }
}
