use std::error::Error;
use std::fmt;


#[derive(Debug)]
#[non_exhaustive]
pub struct EngineError {
    pub kind: EngineErrorKind
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EngineError: {}", self.kind)
    }
}

impl Error for EngineError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(&self.kind)
	}
}

#[derive(Debug)]
pub enum EngineErrorKind {
    Connect { attempts: u32, source: sqlx::Error },
    SQLX(sqlx::Error),
    /// Any other store rejection, kept as the store reported it.
    Store(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect { attempts, source } => write!(f, "Failed to connect after {attempts} attempt(s): {source}"),
            Self::SQLX(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EngineErrorKind {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			Self::Connect { source, .. } => Some(source),
			Self::SQLX(source) => Some(source),
			Self::Store(source) => Some(&**source),
		}
	}
}

impl EngineError {
    /// Wrap an error raised by a store that is not backed by sqlx.
    pub fn store(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        EngineError { kind: EngineErrorKind::Store(error.into()) }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(error: sqlx::Error) -> Self {
        EngineError { kind: EngineErrorKind::SQLX(error) }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display_formats_correctly() {
        let cases: Vec<(EngineErrorKind, &str)> = vec![
            (EngineErrorKind::SQLX(sqlx::Error::RowNotFound), "no rows returned"),
            (
                EngineErrorKind::Connect { attempts: 3, source: sqlx::Error::PoolTimedOut },
                "Failed to connect after 3 attempt(s)",
            ),
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
    fn store_error_is_kept_verbatim() {
        let e = EngineError::store("duplicate key value violates unique constraint");

        assert!(matches!(e.kind, EngineErrorKind::Store(_)));
        assert_eq!(e.kind.to_string(), "duplicate key value violates unique constraint");
        assert_eq!(
            e.kind.source().unwrap().to_string(),
            "duplicate key value violates unique constraint"
        );
    }

    #[test]
    fn engine_error_from_sqlx() {
        let e: EngineError = sqlx::Error::RowNotFound.into();
        assert!(matches!(e.kind, EngineErrorKind::SQLX(_)));
        assert!(e.source().is_some());
    }
}
