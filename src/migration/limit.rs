use crate::migration::{MigrationError, MigrationErrorKind};

use std::fmt;
use std::str::FromStr;


/// Upper bound on the number of migrations applied in one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Limit {
    #[default]
    All,
    Count(usize),
}

impl Limit {
    /// Sentinel accepted in place of a count to mean "every migration".
    pub const ALL_SENTINEL: i64 = -1;

    pub fn from_num(num: i64) -> Result<Self, MigrationError> {
        match num {
            Self::ALL_SENTINEL => Ok(Self::All),
            n if n >= 0 => Ok(Self::Count(n as usize)),
            n => Err(MigrationError { kind: MigrationErrorKind::InvalidLimit(n.to_string()) }),
        }
    }

    /// Whether `applied` successful migrations exhaust this limit.
    pub fn reached(&self, applied: usize) -> bool {
        match self {
            Self::All => false,
            Self::Count(n) => applied >= *n,
        }
    }
}

impl FromStr for Limit {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let num = s.parse::<i64>()
            .map_err(|_| MigrationError { kind: MigrationErrorKind::InvalidLimit(s.to_string()) })?;
        Self::from_num(num)
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Count(n) => write!(f, "{n}"),
        }
    }
}
