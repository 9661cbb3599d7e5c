// {
//   "command": "up",
//   "status": "error",
//   "data": {
//     "direction": "up",
//     "total": 3,
//     "applied": ["001_init.up.sql"],
//     "transcript": [
//       "applying 1/3: 001_init.up.sql ...SUCCESS",
//       "applying 2/3: 002_users.up.sql ...FAILURE: ..."
//     ]
//   },
//   "error": {"type": "apply", "message": "..."}
// }
use crate::cli::error::{StepwiseError, StepwiseErrorKind};
use crate::migration::{Limit, MigrationDirection, MigrationError, MigrationErrorKind, RunResult, SelectionPlan};
use serde::Serialize;


#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "message", rename_all = "snake_case")]
pub enum StepwiseErrorJson {
    Apply(String),
    DirectoryEmpty(String),
    DirectoryNotFound(String),
    DirectoryRead(String),
    Engine(String),
    InvalidLimit(String),
    Logging(String),
    MissingConnectionString(String),
    Read(String),
    Report(String),
}

impl StepwiseErrorJson {
    pub fn message(&self) -> &str {
        match self {
            Self::Apply(m)
            | Self::DirectoryEmpty(m)
            | Self::DirectoryNotFound(m)
            | Self::DirectoryRead(m)
            | Self::Engine(m)
            | Self::InvalidLimit(m)
            | Self::Logging(m)
            | Self::MissingConnectionString(m)
            | Self::Read(m)
            | Self::Report(m) => m,
        }
    }
}

impl From<&MigrationError> for StepwiseErrorJson {
    fn from(e: &MigrationError) -> Self {
        let message = e.kind.to_string();

        match &e.kind {
            MigrationErrorKind::Apply { .. } => Self::Apply(message),
            MigrationErrorKind::DirectoryEmpty(_) => Self::DirectoryEmpty(message),
            MigrationErrorKind::DirectoryNotFound(_) => Self::DirectoryNotFound(message),
            MigrationErrorKind::DirectoryRead { .. } => Self::DirectoryRead(message),
            MigrationErrorKind::InvalidLimit(_) => Self::InvalidLimit(message),
            MigrationErrorKind::Read { .. } => Self::Read(message),
            MigrationErrorKind::Report(_) => Self::Report(message),
        }
    }
}

impl From<&StepwiseError> for StepwiseErrorJson {
    fn from(e: &StepwiseError) -> Self {
        let message = e.kind.to_string();

        match &e.kind {
            StepwiseErrorKind::Engine(_) => Self::Engine(message),
            StepwiseErrorKind::Migration(error) => Self::from(error),
            StepwiseErrorKind::MissingConnectionString => Self::MissingConnectionString(message),
            StepwiseErrorKind::SetGlobalDefault(_) => Self::Logging(message),
        }
    }
}


#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepwiseStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct StepwiseOutput<T: Serialize> {
    pub command: String,
    pub status: StepwiseStatus,
    pub data: Option<T>,
    pub error: Option<StepwiseErrorJson>,
}

impl<T: Serialize> StepwiseOutput<T> {
    pub fn success(command: String, data: Option<T>) -> Self {
        StepwiseOutput { command, status: StepwiseStatus::Success, data, error: None }
    }

    pub fn failure(command: String, data: Option<T>, error: StepwiseErrorJson) -> Self {
        StepwiseOutput { command, status: StepwiseStatus::Error, data, error: Some(error) }
    }
}


/// Migrations a `--plan` run would apply.
#[derive(Debug, Serialize)]
pub struct PlanData {
    pub direction: MigrationDirection,
    pub limit: String,
    pub total: usize,
    pub selected: Vec<String>,
}

impl PlanData {
    pub fn new(plan: &SelectionPlan, limit: Limit) -> Self {
        let selected = plan
            .names()
            .into_iter()
            .take(match limit {
                Limit::All => plan.len(),
                Limit::Count(n) => n,
            })
            .map(str::to_string)
            .collect();

        PlanData { direction: plan.direction(), limit: limit.to_string(), total: plan.len(), selected }
    }
}

#[derive(Debug, Serialize)]
pub struct RunData {
    pub direction: MigrationDirection,
    pub total: usize,
    pub applied: Vec<String>,
    pub transcript: Vec<String>,
}

impl RunData {
    pub fn new(result: &RunResult, transcript: &[u8]) -> Self {
        RunData {
            direction: result.direction,
            total: result.total,
            applied: result.applied.clone(),
            transcript: String::from_utf8_lossy(transcript).lines().map(str::to_string).collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn error_serializes_with_type_and_message() {
        let err = StepwiseError {
            kind: StepwiseErrorKind::Migration(MigrationError {
                kind: MigrationErrorKind::DirectoryNotFound(PathBuf::from("missing")),
            }),
        };
        let json = StepwiseErrorJson::from(&err);
        let s = serde_json::to_string(&json).unwrap();
        assert_eq!(
            s,
            r#"{"type":"directory_not_found","message":"Migration directory does not exist or is not a directory: 'missing'"}"#
        );
    }

    #[test]
    fn output_serializes_status_in_snake_case() {
        let output: StepwiseOutput<()> = StepwiseOutput::success("peck".into(), None);
        let s = serde_json::to_string(&output).unwrap();
        assert_eq!(s, r#"{"command":"peck","status":"success","data":null,"error":null}"#);
    }

    #[test]
    fn plan_data_is_bounded_by_limit() {
        let entries = ["001_a.up.sql", "002_b.up.sql", "003_c.up.sql"].map(String::from);
        let plan = SelectionPlan::select(std::path::Path::new("m"), entries, MigrationDirection::Up);

        let data = PlanData::new(&plan, Limit::Count(2));
        assert_eq!(data.total, 3);
        assert_eq!(data.selected, vec!["001_a.up.sql", "002_b.up.sql"]);
        assert_eq!(data.limit, "2");
    }

    #[test]
    fn run_data_splits_transcript_lines() {
        let result = RunResult {
            direction: MigrationDirection::Up,
            total: 2,
            applied: vec!["001_a.up.sql".into()],
            error: None,
        };
        let data = RunData::new(&result, b"applying 1/2: 001_a.up.sql ...SUCCESS\n");
        assert_eq!(data.transcript, vec!["applying 1/2: 001_a.up.sql ...SUCCESS"]);
    }
}
