pub mod commands;
pub mod error;
pub mod output;
pub mod ux;

use crate::migration::Limit;
pub use clap::{Parser, Subcommand};


#[derive(Parser)]
#[command(name = "stepwise", version, about = "Stepwise applies ordered .up.sql / .down.sql migration files from a directory, one at a time.")]
pub struct Cli {
    #[arg(
        long = "db",
        help = "Database connection string. Please follow your database's recommended format, e.g.:
    postgresql://<username>:<password>@<host>:<port>/<database>
Not required with --plan.\n",
        env = "DB_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub db_connection_string: Option<String>,

    #[arg(
        long = "dir",
        help = "Directory containing all migrations",
        env = "MIGRATION_DIRECTORY",
    )]
    pub migration_directory: String,

    #[arg(
        long,
        help = "Number of connection attempts before giving up.",
        default_value_t = 5,
        env = "CONNECT_ATTEMPTS",
    )]
    pub connect_attempts: u32,

    #[arg(
        long,
        help = "Delay in milliseconds before the first connection retry. Doubles on every further retry.",
        default_value_t = 200,
        env = "CONNECT_DELAY_MS",
    )]
    pub connect_delay_ms: u64,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser)]
pub struct StepwiseArgs {
    #[arg(
        long,
        allow_hyphen_values = true,
        default_value = "all",
        help = "Number of migrations to apply. 'all' or -1 applies every migration in the directory.",
    )]
    pub num: Limit,

    #[arg(
        long,
        help = "Show which migrations would be applied and skip execution.",
    )]
    pub plan: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test connection to the database.")]
    Peck {},

    #[command(about = "Apply '*.up.sql' migrations in ascending order.")]
    Up {
        #[command(flatten)]
        args: StepwiseArgs,
    },
    #[command(about = "Apply '*.down.sql' migrations in descending order.")]
    Down {
        #[command(flatten)]
        args: StepwiseArgs,
    },
}

impl std::fmt::Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Commands::Peck { .. } => "peck",
            Commands::Up { .. } => "up",
            Commands::Down { .. } => "down",
        };
        write!(f, "{name}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_down_with_count() {
        let cli = Cli::try_parse_from([
            "stepwise", "--dir", "migrations", "--db", "postgresql://localhost/db", "down", "--num", "2",
        ]).unwrap();

        assert_eq!(cli.migration_directory, "migrations");
        match cli.command {
            Commands::Down { args } => {
                assert_eq!(args.num, Limit::Count(2));
                assert!(!args.plan);
            }
            _ => panic!("expected down"),
        }
    }

    #[test]
    fn num_defaults_to_all_and_accepts_sentinel() {
        let cli = Cli::try_parse_from(["stepwise", "--dir", "m", "up"]).unwrap();
        assert!(matches!(cli.command, Commands::Up { args } if args.num == Limit::All));

        let cli = Cli::try_parse_from(["stepwise", "--dir", "m", "up", "--num", "-1", "--plan"]).unwrap();
        assert!(matches!(cli.command, Commands::Up { args } if args.num == Limit::All && args.plan));
    }

    #[test]
    fn rejects_invalid_num() {
        assert!(Cli::try_parse_from(["stepwise", "--dir", "m", "up", "--num", "-3"]).is_err());
        assert!(Cli::try_parse_from(["stepwise", "--dir", "m", "up", "--num", "few"]).is_err());
    }
}
