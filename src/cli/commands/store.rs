use clap::{Arg, ArgAction, Command};

pub const ARG_DSN: &str = "dsn";
pub const ARG_STORE_TIMEOUT: &str = "store-timeout";
pub const ARG_MAX_CONNECTIONS: &str = "max-connections";
pub const ARG_FAIL_FAST: &str = "fail-fast";

pub const DEFAULT_DSN: &str = "postgres://postgres@127.0.0.1:5432/test";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long("dsn")
                .help("Database connection string")
                .long_help(
                    "Database connection string. Use memory:// to keep records in process (nothing is persisted).",
                )
                .default_value(DEFAULT_DSN)
                .env("USER_SERVICE_DSN"),
        )
        .arg(
            Arg::new(ARG_STORE_TIMEOUT)
                .long("store-timeout")
                .help("Seconds to wait for a single store operation")
                .default_value("5")
                .env("USER_SERVICE_STORE_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_MAX_CONNECTIONS)
                .long("max-connections")
                .help("Maximum number of pooled database connections")
                .default_value("5")
                .env("USER_SERVICE_MAX_CONNECTIONS")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_FAIL_FAST)
                .long("fail-fast")
                .help("Exit if the database is unreachable at startup instead of retrying lazily")
                .env("USER_SERVICE_FAIL_FAST")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub dsn: String,
    pub timeout_seconds: u64,
    pub max_connections: u32,
    pub fail_fast: bool,
}

impl Options {
    /// # Errors
    /// Returns an error if a required argument is missing.
    pub fn parse(matches: &clap::ArgMatches) -> anyhow::Result<Self> {
        let dsn = matches
            .get_one::<String>(ARG_DSN)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_DSN}"))?;

        Ok(Self {
            dsn,
            timeout_seconds: matches
                .get_one::<u64>(ARG_STORE_TIMEOUT)
                .copied()
                .unwrap_or(5),
            max_connections: matches
                .get_one::<u32>(ARG_MAX_CONNECTIONS)
                .copied()
                .unwrap_or(5),
            fail_fast: matches.get_flag(ARG_FAIL_FAST),
        })
    }
}
