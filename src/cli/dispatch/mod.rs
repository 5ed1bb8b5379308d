//! Map parsed CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{store, ARG_PORT};
use anyhow::Result;
use std::time::Duration;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(4000);

    let store_opts = store::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn: store_opts.dsn.into(),
        store_timeout: Duration::from_secs(store_opts.timeout_seconds),
        max_connections: store_opts.max_connections,
        fail_fast: store_opts.fail_fast,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn server_action_from_args() {
        temp_env::with_vars(
            [
                ("USER_SERVICE_DSN", None::<&str>),
                ("USER_SERVICE_PORT", None),
                ("USER_SERVICE_STORE_TIMEOUT", None),
                ("USER_SERVICE_FAIL_FAST", None),
            ],
            || {
                let matches = crate::cli::commands::new().get_matches_from(vec![
                    "user-service",
                    "--port",
                    "9000",
                    "--dsn",
                    "memory://",
                    "--store-timeout",
                    "3",
                ]);

                let result = handler(&matches);
                assert!(result.is_ok());
                if let Ok(Action::Server(args)) = result {
                    assert_eq!(args.port, 9000);
                    assert_eq!(args.dsn.expose_secret(), "memory://");
                    assert_eq!(args.store_timeout, Duration::from_secs(3));
                    assert!(!args.fail_fast);
                }
            },
        );
    }
}
