//! Command line and environment configuration.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal console for managing administrator accounts.
#[derive(Debug, Parser)]
#[command(name = "account-console", version, about)]
pub struct Cli {
    /// Base URL of the account backend, e.g. `http://localhost:8080/api`.
    #[arg(long = "base-url", env = "ACCOUNT_CONSOLE_BASEURL", value_name = "URL")]
    pub base_url: String,

    /// Timeout for each backend request, in seconds.
    #[arg(
        long = "timeout-secs",
        env = "ACCOUNT_CONSOLE_TIMEOUT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// File that receives log output (the terminal is taken by the UI).
    #[arg(
        long = "log-file",
        env = "ACCOUNT_CONSOLE_LOG",
        value_name = "PATH",
        default_value = "account-console.log"
    )]
    pub log_file: PathBuf,

    /// Log level filter; `RUST_LOG` takes precedence when set.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

/// Settings handed to the backend client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            base_url: cli.base_url.trim().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(cli.timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let cli = Cli::try_parse_from(["account-console", "--base-url", "http://host:9000/api//"])
            .unwrap();
        let config = Config::from_cli(&cli);
        assert_eq!(config.base_url, "http://host:9000/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let parsed = Cli::try_parse_from([
            "account-console",
            "--base-url",
            "http://host",
            "--timeout-secs",
            "0",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn log_defaults() {
        let cli = Cli::try_parse_from(["account-console", "--base-url", "http://host"]).unwrap();
        assert_eq!(cli.log_file, PathBuf::from("account-console.log"));
        assert_eq!(cli.log_level, "info");
    }
}
