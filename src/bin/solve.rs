//! Command-line adapter for the JSON solve contract.
//!
//! ```text
//! solve [REQUEST.json] [--node-limit N] [--time-limit-ms MS]
//! ```
//!
//! Reads the request from the given file, or from stdin when no path is
//! given, and prints the response JSON on stdout. Logs go to stderr; set
//! `RUST_LOG` to change the level (default `info`).

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use u_timetable::api::{solve_json, SolveResponse};
use u_timetable::solver::SolverConfig;

struct Cli {
    input: Option<PathBuf>,
    config: SolverConfig,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Parses the value following `flag`, warning when it is missing or invalid.
fn flag_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Option<T> {
    let Some(value) = value else {
        warn!(flag, "missing value, flag ignored");
        return None;
    };
    let parsed = value.parse().ok();
    if parsed.is_none() {
        warn!(flag, value = %value, "invalid value, flag ignored");
    }
    parsed
}

fn parse_cli(args: impl IntoIterator<Item = String>) -> Cli {
    let mut args = args.into_iter();

    let mut input: Option<PathBuf> = None;
    let mut config = SolverConfig::default();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--node-limit" => {
                if let Some(n) = flag_value(&a, args.next()) {
                    config = config.with_node_limit(n);
                }
            }
            "--time-limit-ms" => {
                if let Some(ms) = flag_value(&a, args.next()) {
                    config = config.with_time_limit(Duration::from_millis(ms));
                }
            }
            _ if input.is_none() && !a.starts_with("--") => input = Some(PathBuf::from(&a)),
            _ => warn!(arg = %a, "unrecognized argument ignored"),
        }
    }

    Cli { input, config }
}

fn read_request(input: Option<&PathBuf>) -> std::io::Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    enable_tracing();
    let cli = parse_cli(std::env::args().skip(1));

    let response = match read_request(cli.input.as_ref()) {
        Ok(text) => solve_json(&text, &cli.config),
        Err(e) => {
            error!(error = %e, "failed to read request");
            SolveResponse::failed(format!("failed to read request: {e}"))
        }
    };

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!(error = %e, "failed to encode response");
            return ExitCode::FAILURE;
        }
    }

    if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse_cli(args(&["req.json", "--node-limit", "500", "--time-limit-ms", "250"]));
        assert_eq!(cli.input, Some(PathBuf::from("req.json")));
        assert_eq!(cli.config.node_limit, Some(500));
        assert_eq!(cli.config.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_invalid_flag_values_are_ignored() {
        let cli = parse_cli(args(&["--node-limit", "abc", "--time-limit-ms", "-5"]));
        assert_eq!(cli.input, None);
        assert_eq!(cli.config.node_limit, None);
        assert_eq!(cli.config.time_limit, None);

        let cli = parse_cli(args(&["--node-limit"]));
        assert_eq!(cli.config.node_limit, None);
    }

    #[test]
    fn test_flag_value() {
        assert_eq!(flag_value::<u64>("--node-limit", Some("42".into())), Some(42));
        assert_eq!(flag_value::<u64>("--node-limit", Some("4x".into())), None);
        assert_eq!(flag_value::<u64>("--node-limit", None), None);
    }
}
