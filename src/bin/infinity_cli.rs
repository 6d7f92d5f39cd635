//! infinity-cli: query hash reputation and upload files to the Infinity API.
//!
//! Usage:
//!   infinity-cli -q <hash>[,<hash>...]          Query one or more hashes
//!   infinity-cli -f <file> -c <code>            Upload a file for analysis
//!
//! Exit codes: 1 for missing or inconsistent arguments, 2 for operation errors.

use clap::Parser;
use infinity_client::client::{set_error_log, set_key, set_trace_log, set_url};
use infinity_client::{Client, QueryResults, TracingSink, UploadResults, DEFAULT_URL};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "infinity-cli")]
#[command(about = "Query hash reputation and upload files to the Infinity API")]
#[command(version)]
struct Cli {
    /// The key to use for Infinity API access
    #[arg(short = 'k', long = "key", env = "INFINITY_KEY", default_value = "", hide_env_values = true)]
    key: String,

    /// URL of the Infinity API to be used
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,

    /// Hash or list of hashes separated by ',' for querying
    #[arg(short = 'q', default_value = "")]
    query: String,

    /// The file to upload for processing
    #[arg(short = 'f', default_value = "")]
    file: String,

    /// The confirmation code for the upload
    #[arg(short = 'c', default_value = "")]
    confirm_code: String,

    /// Print replies as JSON instead of formatted lines
    #[arg(long)]
    json: bool,

    /// Trace the HTTP requests and responses
    #[arg(short = 'v')]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "infinity_client=trace"
    } else {
        "infinity_client=error"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fail<E: std::fmt::Display>(e: E) -> ExitCode {
    eprintln!("Error - {e}");
    ExitCode::from(2)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_query(results: &QueryResults) {
    for (hash, r) in results {
        let score = if r.general_score != 0.0 {
            r.general_score.to_string()
        } else {
            "-".to_string()
        };
        let confirm = r.confirm_code().unwrap_or("-");
        let mut classifiers: Vec<_> = r
            .classifiers
            .iter()
            .map(|(name, score)| format!("{name}:{score}"))
            .collect();
        classifiers.sort();
        println!(
            "{}\t{} [{}] {}\t{}\t{}\t[{}]",
            hash,
            r.common.status,
            r.common.status_code,
            r.common.error,
            score,
            confirm,
            classifiers.join(" ")
        );
    }
}

fn print_upload(results: &UploadResults) {
    for r in results.values() {
        println!(
            "Upload done with result: {} [{}] {}",
            r.common.status, r.common.status_code, r.common.error
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.query.is_empty() && cli.file.is_empty() {
        eprintln!("No command given. Please specify either q or f as parameters");
        return ExitCode::from(1);
    }
    if cli.file.is_empty() != cli.confirm_code.is_empty() {
        eprintln!("You must provide both the file and confirmation code for upload");
        return ExitCode::from(1);
    }

    init_logging(cli.verbose);
    let trace = cli.verbose.then(TracingSink::trace);
    let client = match Client::new(vec![
        set_error_log(Some(TracingSink::error())),
        set_trace_log(trace),
        set_url(cli.url.as_str()),
        set_key(cli.key.as_str()),
    ]) {
        Ok(c) => c,
        Err(e) => return fail(e),
    };

    if !cli.query.is_empty() {
        let hashes: Vec<&str> = cli.query.split(',').collect();
        let results = match client.query("", &hashes).await {
            Ok(r) => r,
            Err(e) => return fail(e),
        };
        if cli.json {
            if let Err(e) = print_json(&results) {
                return fail(e);
            }
        } else {
            print_query(&results);
        }
    }

    if !cli.file.is_empty() {
        let results = match client.upload_file(&cli.confirm_code, &cli.file).await {
            Ok(r) => r,
            Err(e) => return fail(e),
        };
        if cli.json {
            if let Err(e) = print_json(&results) {
                return fail(e);
            }
        } else {
            print_upload(&results);
        }
    }

    ExitCode::SUCCESS
}
