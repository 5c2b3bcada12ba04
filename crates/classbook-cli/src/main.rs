//! classbook - command-line client for the classbook education platform.
//!
//! Wires the durable session store and the API client together and exposes
//! account and resource commands. Run `classbook help` for usage.

mod commands;
mod format;

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use classbook_core::{ApiClient, ApiError, Config, FileSessionStore};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The single place that reacts to an expired session: every
            // command funnels its errors here.
            if let Some(ApiError::SessionExpired) = e.downcast_ref::<ApiError>() {
                eprintln!("Your session has expired and you have been signed out.");
                eprintln!("Run `classbook login` to sign in again.");
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<()> {
    let config = Config::load()?;
    let api_url = config.api_url();

    let session = Arc::new(FileSessionStore::new(Config::session_dir()?)?);
    let client = ApiClient::new(api_url.clone(), session)?;

    debug!(api_url = %api_url, "classbook starting");

    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "login" => commands::login(&client, config, args.get(1).map(String::as_str)).await,
        "logout" => commands::logout(&client),
        "whoami" => commands::whoami(&client),
        "profile" => commands::profile(&client).await,
        "dashboard" => commands::dashboard(&client).await,
        "classes" => commands::classes(&client).await,
        "class" => commands::class_detail(&client, parse_id(args.get(1))?).await,
        "materials" => commands::materials(&client).await,
        "quizzes" => commands::quizzes(&client).await,
        "assessments" => commands::assessments(&client).await,
        "institutions" => commands::institutions(&client).await,
        "get" => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Expected a path, e.g. `classbook get /classes`"))?;
            commands::raw_get(&client, path).await
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            Err(anyhow::anyhow!("Unknown command: {}", other))
        }
    }
}

fn parse_id(arg: Option<&String>) -> Result<i64> {
    let raw = arg.ok_or_else(|| anyhow::anyhow!("Expected a class id, e.g. `classbook class 42`"))?;
    raw.parse()
        .map_err(|_| anyhow::anyhow!("Invalid class id: {}", raw))
}

fn print_usage() {
    println!("classbook - client for the classbook education platform");
    println!();
    println!("Usage: classbook <command> [args]");
    println!();
    println!("Account:");
    println!("  login [email]     Sign in (prompts for the password)");
    println!("  logout            Sign out and drop the stored session");
    println!("  whoami            Show the locally stored identity");
    println!("  profile           Fetch the profile from the backend");
    println!();
    println!("Resources:");
    println!("  dashboard         Landing-page summary");
    println!("  classes           List classes");
    println!("  class <id>        Class detail with roster and resources");
    println!("  materials         List materials");
    println!("  quizzes           List quizzes");
    println!("  assessments       List assessments");
    println!("  institutions      List institutions");
    println!("  get <path>        Raw GET, printing the response body");
    println!();
    println!("The backend URL comes from CLASSBOOK_API_URL (default http://localhost:8080).");
}
