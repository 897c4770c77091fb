//! CityPop CLI Client
//!
//! Command-line interface for a running CityPop server.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::blocking::Client;
use reqwest::Url;

/// CityPop CLI
#[derive(Parser, Debug)]
#[command(name = "citypop-cli")]
#[command(about = "CLI for the CityPop population service")]
struct Args {
    /// Server base URL
    #[arg(short, long, default_value = "http://127.0.0.1:5555")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get the population of a city
    Get {
        /// State name (any casing)
        state: String,

        /// City name (any casing)
        city: String,
    },

    /// Create or update the population of a city
    Set {
        /// State name (any casing)
        state: String,

        /// City name (any casing)
        city: String,

        /// New population
        population: u64,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    let client = Client::new();
    let base = args.server.as_str();

    let (state, city) = match &args.command {
        Commands::Get { state, city } | Commands::Set { state, city, .. } => (state, city),
    };
    let url = match population_url(base, state, city) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Invalid server URL {}: {}", base, e);
            return ExitCode::FAILURE;
        }
    };

    let request = match &args.command {
        Commands::Get { .. } => client.get(url),
        Commands::Set { population, .. } => client.put(url).body(population.to_string()),
    };

    let response = match request.send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request to {} failed: {}", base, e);
            return ExitCode::FAILURE;
        }
    };

    let status = response.status();
    match response.json::<serde_json::Value>() {
        Ok(body) => println!("{}", body),
        Err(e) => {
            eprintln!("Unreadable response ({}): {}", status, e);
            return ExitCode::FAILURE;
        }
    }

    if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Build the resource URL, percent-encoding each name as one path segment
fn population_url(base: &str, state: &str, city: &str) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| e.to_string())?;
    url.path_segments_mut()
        .map_err(|_| "URL cannot have a path".to_string())?
        .pop_if_empty()
        .extend(["api", "population", "state", state, "city", city]);
    Ok(url)
}
