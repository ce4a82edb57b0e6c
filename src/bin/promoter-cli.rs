use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use serde_json::Value;

use edge_query_headers::config::{MappingConfig, ObservabilityConfig};
use edge_query_headers::http::INVOCATION_PATH;
use edge_query_headers::lifecycle::startup::build_mapping;
use edge_query_headers::mapping::load_mapping;
use edge_query_headers::observability::logging;
use edge_query_headers::{handle_json, MappingTable};

#[derive(Parser)]
#[command(name = "promoter-cli")]
#[command(about = "Invoke the query-string-to-header hook locally or against a running harness", long_about = None)]
struct Cli {
    /// Log level for diagnostics on stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform an event in-process and print the resulting request
    Invoke {
        /// Mapping file (`<sourceKey> <HeaderName>` per line)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Argument names promoted to `X-<Name>` headers
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// Event JSON file; stdin when omitted
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
    /// Print the rules in a mapping file
    Keys {
        #[arg(short, long)]
        mapping: PathBuf,
    },
    /// Post an event to a running harness
    Remote {
        #[arg(short, long, default_value = "http://localhost:9000")]
        url: String,

        /// Event JSON file; stdin when omitted
        #[arg(short, long)]
        event: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init_logging(&ObservabilityConfig {
        log_level: cli.log_level,
        ..ObservabilityConfig::default()
    });

    match cli.command {
        Commands::Invoke { mapping, args, event } => {
            let payload = read_event(event.as_deref())?;
            println!("{}", invoke(mapping, args, &payload)?);
        }
        Commands::Keys { mapping } => {
            let table = load_mapping(&mapping)?;
            print!("{}", render_keys(&table));
        }
        Commands::Remote { url, event } => {
            let payload = read_event(event.as_deref())?;
            let (status, json) = post_event(&url, payload).await?;
            if !status.is_success() {
                eprintln!("Error: harness returned status {}", status);
            }
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

/// Build the mapping the way the harness does and transform one event.
fn invoke(mapping: Option<PathBuf>, args: Vec<String>, payload: &[u8]) -> Result<String, Box<dyn Error>> {
    let config = MappingConfig {
        path: mapping.map(|path| path.display().to_string()),
        args,
    };
    let table = build_mapping(&config)?;
    let request = handle_json(&table, payload)?;
    Ok(serde_json::to_string_pretty(&request)?)
}

fn render_keys(table: &MappingTable) -> String {
    table
        .iter()
        .map(|entry| format!("{} -> {}\n", entry.source_key(), entry.header_name()))
        .collect()
}

async fn post_event(url: &str, payload: Vec<u8>) -> Result<(StatusCode, Value), reqwest::Error> {
    let res = reqwest::Client::new()
        .post(format!("{}{}", url.trim_end_matches('/'), INVOCATION_PATH))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await?;
    let status = res.status();
    Ok((status, res.json().await?))
}

fn read_event(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}
