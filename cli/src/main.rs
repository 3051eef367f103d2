//! Chat-with-data CLI
//!
//! Command-line client for a running chat-with-data API server.
//!
//! # Usage
//!
//! ```bash
//! datachat --help
//! datachat health
//! datachat schema
//! datachat ask "how many customers signed up last month?"
//! ```

#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use shared::models::ChatRequest;

/// Chat-with-data CLI - ask questions about your database from the terminal
#[derive(Parser)]
#[command(name = "datachat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "CHATDATA_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,
    /// Show the schema listing the model is given
    Schema,
    /// Ask a question and print the answer
    Ask {
        /// The question, in plain language
        question: String,
    },
}

fn endpoint(api_url: &str, path: &str) -> String {
    format!("{}{path}", api_url.trim_end_matches('/'))
}

async fn fetch(request: reqwest::RequestBuilder) -> Result<Value> {
    let response = request.send().await.context("Failed to reach API server")?;
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("Server answered {status} with a non-JSON body"))?;
    tracing::debug!(%status, "Received response");
    Ok(body)
}

fn print_answer(body: &Value) -> Result<()> {
    if let Some(sql) = body.get("generated_sql").and_then(Value::as_str) {
        println!("SQL: {sql}");
    }
    if let Some(error) = body.get("error").or_else(|| body.get("detail")) {
        println!("Error: {}", error.as_str().unwrap_or_default());
        if let Some(tables) = body.get("available_tables") {
            println!("Available tables: {tables}");
        }
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&body["results"])?);
    if let Some(rows) = body.get("rows") {
        println!("({rows} rows)");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Some(Commands::Health) => {
            let body = fetch(client.get(endpoint(&cli.api_url, "/health"))).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Some(Commands::Schema) => {
            let body = fetch(client.get(endpoint(&cli.api_url, "/inspect-schema"))).await?;
            match body.get("schema_text").and_then(Value::as_str) {
                Some(text) => println!("{text}"),
                None => println!("{}", serde_json::to_string_pretty(&body)?),
            }
        }
        Some(Commands::Ask { question }) => {
            let request = ChatRequest::new(question);
            let body = fetch(
                client
                    .post(endpoint(&cli.api_url, "/chat-with-data"))
                    .json(&request),
            )
            .await?;
            print_answer(&body)?;
        }
        None => {
            println!("Chat-with-data CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
