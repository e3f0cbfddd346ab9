//! Tenable.sc API CLI binary.
//!
//! A command-line interface for interacting with the Tenable.sc API.

use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tenable::cli::{Cli, Command};
use tenable::{Analysis, AnalysisResultSet, PrettyPrint, Repository, TenableClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::AuthStatus = cli.command {
        return auth_status(&cli);
    }

    let client = match cli.connection.config().and_then(|c| c.build()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set SC05_URL, SC05_ACCESS_KEY and SC05_SECRET_KEY environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn auth_status(cli: &Cli) -> ExitCode {
    let mut auth = tenable::Authentication::default();
    let credentials = cli.connection.credentials();
    auth.set_api_key_auth(credentials.access_key(), credentials.secret_key());

    if cli.json {
        println!(
            "{}",
            serde_json::json!({ "authenticated": auth.is_authenticated() })
        );
    } else if auth.is_authenticated() {
        println!("Authenticated: API key pair configured");
    } else {
        println!("Not authenticated: access key and secret key are both required");
    }

    if auth.is_authenticated() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(client: &TenableClient, cli: Cli) -> tenable::Result<()> {
    match cli.command {
        Command::Whoami => {
            let user = client.current_user().get().await?;
            output_single(&user, cli.json)?;
        }
        Command::Repositories { .. } => {
            let query = cli
                .command
                .repository_query()
                .transpose()?
                .unwrap_or_default();
            let repositories = client.repositories().list(&query).await?;
            output_list(&repositories, cli.json, |r| RepositoryRow::from(r))?;
        }
        Command::Analysis { .. } => {
            let request = cli.command.analysis_request().unwrap_or_default();
            let page = client.analysis().query(&request).await?;
            output_analysis(&page, cli.json)?;
        }
        Command::AuthStatus => {}
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> tenable::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(item).map_err(tenable::TenableError::Serialization)?
        );
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> tenable::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(items).map_err(tenable::TenableError::Serialization)?
        );
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_analysis(page: &AnalysisResultSet, json: bool) -> tenable::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(page).map_err(tenable::TenableError::Serialization)?
        );
        return Ok(());
    }

    let rows: Vec<AnalysisRow> = page.iter().map(AnalysisRow::from).collect();
    println!("{}", Table::new(rows));

    let start = page.start_offset.unwrap_or(0);
    let end = page.end_offset.unwrap_or(start + page.len() as i64);
    match page.total_records {
        Some(total) if page.has_more() => {
            println!("\nRecords {}-{} of {} (more available)", start, end, total)
        }
        Some(total) => println!("\nRecords {}-{} of {}", start, end, total),
        None => println!("\n{} records", page.len()),
    }
    Ok(())
}

// Table row types for non-JSON output

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[derive(Tabled)]
struct RepositoryRow {
    id: String,
    name: String,
    #[tabled(rename = "type")]
    repository_type: String,
    format: String,
}

impl From<&Repository> for RepositoryRow {
    fn from(r: &Repository) -> Self {
        Self {
            id: r.id.as_ref().map(ToString::to_string).unwrap_or_default(),
            name: text(&r.name),
            repository_type: text(&r.repository_type),
            format: text(&r.data_format),
        }
    }
}

#[derive(Tabled)]
struct AnalysisRow {
    plugin: String,
    severity: String,
    host: String,
    port: String,
    name: String,
}

impl From<&Analysis> for AnalysisRow {
    fn from(a: &Analysis) -> Self {
        Self {
            plugin: text(&a.plugin_id),
            severity: a.severity_name().unwrap_or_default().to_string(),
            host: text(&a.ip),
            port: match (&a.port, &a.protocol) {
                (Some(port), Some(protocol)) => format!("{port}/{protocol}"),
                (Some(port), None) => port.clone(),
                _ => String::new(),
            },
            name: text(&a.name),
        }
    }
}
