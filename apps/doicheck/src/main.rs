//! doicheck - DOI auditing for documents
//!
//! Finds the DOIs cited in documents (txt, docx, pptx, pdf) and checks each
//! one against Crossref, reporting unknown DOIs and works that declare
//! updates such as corrections or retractions.
//!
//! # Commands
//!
//! - `file <PATH>...`: extract DOIs from documents and validate them
//! - `doi <LIST>`: parse a comma-separated DOI list and optionally validate it
//!
//! Exit codes: 0 on success, 1 when every document failed, 2 on
//! configuration errors.

mod render;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use doicheck_core::{
    scan_documents_blocking, Auditor, CrossrefClient, DoicheckConfig, ValidationOptions,
    ValidationOrchestrator,
};
use doicheck_identifiers::DoiInput;
use tokio_util::sync::CancellationToken;
use tracing::{error, warn};
use tracing_subscriber::{fmt, EnvFilter};

const EXIT_ALL_DOCUMENTS_FAILED: u8 = 1;
const EXIT_CONFIGURATION: u8 = 2;

/// Check the DOIs cited in documents against Crossref
#[derive(Parser)]
#[command(name = "doicheck")]
#[command(version)]
#[command(about = "Find the DOIs cited in documents and check them against Crossref")]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (default: <config dir>/doicheck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract DOIs from documents, and validate them unless --extract is given
    File {
        /// Documents to scan (txt, doc, docx, ppt, pptx, pdf)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Only list the DOIs found in each document
        #[arg(long, conflicts_with = "validate")]
        extract: bool,

        /// Validate the DOIs found (default)
        #[arg(long)]
        validate: bool,
    },
    /// Parse a comma-separated DOI list
    Doi {
        /// DOIs, comma-separated or as separate arguments
        #[arg(required = true)]
        dois: Vec<String>,

        /// Validate the parsed DOIs against the registry
        #[arg(long)]
        validate: bool,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doicheck=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn emit(text: String, json: Option<serde_json::Value>) -> Result<(), serde_json::Error> {
    match json {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None if text.is_empty() => {}
        None => println!("{}", text),
    }
    Ok(())
}

/// Cancel `token` on Ctrl-C
fn cancel_on_interrupt(token: &CancellationToken) {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling outstanding registry requests");
            token.cancel();
        }
    });
}

async fn build_auditor(config: &DoicheckConfig) -> Option<Auditor<CrossrefClient>> {
    match CrossrefClient::connect(&config.registry).await {
        Ok(client) => {
            let options = ValidationOptions::from_config(&config.registry);
            let orchestrator = ValidationOrchestrator::new(Arc::new(client), options);
            Some(Auditor::new(orchestrator))
        }
        Err(e) => {
            error!(error = %e, "registry client unavailable");
            eprintln!("Error: {}", e);
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = match settings::load(
        cli.config.as_deref(),
        std::env::var(settings::MAILTO_ENV).ok(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(EXIT_CONFIGURATION));
        }
    };

    match cli.command {
        Commands::File {
            paths,
            extract: true,
            ..
        } => {
            let outcomes = scan_documents_blocking(paths, config.reader.clone()).await;
            let json = cli.json.then(|| render::scans_json(&outcomes));
            emit(render::scans_text(&outcomes), json)?;

            if outcomes.iter().all(|o| o.scan.is_err()) {
                return Ok(ExitCode::from(EXIT_ALL_DOCUMENTS_FAILED));
            }
        }
        Commands::File { paths, .. } => {
            let Some(auditor) = build_auditor(&config).await else {
                return Ok(ExitCode::from(EXIT_CONFIGURATION));
            };
            let token = CancellationToken::new();
            cancel_on_interrupt(&token);

            let report = auditor
                .audit_documents(&paths, &config.reader, &token)
                .await;
            let json = cli.json.then(|| render::audit_json(&report));
            emit(render::audit_text(&report), json)?;

            if report.all_documents_failed() {
                return Ok(ExitCode::from(EXIT_ALL_DOCUMENTS_FAILED));
            }
        }
        Commands::Doi {
            dois,
            validate: false,
        } => {
            let direct = DoiInput::Single(dois.join(",")).into_doi_set();
            let json = cli
                .json
                .then(|| render::direct_json(&direct.dois, &direct.rejected));
            emit(render::direct_text(&direct.dois, &direct.rejected), json)?;
        }
        Commands::Doi {
            dois,
            validate: true,
        } => {
            let Some(auditor) = build_auditor(&config).await else {
                return Ok(ExitCode::from(EXIT_CONFIGURATION));
            };
            let token = CancellationToken::new();
            cancel_on_interrupt(&token);

            let audit = auditor
                .audit_dois(DoiInput::Single(dois.join(",")), &token)
                .await;
            let json = cli.json.then(|| render::direct_audit_json(&audit));
            emit(render::direct_audit_text(&audit), json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
