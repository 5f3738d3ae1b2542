// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::app_log;
use crate::core::{ConfigManager, ServiceClient};
use crate::projector::{ingest, Section, SECTIONS};
use crate::session::Session;
use crate::shell::run_shell;
use crate::types::response::SavedSnapshot;
use crate::utils::{read_json_file, write_json_file};

#[derive(Parser)]
#[command(name = "cvlens")]
#[command(about = "Upload a résumé to the analysis service and explore the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Analysis service base URL (overrides config.yaml and CVLENS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a PDF résumé and print one section of the analysis
    Analyze {
        file: PathBuf,
        #[arg(long, default_value = "raw")]
        section: Section,
        /// Keyword for the search section
        #[arg(long)]
        query: Option<String>,
        /// Write the raw service response to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Render a saved or raw analysis response without uploading
    Render {
        result: PathBuf,
        #[arg(long, default_value = "raw")]
        section: Section,
        #[arg(long)]
        query: Option<String>,
    },
    /// Print the lines of the résumé text containing a keyword
    Search { result: PathBuf, query: String },
    /// Fetch industry trends for the skills of a saved analysis
    Trends { result: PathBuf },
    /// Check that the analysis service is up
    Health,
    /// List the available sections
    Sections,
    /// Interactive session
    Shell,
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let config = config.with_api_base_url(cli.api_url);
    let client = ServiceClient::new(
        &config.service.api_base_url,
        config.service.timeout_seconds,
    )?;

    match cli.command {
        Command::Analyze {
            file,
            section,
            query,
            save,
        } => {
            let mut session = Session::new();
            upload(&mut session, &client, &file, save.as_deref()).await?;
            present(&mut session, &client, section, query).await
        }

        Command::Render {
            result,
            section,
            query,
        } => {
            let mut session = load_saved(&result).await?;
            present(&mut session, &client, section, query).await
        }

        Command::Search { result, query } => {
            let mut session = load_saved(&result).await?;
            session.set_search_query(query);
            let matches = session.search_matches();
            if matches.is_empty() {
                println!("No matches found.");
            }
            for line in matches {
                println!("{}", line);
            }
            Ok(())
        }

        Command::Trends { result } => {
            let mut session = load_saved(&result).await?;
            present(&mut session, &client, Section::Industry, None).await
        }

        Command::Health => {
            let health = client
                .health()
                .await
                .with_context(|| format!("Health check failed for {}", client.base_url()))?;
            println!("{}: {}", client.base_url(), health.status);
            if let Some(service) = health.service {
                println!("service: {}", service);
            }
            if let Some(timestamp) = health.timestamp {
                println!("timestamp: {}", timestamp);
            }
            Ok(())
        }

        Command::Sections => {
            for spec in SECTIONS {
                println!("{:<12} {} {}", spec.key, spec.icon, spec.label);
            }
            Ok(())
        }

        Command::Shell => run_shell(client).await,
    }
}

async fn upload(
    session: &mut Session,
    client: &ServiceClient,
    file: &Path,
    save: Option<&Path>,
) -> Result<()> {
    session.select_file(file);
    let ticket = session.begin_upload()?;

    let outcome = client.analyze_resume(&ticket.file).await;
    let body = outcome.as_ref().ok().map(|response| response.body.clone());
    session.complete_upload(&ticket, outcome.map(|response| response.result));

    if let Some(err) = session.error() {
        app_log!(error, "Analysis failed: {}", err);
        anyhow::bail!(err.user_message());
    }

    if let (Some(path), Some(body)) = (save, body) {
        write_json_file(path, &SavedSnapshot::new(body)).await?;
        println!("Saved analysis to {}", path.display());
    }
    Ok(())
}

async fn load_saved(path: &Path) -> Result<Session> {
    let value = read_json_file(path).await?;
    let result = ingest(SavedSnapshot::unwrap_body(value))
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .with_context(|| format!("{} does not hold a usable analysis", path.display()))?;

    let mut session = Session::new();
    session.load_result(result);
    Ok(session)
}

async fn present(
    session: &mut Session,
    client: &ServiceClient,
    section: Section,
    query: Option<String>,
) -> Result<()> {
    if let Some(query) = query {
        session.set_search_query(query);
    }
    if let Some(ticket) = session.select_section(section) {
        let outcome = client.industry_trends(&ticket.skills).await;
        session.complete_trends(&ticket, outcome);
    }

    if let Some(rendered) = session.render() {
        println!("{}", rendered);
    }
    Ok(())
}
