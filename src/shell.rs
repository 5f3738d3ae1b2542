// src/shell.rs
//! Interactive session: reads commands from stdin while requests run in the background

use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::core::ServiceClient;
use crate::error::AnalyzerError;
use crate::projector::{Section, SECTIONS};
use crate::session::{Session, TrendsTicket, UploadTicket};
use crate::types::AnalysisResult;
use crate::{app_log, app_span};

const HELP: &str = "\
Commands:
  file <path>       select a PDF résumé
  upload            send the selected file for analysis
  section <key>     show a section (see `sections`)
  search <text>     set the keyword for the search section
  show              print the current section again
  sections          list section keys
  reset             clear file, result and view state
  help              this text
  quit              leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    File(PathBuf),
    Upload,
    Section(Section),
    Search(String),
    Show,
    Sections,
    Reset,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Option<Self>, AnalyzerError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "file" if rest.is_empty() => {
                return Err(AnalyzerError::Validation("Usage: file <path>".to_string()))
            }
            "file" => ShellCommand::File(PathBuf::from(rest)),
            "upload" => ShellCommand::Upload,
            "section" => ShellCommand::Section(rest.parse()?),
            // An empty keyword is a valid query and matches every line.
            "search" => ShellCommand::Search(rest.to_string()),
            "show" => ShellCommand::Show,
            "sections" => ShellCommand::Sections,
            "reset" => ShellCommand::Reset,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(AnalyzerError::Validation(format!(
                    "Unknown command '{}'. Type `help`.",
                    other
                )))
            }
        };
        Ok(Some(command))
    }
}

enum ShellEvent {
    Upload(UploadTicket, Result<AnalysisResult, AnalyzerError>),
    Trends(TrendsTicket, Result<String, AnalyzerError>),
}

pub async fn run_shell(client: ServiceClient) -> Result<()> {
    let mut session = Session::new();
    let span = app_span!("shell", session = %session.id());
    shell_loop(&mut session, client).instrument(span).await
}

async fn shell_loop(session: &mut Session, client: ServiceClient) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ShellEvent>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("cvlens shell ({}). Type `help` for commands.", client.base_url());
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match ShellCommand::parse(&line) {
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(command)) => execute(session, &client, &tx, command),
                    Ok(None) => {}
                    Err(err) => println!("{}", err.user_message()),
                }
                prompt();
            }
            Some(event) = rx.recv() => {
                apply_event(session, event);
                prompt();
            }
        }
    }

    app_log!(info, "Shell closed");
    Ok(())
}

fn execute(
    session: &mut Session,
    client: &ServiceClient,
    tx: &mpsc::UnboundedSender<ShellEvent>,
    command: ShellCommand,
) {
    match command {
        ShellCommand::File(path) => {
            println!("Selected {}", path.display());
            session.select_file(path);
        }
        ShellCommand::Upload => match session.begin_upload() {
            Ok(ticket) => {
                println!("Uploading {}...", ticket.file.display());
                spawn_upload(client.clone(), tx.clone(), ticket);
            }
            Err(err) => println!("{}", err.user_message()),
        },
        ShellCommand::Section(section) => {
            if session.result().is_none() {
                println!("No analysis yet. Select a file and upload it first.");
                return;
            }
            if let Some(ticket) = session.select_section(section) {
                spawn_trends(client.clone(), tx.clone(), ticket);
            }
            show(session);
        }
        ShellCommand::Search(query) => {
            session.set_search_query(query);
            if session.section() != Section::Search {
                session.select_section(Section::Search);
            }
            show(session);
        }
        ShellCommand::Show => show(session),
        ShellCommand::Sections => {
            for spec in SECTIONS {
                println!("  {:<12} {} {}", spec.key, spec.icon, spec.label);
            }
        }
        ShellCommand::Reset => {
            session.reset();
            println!("Session cleared.");
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => {}
    }
}

fn apply_event(session: &mut Session, event: ShellEvent) {
    match event {
        ShellEvent::Upload(ticket, outcome) => {
            if !session.complete_upload(&ticket, outcome) {
                return;
            }
            match session.error() {
                Some(err) => println!("\n{}", err.user_message()),
                None => {
                    println!("\nAnalysis ready.");
                    show(session);
                }
            }
        }
        ShellEvent::Trends(ticket, outcome) => {
            if session.complete_trends(&ticket, outcome) && session.section() == Section::Industry {
                println!();
                show(session);
            }
        }
    }
}

fn spawn_upload(client: ServiceClient, tx: mpsc::UnboundedSender<ShellEvent>, ticket: UploadTicket) {
    tokio::spawn(
        async move {
            let outcome = client
                .analyze_resume(&ticket.file)
                .await
                .map(|response| response.result);
            let _ = tx.send(ShellEvent::Upload(ticket, outcome));
        }
        .in_current_span(),
    );
}

fn spawn_trends(client: ServiceClient, tx: mpsc::UnboundedSender<ShellEvent>, ticket: TrendsTicket) {
    tokio::spawn(
        async move {
            let outcome = client.industry_trends(&ticket.skills).await;
            let _ = tx.send(ShellEvent::Trends(ticket, outcome));
        }
        .in_current_span(),
    );
}

fn show(session: &Session) {
    match session.render() {
        Some(rendered) => println!("{}", rendered),
        None => match session.error() {
            Some(err) => println!("{}", err.user_message()),
            None if session.is_loading() => println!("Analysis in progress..."),
            None => println!("Nothing to show. Use `file <path>` then `upload`."),
        },
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}
