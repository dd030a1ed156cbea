//! chatview CLI - replays a JSON scenario against a chat view session.
//!
//! ```text
//! chatview [scenario.json | -]
//! ```
//!
//! Each event is applied through [`chatview_engine::ChatSession`] and one JSON
//! line describing the derived view is printed per step. With no argument, or
//! `-`, the scenario is read from stdin.

mod scenario;

use anyhow::{Context, Result};
use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, Read, Write},
    path::PathBuf,
    sync::Mutex,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use chatview_config::{ChatViewConfig, ConfigError};
use chatview_engine::{ChatSession, LoggingInteraction, SessionSettings};

fn init_tracing(config_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (log_file, init_warnings) = open_chatview_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Keep stdout clean for the JSON report.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_chatview_log_file() -> (Option<(PathBuf, File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in chatview_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn chatview_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.chatview/logs/chatview.log
    if let Some(config_path) = ChatViewConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("chatview.log"));
    }

    // Fallback: ./.chatview/logs/chatview.log
    candidates.push(PathBuf::from(".chatview").join("logs").join("chatview.log"));

    candidates
}

fn read_scenario(arg: Option<String>) -> Result<String> {
    match arg.as_deref() {
        None | Some("-") => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read scenario from stdin")?;
            Ok(input)
        }
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read scenario {path}"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded: Result<Option<ChatViewConfig>, ConfigError> = ChatViewConfig::load();
    let config = match &loaded {
        Ok(Some(config)) => Some(config),
        Ok(None) | Err(_) => None,
    };
    init_tracing(config.map(|config| config.logging.filter.as_str()));
    if let Err(err) = &loaded {
        tracing::warn!("Using default configuration: {err}");
    }

    let settings = config.map_or_else(SessionSettings::default, SessionSettings::from_config);
    let events = scenario::parse(&read_scenario(env::args().nth(1))?)?;
    tracing::info!(events = events.len(), "Replaying scenario");

    let interaction = LoggingInteraction;
    let mut replayer = scenario::Replayer::new(ChatSession::new(settings), &interaction);
    let reports = replayer.run(events).await?;

    let mut stdout = io::stdout().lock();
    for report in &reports {
        serde_json::to_writer(&mut stdout, report).context("failed to write report")?;
        writeln!(stdout)?;
    }
    replayer.finish().await
}
