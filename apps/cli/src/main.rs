//! Quill CLI - headless interface to the typing-aware assistance core.
//!
//! # Usage
//!
//! ```bash
//! quill score "I think and then and also or maybe"
//! quill analyze "can you help me with this?" --pretty
//! quill pair 550e8400-e29b-41d4-a716-446655440000 --requested uuid
//! quill classify --name ssn 123-45-6789
//! quill validate card "4111 1111 1111 1111"
//! cat draft.txt | quill watch
//! quill settings set '{"runOnThreshold": 60}'
//! ```
//!
//! JSON goes to stdout, logs to stderr. With `--events`, events and
//! activity feed entries are also written to stderr as JSON lines. Set
//! `RUST_LOG` to override the log filter.

mod args;
mod commands;
mod output;
mod watch;

use anyhow::{Context, Result};
use args::{Args, Command, SettingsAction};
use clap::Parser;
use output::{to_json, JsonLinesBus};
use quill_events::{EventBus, NullEventBus};
use quill_settings::{default_path, SettingsStore};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use watch::Watcher;

fn init_logging(debug: bool) {
    let fallback = if debug { "debug" } else { "info,quill=debug" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let settings_path = match &args.settings {
        Some(path) => path.clone(),
        None => default_path()?,
    };
    let mut store = SettingsStore::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    init_logging(args.verbose || store.get().enable_debug_logging);
    tracing::debug!(path = %settings_path.display(), exists = store.exists(), "settings resolved");

    let settings = store.get().clone();
    let bus: Box<dyn EventBus> = if args.events {
        Box::new(JsonLinesBus::new(std::io::stderr()))
    } else {
        Box::new(NullEventBus)
    };
    let print = |json: String| println!("{json}");

    match args.command {
        Command::Score { text, buffer } => {
            print(to_json(&commands::score(&text, buffer), args.pretty)?);
        }
        Command::Analyze {
            text,
            threshold,
            keywords,
            buffer,
        } => {
            let result =
                commands::analyze(&settings, &text, threshold, keywords.as_deref(), buffer);
            print(to_json(&result, args.pretty)?);
        }
        Command::Pair { code, requested } => {
            let out = commands::pair(&settings, &code, requested, bus.as_ref());
            print(to_json(&out, args.pretty)?);
            if !out.accepted() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Classify(classify) => {
            let c = commands::classify(&settings, &classify, bus.as_ref());
            print(to_json(&c, args.pretty)?);
        }
        Command::Validate { kind, value } => {
            let out = commands::validate(kind, &value);
            print(to_json(&out, args.pretty)?);
            if !out.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Watch { all } => {
            if !settings.enable_typing_aware_service {
                anyhow::bail!("typing-aware service is disabled in settings");
            }
            let stdout_bus = JsonLinesBus::new(std::io::stdout());
            let mut watcher = Watcher::new(&settings, &stdout_bus, all);
            watcher
                .run(std::io::stdin().lock())
                .context("reading stdin")?;
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => print(to_json(store.get(), args.pretty)?),
            SettingsAction::Path => print(settings_path.display().to_string()),
            SettingsAction::Init => {
                let created = store.ensure_file()?;
                tracing::info!(created, path = %settings_path.display(), "settings file ready");
                print(settings_path.display().to_string());
            }
            SettingsAction::Set { patch } => {
                let updated = commands::update_settings(&mut store, &patch, bus.as_ref())?;
                print(to_json(&updated, args.pretty)?);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
