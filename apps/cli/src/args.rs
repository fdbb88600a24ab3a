//! CLI argument parsing using clap.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use quill_pairing::PairingFormat;
use std::path::PathBuf;

/// Quill - typing-aware writing assistance from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Settings file (default: platform config dir)
    #[arg(long, global = true, env = "QUILL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Emit events and activity feed entries as JSON lines on stderr
    #[arg(long, global = true)]
    pub events: bool,

    /// Show verbose output (debug information)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Score a line of text for run-on thoughts (0-100)
    Score {
        text: String,
        /// Characters typed in the current paragraph before this line
        #[arg(long, default_value_t = 0)]
        buffer: usize,
    },

    /// Full typing analysis of a snapshot
    Analyze {
        text: String,
        /// Run-on threshold override (0-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: Option<u8>,
        /// Comma-separated trigger keywords override
        #[arg(long, value_delimiter = ',')]
        keywords: Option<Vec<String>>,
        #[arg(long, default_value_t = 0)]
        buffer: usize,
    },

    /// Check a pairing code's format
    Pair {
        code: String,
        /// Format that was requested from the backend
        #[arg(long)]
        requested: Option<PairingFormat>,
    },

    /// Classify a form value and print its transmittable form
    Classify(ClassifyArgs),

    /// Check a value against a format validator
    Validate {
        #[arg(value_enum)]
        kind: ValidateKind,
        value: String,
    },

    /// Read lines from stdin as typed text and print suggestions
    Watch {
        /// Print every analysis result, not only suggestions
        #[arg(long)]
        all: bool,
    },

    /// Inspect or change stored settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ClassifyArgs {
    /// Value to classify
    pub value: String,
    #[arg(long = "type")]
    pub field_type: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub placeholder: Option<String>,
    #[arg(long = "class")]
    pub class_name: Option<String>,
    #[arg(long)]
    pub autocomplete: Option<String>,
    /// Leave metadata-detected PII unmasked (overrides excludePii)
    #[arg(long)]
    pub include_pii: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateKind {
    Email,
    Phone,
    Card,
    Ssn,
    Uuid,
    /// Prints a 0-5 strength score
    Password,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    /// Print effective settings
    Show,
    /// Print the settings file location
    Path,
    /// Write a default settings file if none exists
    Init,
    /// Apply a partial JSON update, e.g. '{"runOnThreshold": 60}'
    Set { patch: String },
}
