use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Pairing code grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingFormat {
    /// `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, hex, any case.
    Uuid,
    /// 12 hex characters, any case.
    Short,
    /// 6 decimal digits.
    Legacy,
    Unknown,
}

impl PairingFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            PairingFormat::Uuid => "uuid",
            PairingFormat::Short => "short",
            PairingFormat::Legacy => "legacy",
            PairingFormat::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PairingFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pairing format '{0}' (expected uuid, short, legacy or unknown)")]
pub struct ParseFormatError(pub String);

impl FromStr for PairingFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(PairingFormat::Uuid),
            "short" => Ok(PairingFormat::Short),
            "legacy" => Ok(PairingFormat::Legacy),
            "unknown" => Ok(PairingFormat::Unknown),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}
