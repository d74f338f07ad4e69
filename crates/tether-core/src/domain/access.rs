//! Requested access mode of a blob binding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a parameter wants to touch its blob.
///
/// Callers usually leave the mode unspecified (`Option::None`) and let the
/// binding pick its natural one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    Read,
    Write,
    ReadWrite,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessMode::Read => "Read",
            AccessMode::Write => "Write",
            AccessMode::ReadWrite => "ReadWrite",
        };
        f.write_str(s)
    }
}

impl FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read" | "r" => Ok(AccessMode::Read),
            "write" | "w" => Ok(AccessMode::Write),
            "readwrite" | "read_write" | "rw" => Ok(AccessMode::ReadWrite),
            _ => Err(format!("Unknown access mode: {s}")),
        }
    }
}
