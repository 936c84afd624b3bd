//! Newline-delimited JSON protocol spoken with the host plugin.
//!
//! The host's completion hook is two-phase, and that shape is dictated by
//! the editor: it first asks where completion starts, then asks for the
//! entry list. One JSON object per line in each direction. `base` is the
//! prefix string the host has collected so far; it is carried by the
//! protocol but the engine derives its own prefix from the source text, so
//! the bridge never consumes it.

use serde::{Deserialize, Serialize};

use super::entry::CompletionEntry;

/// A request from the host plugin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum HostRequest {
    /// Phase 1: report the column at which completion starts.
    FindStart { column: u32 },
    /// Phase 2: report the completion list for the current popup.
    Complete {
        /// Full buffer content, line breaks preserved.
        source: String,
        /// 1-based cursor line.
        row: u32,
        /// 0-based cursor column.
        column: u32,
        #[serde(default)]
        base: String,
    },
}

/// A message to the host plugin.
///
/// `Log` lines are diagnostics for the user's message area; they are never
/// part of a completion result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HostResponse {
    StartColumn { col: u32 },
    Entries { entries: Vec<CompletionEntry> },
    Log { log: String },
}
