//! The external completion engine contract.
//!
//! The bridge never analyzes source text itself; it hands the buffer and
//! cursor position to a [`CompletionProvider`] and formats whatever comes
//! back. The production implementation is [`ProcessProvider`], which spawns
//! the engine as a child process; tests substitute in-memory mocks.

pub mod process;
pub mod protocol;

pub use process::ProcessProvider;

use serde::Deserialize;

use crate::error::BridgeResult;

/// One completion candidate as the engine reports it.
///
/// Field names are fixed by the engine wire protocol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    /// Text to insert at the completion position.
    pub complete: String,
    /// Human-readable rendering of the candidate.
    #[serde(rename = "str")]
    pub display: String,
    /// Short descriptor shown inline next to the candidate.
    pub description: String,
    /// Long-form documentation.
    pub help: String,
    /// Category tag (function, module, keyword, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

/// A source of completion candidates.
///
/// `row` is 1-based, `column` is a 0-based offset into that line. Positions
/// are forwarded as the host reported them; range checking is the
/// implementation's concern.
pub trait CompletionProvider {
    fn complete(&mut self, source: &str, row: u32, column: u32) -> BridgeResult<Vec<Candidate>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn candidate_deserializes_wire_field_names() {
        let candidate: Candidate = serde_json::from_value(json!({
            "complete": "foo",
            "str": "foo()",
            "description": "function",
            "help": "docstring",
            "type": "function",
        }))
        .unwrap();

        assert_eq!(candidate.complete, "foo");
        assert_eq!(candidate.display, "foo()");
        assert_eq!(candidate.description, "function");
        assert_eq!(candidate.help, "docstring");
        assert_eq!(candidate.kind, "function");
    }

    #[test]
    fn candidate_rejects_missing_fields() {
        let result: Result<Candidate, _> =
            serde_json::from_value(json!({ "complete": "foo" }));
        assert!(result.is_err());
    }
}
