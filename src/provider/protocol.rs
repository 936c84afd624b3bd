//! Wire protocol spoken with the engine process.
//!
//! Messages are JSON values with base-protocol framing:
//! `Content-Length: N\r\n\r\n{json}`. Requests carry an `id` and a `method`
//! (`initialize`, `complete`); responses echo the `id` with either a
//! `result` or an `error` member. `shutdown` is a notification and gets no
//! response.

use std::io::{BufRead, Read, Write};

use serde_json::{Value, json};

use super::Candidate;
use crate::error::{BridgeError, BridgeResult};

/// Writes a JSON message with base-protocol framing
pub(crate) fn write_message<W: Write>(writer: &mut W, message: &Value) -> BridgeResult<()> {
    let body = serde_json::to_string(message)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", body.len(), body)?;
    writer.flush()?;
    Ok(())
}

/// Reads a JSON message with base-protocol framing
///
/// Expected format: `Content-Length: N\r\n\r\n{json}`
pub(crate) fn read_message<R: BufRead>(reader: &mut R) -> BridgeResult<Value> {
    // Read header line: "Content-Length: N"
    let mut header = String::new();
    reader.read_line(&mut header)?;

    let content_length = header
        .trim()
        .strip_prefix("Content-Length: ")
        .ok_or_else(|| {
            BridgeError::protocol(format!("missing Content-Length header, got: {header:?}"))
        })?
        .parse::<usize>()
        .map_err(|e| BridgeError::protocol(format!("invalid Content-Length value: {e}")))?;

    // Read separator line (should be empty "\r\n")
    let mut separator = String::new();
    reader.read_line(&mut separator)?;
    if !separator.trim().is_empty() {
        return Err(BridgeError::protocol(format!(
            "expected empty separator line, got: {separator:?}"
        )));
    }

    // Read exactly content_length bytes for the JSON body
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    Ok(serde_json::from_slice(&body)?)
}

/// Build the one-time initialize request carrying the engine search paths.
pub(crate) fn build_initialize_request(id: u64, search_paths: &[String]) -> Value {
    json!({
        "id": id,
        "method": "initialize",
        "params": {
            "client": { "name": "omnibridge", "version": env!("CARGO_PKG_VERSION") },
            "search_paths": search_paths,
        }
    })
}

/// Build a completion request for the given cursor position.
pub(crate) fn build_complete_request(id: u64, source: &str, row: u32, column: u32) -> Value {
    json!({
        "id": id,
        "method": "complete",
        "params": { "source": source, "row": row, "column": column }
    })
}

/// Build the shutdown notification sent when the bridge goes away.
pub(crate) fn build_shutdown_notification() -> Value {
    json!({ "method": "shutdown" })
}

/// Extract the `result` member of a response to request `id`.
///
/// Engine-reported failures (an `error` member) surface as
/// [`BridgeError::Provider`]; a wrong or missing `id` and a missing
/// `result` are protocol errors.
pub(crate) fn take_result(mut response: Value, id: u64) -> BridgeResult<Value> {
    let response_id = response.get("id").and_then(Value::as_u64);
    if response_id != Some(id) {
        return Err(BridgeError::protocol(format!(
            "response id mismatch: expected {id}, got {response_id:?}"
        )));
    }

    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string());
        return Err(BridgeError::provider(message));
    }

    response
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| BridgeError::protocol("response missing 'result' member"))
}

/// Decode a `complete` result into candidates. `null` means no candidates.
pub(crate) fn parse_candidates(result: Value) -> BridgeResult<Vec<Candidate>> {
    if result.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(result)?)
}
