//! Request dispatch and the stdio serve loop.

use std::io::{BufRead, Write};

use crate::adapter::CompletionAdapter;
use crate::host::protocol::{HostRequest, HostResponse};
use crate::provider::CompletionProvider;

/// The bridge session: one adapter serving one host connection.
pub struct OmniBridge<P> {
    adapter: CompletionAdapter<P>,
}

impl<P: CompletionProvider> OmniBridge<P> {
    pub fn new(adapter: CompletionAdapter<P>) -> Self {
        Self { adapter }
    }

    /// Answer one host request.
    ///
    /// A provider failure is reported as a single `log` diagnostic followed
    /// by an empty entry list; the popup then shows nothing, same as a
    /// genuine empty result.
    pub fn handle<W: Write>(&mut self, request: HostRequest, writer: &mut W) -> std::io::Result<()> {
        match request {
            HostRequest::FindStart { column } => {
                let col = self.adapter.start_column(column);
                write_response(writer, &HostResponse::StartColumn { col })
            }
            HostRequest::Complete {
                source,
                row,
                column,
                base: _,
            } => {
                let entries = match self.adapter.completions(&source, row, column) {
                    Ok(entries) => entries,
                    Err(e) => {
                        log::error!("completion request failed: {e}");
                        write_response(
                            writer,
                            &HostResponse::Log {
                                log: format!("omnibridge error: {e}"),
                            },
                        )?;
                        Vec::new()
                    }
                };
                write_response(writer, &HostResponse::Entries { entries })
            }
        }
    }

    /// Serve requests until EOF, one line-delimited JSON request at a time.
    ///
    /// Malformed lines are logged and skipped; a dead host connection ends
    /// the loop.
    pub fn serve<R: BufRead, W: Write>(&mut self, reader: R, writer: &mut W) -> std::io::Result<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HostRequest>(&line) {
                Ok(request) => self.handle(request, writer)?,
                Err(e) => {
                    log::warn!(target: "omnibridge::host", "dropping malformed request: {e}");
                }
            }
        }
        Ok(())
    }
}

fn write_response<W: Write>(writer: &mut W, response: &HostResponse) -> std::io::Result<()> {
    serde_json::to_writer(&mut *writer, response)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BridgeError, BridgeResult};
    use crate::host::entry::MatchFlags;
    use crate::provider::Candidate;
    use serde_json::Value;

    struct FixedProvider(Vec<Candidate>);

    impl CompletionProvider for FixedProvider {
        fn complete(&mut self, _: &str, _: u32, _: u32) -> BridgeResult<Vec<Candidate>> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl CompletionProvider for FailingProvider {
        fn complete(&mut self, _: &str, _: u32, _: u32) -> BridgeResult<Vec<Candidate>> {
            Err(BridgeError::provider("syntax error"))
        }
    }

    fn bridge_with<P: CompletionProvider>(provider: P) -> OmniBridge<P> {
        OmniBridge::new(CompletionAdapter::new(provider, MatchFlags::default()))
    }

    /// Run a session over in-memory stdio and return the response lines.
    fn run_session<P: CompletionProvider>(bridge: &mut OmniBridge<P>, input: &str) -> Vec<Value> {
        let mut output = Vec::new();
        bridge
            .serve(std::io::Cursor::new(input.to_string()), &mut output)
            .unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn find_start_echoes_cursor_column() {
        let mut bridge = bridge_with(FixedProvider(vec![]));

        let responses = run_session(&mut bridge, "{\"phase\":\"find_start\",\"column\":12}\n");

        assert_eq!(responses, vec![serde_json::json!({ "col": 12 })]);
    }

    #[test]
    fn complete_returns_formatted_entries() {
        let mut bridge = bridge_with(FixedProvider(vec![Candidate {
            complete: "foo".to_string(),
            display: "foo()".to_string(),
            description: "function".to_string(),
            help: "docstring".to_string(),
            kind: "function".to_string(),
        }]));

        let responses = run_session(
            &mut bridge,
            "{\"phase\":\"complete\",\"source\":\"fo\",\"row\":1,\"column\":2,\"base\":\"fo\"}\n",
        );

        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0]["entries"],
            serde_json::json!([{
                "word": "foo",
                "abbr": "foo()",
                "menu": "function",
                "info": "docstring",
                "kind": "function",
                "icase": 1,
                "dup": 1,
            }])
        );
    }

    #[test]
    fn empty_result_emits_no_diagnostic() {
        let mut bridge = bridge_with(FixedProvider(vec![]));

        let responses = run_session(
            &mut bridge,
            "{\"phase\":\"complete\",\"source\":\"\",\"row\":1,\"column\":0}\n",
        );

        assert_eq!(responses, vec![serde_json::json!({ "entries": [] })]);
    }

    #[test]
    fn provider_failure_emits_one_diagnostic_then_empty_entries() {
        let mut bridge = bridge_with(FailingProvider);

        let responses = run_session(
            &mut bridge,
            "{\"phase\":\"complete\",\"source\":\"\",\"row\":1,\"column\":0}\n",
        );

        assert_eq!(responses.len(), 2, "exactly one diagnostic plus the result");
        let log = responses[0]["log"].as_str().unwrap();
        assert!(log.contains("error:"));
        assert!(log.contains("syntax error"));
        assert_eq!(responses[1], serde_json::json!({ "entries": [] }));
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let mut bridge = bridge_with(FixedProvider(vec![]));

        let responses = run_session(
            &mut bridge,
            "this is not json\n\n{\"phase\":\"find_start\",\"column\":3}\n",
        );

        assert_eq!(responses, vec![serde_json::json!({ "col": 3 })]);
    }

    #[test]
    fn session_handles_both_phases_in_order() {
        let mut bridge = bridge_with(FixedProvider(vec![Candidate {
            complete: "os".to_string(),
            display: "os".to_string(),
            description: "module".to_string(),
            help: "OS routines".to_string(),
            kind: "module".to_string(),
        }]));

        let input = "{\"phase\":\"find_start\",\"column\":7}\n\
                     {\"phase\":\"complete\",\"source\":\"import \",\"row\":1,\"column\":7}\n";
        let responses = run_session(&mut bridge, input);

        assert_eq!(responses[0], serde_json::json!({ "col": 7 }));
        assert_eq!(responses[1]["entries"][0]["word"], "os");
    }
}
