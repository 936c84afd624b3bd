//! Child-process provider speaking the engine wire protocol over stdio.

use std::io::{BufReader, BufWriter};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use super::{Candidate, CompletionProvider, protocol};
use crate::error::{BridgeError, BridgeResult};

/// A completion engine running as a spawned child process.
///
/// Requests are strictly serial: the host blocks on each completion popup,
/// so there is never more than one request in flight.
pub struct ProcessProvider {
    process: Child,
    stdin: BufWriter<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    next_request_id: u64,
    initialized: bool,
    search_paths: Vec<String>,
}

impl std::fmt::Debug for ProcessProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessProvider")
            .field("pid", &self.process.id())
            .field("next_request_id", &self.next_request_id)
            .field("initialized", &self.initialized)
            .finish()
    }
}

impl ProcessProvider {
    /// Spawns the engine process with piped stdio.
    ///
    /// The initialize handshake is deferred to the first request so that a
    /// slow engine startup does not delay bridge startup.
    ///
    /// # Errors
    /// Returns an error if the process fails to spawn or its stdio handles
    /// cannot be obtained.
    pub fn spawn(program: &str, args: &[String], search_paths: Vec<String>) -> BridgeResult<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| BridgeError::spawn(program, source))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| BridgeError::protocol(format!("failed to obtain stdin for {program}")))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BridgeError::protocol(format!("failed to obtain stdout for {program}")))?;

        Ok(Self {
            process: child,
            stdin: BufWriter::new(stdin),
            stdout: BufReader::new(stdout),
            next_request_id: 1,
            initialized: false,
            search_paths,
        })
    }

    /// Performs the one-time initialize handshake, handing the engine its
    /// extra module search paths. Idempotent; later calls are no-ops.
    pub fn initialize(&mut self) -> BridgeResult<()> {
        if self.initialized {
            return Ok(());
        }

        let id = self.next_id();
        let request = protocol::build_initialize_request(id, &self.search_paths);
        protocol::write_message(&mut self.stdin, &request)?;

        let response = protocol::read_message(&mut self.stdout)?;
        protocol::take_result(response, id)?;

        self.initialized = true;
        log::debug!("provider initialized (pid {})", self.process.id());
        Ok(())
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

impl CompletionProvider for ProcessProvider {
    fn complete(&mut self, source: &str, row: u32, column: u32) -> BridgeResult<Vec<Candidate>> {
        self.initialize()?;

        let id = self.next_id();
        let request = protocol::build_complete_request(id, source, row, column);
        protocol::write_message(&mut self.stdin, &request)?;

        let response = protocol::read_message(&mut self.stdout)?;
        let result = protocol::take_result(response, id)?;
        protocol::parse_candidates(result)
    }
}

impl Drop for ProcessProvider {
    fn drop(&mut self) {
        // Best effort: tell the engine to go away, then make sure it does.
        let _ = protocol::write_message(&mut self.stdin, &protocol::build_shutdown_notification());
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
