//! The completion adapter: provider candidates in, host entries out.

use std::collections::HashSet;

use crate::error::BridgeResult;
use crate::host::entry::{CompletionEntry, MatchFlags};
use crate::provider::CompletionProvider;

/// Translates between the host's completion hook and a completion provider.
///
/// The provider is injected so the adapter has no ambient state of its own;
/// whatever caching the engine keeps across requests is opaque here.
pub struct CompletionAdapter<P> {
    provider: P,
    flags: MatchFlags,
}

impl<P: CompletionProvider> CompletionAdapter<P> {
    pub fn new(provider: P, flags: MatchFlags) -> Self {
        Self { provider, flags }
    }

    /// Column at which completion starts: the cursor column, untouched.
    ///
    /// The engine derives its own prefix from the source text, so no
    /// scan-back over the current line happens on this side.
    pub fn start_column(&self, column: u32) -> u32 {
        column
    }

    /// Fetch candidates for the cursor position and format them for the
    /// host, preserving provider order.
    ///
    /// `row` is 1-based, `column` 0-based; both are forwarded unvalidated,
    /// out-of-range positions are the engine's concern.
    pub fn completions(
        &mut self,
        source: &str,
        row: u32,
        column: u32,
    ) -> BridgeResult<Vec<CompletionEntry>> {
        let candidates = self.provider.complete(source, row, column)?;

        let mut entries: Vec<CompletionEntry> = candidates
            .into_iter()
            .map(|candidate| CompletionEntry::from_candidate(candidate, self.flags))
            .collect();

        if !self.flags.allow_duplicates {
            drop_duplicate_entries(&mut entries);
        }

        Ok(entries)
    }
}

/// Drop entries whose `(word, abbr)` pair already appeared, keeping the
/// first occurrence and the surrounding order.
fn drop_duplicate_entries(entries: &mut Vec<CompletionEntry>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert((entry.word.clone(), entry.abbr.clone())));
}
