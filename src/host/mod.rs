//! Editor-facing types: completion entries and the two-phase request
//! protocol spoken with the host plugin.

pub mod entry;
pub mod protocol;

pub use entry::{CompletionEntry, MatchFlags};
pub use protocol::{HostRequest, HostResponse};
