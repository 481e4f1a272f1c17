//! Voters
//!
//! Backs the voters modal: resolve reaction ids to reactions, then split
//! them into All / Upvoters / Downvoters tabs.

mod loader;
mod tabs;

pub use loader::{VoterLoader, VotersOutcome};
pub use tabs::{VoterTab, VoterTabs};
