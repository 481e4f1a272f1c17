//! Voter tabs

use serde::Serialize;

use crate::types::{Reaction, ReactionId, ReactionKind};

/// Tabs of the voters modal
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
pub enum VoterTab {
    #[default]
    All,
    Upvoters,
    Downvoters,
}

impl VoterTab {
    /// All tabs in display order
    pub fn all() -> &'static [VoterTab] {
        &[VoterTab::All, VoterTab::Upvoters, VoterTab::Downvoters]
    }

    pub fn title(&self) -> &'static str {
        match self {
            VoterTab::All => "All",
            VoterTab::Upvoters => "Upvoters",
            VoterTab::Downvoters => "Downvoters",
        }
    }
}

impl std::fmt::Display for VoterTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Resolved reactions split by kind
///
/// Every list keeps the order of the input ids.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct VoterTabs {
    all: Vec<Reaction>,
    upvoters: Vec<Reaction>,
    downvoters: Vec<Reaction>,
    /// Ids that did not resolve to a reaction
    unresolved: Vec<ReactionId>,
    /// Tab shown when the modal opens
    active: VoterTab,
}

impl VoterTabs {
    /// Partition resolved reactions; `unresolved` is kept for reporting only
    pub fn partition(reactions: Vec<Reaction>, unresolved: Vec<ReactionId>) -> Self {
        let (upvoters, downvoters): (Vec<Reaction>, Vec<Reaction>) = reactions
            .iter()
            .cloned()
            .partition(|r| r.kind == ReactionKind::Upvote);

        Self {
            all: reactions,
            upvoters,
            downvoters,
            unresolved,
            active: VoterTab::All,
        }
    }

    /// Open on `tab` instead of All
    pub fn with_active(mut self, tab: VoterTab) -> Self {
        self.active = tab;
        self
    }

    pub fn active(&self) -> VoterTab {
        self.active
    }

    pub fn select(&mut self, tab: VoterTab) {
        self.active = tab;
    }

    /// Reactions of the selected tab
    pub fn active_tab(&self) -> &[Reaction] {
        self.tab(self.active)
    }

    pub fn tab(&self, tab: VoterTab) -> &[Reaction] {
        match tab {
            VoterTab::All => &self.all,
            VoterTab::Upvoters => &self.upvoters,
            VoterTab::Downvoters => &self.downvoters,
        }
    }

    pub fn count(&self, tab: VoterTab) -> usize {
        self.tab(tab).len()
    }

    /// Tab header with its count, e.g. "Upvoters (2)"
    pub fn label(&self, tab: VoterTab) -> String {
        format!("{} ({})", tab.title(), self.count(tab))
    }

    /// Number of ids the modal was opened with, found or not
    pub fn requested(&self) -> usize {
        self.all.len() + self.unresolved.len()
    }

    /// Modal header, e.g. "Voters (4)"
    pub fn header(&self) -> String {
        format!("Voters ({})", self.requested())
    }

    pub fn unresolved(&self) -> &[ReactionId] {
        &self.unresolved
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
