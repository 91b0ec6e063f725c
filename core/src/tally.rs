use serde::{Deserialize, Serialize};

use crate::*;

/// Running counters of what the player did during one game.
///
/// Aggregating tallies across games is left to the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Safe cells the player opened, cascades included. Cells exposed by a loss do not count.
    pub revealed: u32,
    /// Mines set off by the player.
    pub exploded: u32,
    /// Flags placed, removals are not counted.
    pub flagged: u32,
}

impl Tally {
    pub(crate) fn record_reveal(&mut self, summary: RevealSummary) {
        if summary.detonated {
            self.exploded = self.exploded.saturating_add(1);
        } else {
            self.revealed = self.revealed.saturating_add(summary.revealed.into());
        }
    }

    pub(crate) fn record_flag(&mut self) {
        self.flagged = self.flagged.saturating_add(1);
    }
}
