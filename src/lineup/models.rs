use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::Role;
use crate::squad::SquadEntry;

/// Per-role player counts, either for a lineup or an eligible pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    pub wicket_keepers: usize,
    pub batsmen: usize,
    pub all_rounders: usize,
    pub bowlers: usize,
}

impl RoleCounts {
    pub fn new(wicket_keepers: usize, batsmen: usize, all_rounders: usize, bowlers: usize) -> Self {
        Self {
            wicket_keepers,
            batsmen,
            all_rounders,
            bowlers,
        }
    }

    pub fn get(&self, role: Role) -> usize {
        match role {
            Role::WicketKeeper => self.wicket_keepers,
            Role::Batsman => self.batsmen,
            Role::AllRounder => self.all_rounders,
            Role::Bowler => self.bowlers,
        }
    }

    pub fn slot(&mut self, role: Role) -> &mut usize {
        match role {
            Role::WicketKeeper => &mut self.wicket_keepers,
            Role::Batsman => &mut self.batsmen,
            Role::AllRounder => &mut self.all_rounders,
            Role::Bowler => &mut self.bowlers,
        }
    }

    pub fn total(&self) -> usize {
        self.wicket_keepers + self.batsmen + self.all_rounders + self.bowlers
    }
}

impl fmt::Display for RoleCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WK {}, BAT {}, AR {}, BWL {}",
            self.wicket_keepers, self.batsmen, self.all_rounders, self.bowlers
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPlayer {
    #[serde(flatten)]
    pub entry: SquadEntry,
    pub points: f64,
}

/// The highest-scoring legal lineup for one participant in one gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Best11Result {
    /// Grouped by role (WK, BAT, AR, BWL), best first within each role.
    pub selected: Vec<SelectedPlayer>,
    pub total: f64,
    /// Eligible entries left out, in squad order. Inactive reserves never
    /// appear here.
    pub excluded: Vec<SquadEntry>,
    pub composition: RoleCounts,
}

impl Best11Result {
    pub fn contains(&self, name: &str) -> bool {
        let key = crate::scoring::player_key(name);
        self.selected.iter().any(|p| p.entry.key() == key)
    }
}
