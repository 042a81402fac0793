use strum::IntoEnumIterator;

use crate::scoring::Role;

use super::RoleCounts;

/// Inclusive bounds on how many players of one role a lineup may field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleQuota {
    pub min: usize,
    pub max: usize,
}

impl RoleQuota {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineupRules {
    pub lineup_size: usize,
    pub wicket_keepers: RoleQuota,
    pub batsmen: RoleQuota,
    pub all_rounders: RoleQuota,
    pub bowlers: RoleQuota,
}

impl Default for LineupRules {
    fn default() -> Self {
        Self {
            lineup_size: 11,
            wicket_keepers: RoleQuota::new(1, 4),
            batsmen: RoleQuota::new(3, 6),
            all_rounders: RoleQuota::new(1, 4),
            bowlers: RoleQuota::new(3, 6),
        }
    }
}

impl LineupRules {
    pub fn quota(&self, role: Role) -> RoleQuota {
        match role {
            Role::WicketKeeper => self.wicket_keepers,
            Role::Batsman => self.batsmen,
            Role::AllRounder => self.all_rounders,
            Role::Bowler => self.bowlers,
        }
    }

    /// Every role composition within quota that fills the lineup exactly.
    pub fn compositions(&self) -> Vec<RoleCounts> {
        let mut compositions = Vec::new();
        for w in self.wicket_keepers.min..=self.wicket_keepers.max {
            for b in self.batsmen.min..=self.batsmen.max {
                for a in self.all_rounders.min..=self.all_rounders.max {
                    let used = w + b + a;
                    if used >= self.lineup_size {
                        continue;
                    }
                    let o = self.lineup_size - used;
                    if (self.bowlers.min..=self.bowlers.max).contains(&o) {
                        compositions.push(RoleCounts::new(w, b, a, o));
                    }
                }
            }
        }
        compositions
    }

    /// Whether a lineup composition satisfies every quota and the size.
    pub fn allows(&self, counts: &RoleCounts) -> bool {
        counts.total() == self.lineup_size
            && Role::iter().all(|role| {
                let quota = self.quota(role);
                (quota.min..=quota.max).contains(&counts.get(role))
            })
    }
}
