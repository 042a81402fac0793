use cricket_points::{PlayerStat, Role, Squad, SquadEntry};

// ============================================================================
// Squad and stat builders
// ============================================================================

/// Builds squads whose players are named `{prefix}-{role code}{n}`.
pub struct SquadBuilder {
    prefix: String,
    entries: Vec<SquadEntry>,
}

#[allow(dead_code)]
impl SquadBuilder {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role, count: usize) -> Self {
        for _ in 0..count {
            let n = self.entries.iter().filter(|e| e.role == role).count() + 1;
            let name = format!("{}-{}{}", self.prefix, role.code(), n);
            self.entries.push(SquadEntry::new(name, role));
        }
        self
    }

    /// 2 WK, 4 BAT, 2 AR, 4 BWL.
    pub fn with_standard_twelve(self) -> Self {
        self.with_role(Role::WicketKeeper, 2)
            .with_role(Role::Batsman, 4)
            .with_role(Role::AllRounder, 2)
            .with_role(Role::Bowler, 4)
    }

    pub fn with_player(mut self, entry: SquadEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn names(&self) -> Vec<(String, Role)> {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.role))
            .collect()
    }

    pub fn build(self) -> Squad {
        Squad::new(self.entries)
    }
}

/// A stat line worth exactly `points` for the given role: runs off too few
/// balls to earn strike-rate modifiers, and catches for anything at or
/// above the first milestone.
pub fn stat_worth(name: &str, role: Role, points: u32) -> PlayerStat {
    let catches = points / 8;
    let runs = points % 8;
    PlayerStat::new(name, role)
        .with_batting(runs as i32, 0, 0, 0)
        .with_catches(catches as i32)
}
