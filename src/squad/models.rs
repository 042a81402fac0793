use serde::{Deserialize, Serialize};

use crate::scoring::{player_key, Role};

pub type ParticipantId = u64;

/// An auction-league entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A roster slot owned by a participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadEntry {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub is_ir: bool,
}

impl SquadEntry {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            is_ir: false,
        }
    }

    /// An entry parked on the inactive reserve.
    pub fn inactive(name: impl Into<String>, role: Role) -> Self {
        Self {
            is_ir: true,
            ..Self::new(name, role)
        }
    }

    pub fn key(&self) -> String {
        player_key(&self.name)
    }
}

/// A participant's roster in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Squad {
    entries: Vec<SquadEntry>,
}

impl Squad {
    pub fn new(entries: Vec<SquadEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SquadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn inactive_reserve_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_ir).count()
    }

    /// Entries that may be picked for a lineup, paired with their squad
    /// position.
    pub fn eligible(&self) -> impl Iterator<Item = (usize, &SquadEntry)> {
        self.entries.iter().enumerate().filter(|(_, e)| !e.is_ir)
    }
}

impl FromIterator<SquadEntry> for Squad {
    fn from_iter<I: IntoIterator<Item = SquadEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
