use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{Participant, ParticipantId, Squad};
use crate::shared::RepositoryError;

/// Read access to participants and their squads.
#[async_trait]
pub trait SquadRepository: Send + Sync {
    async fn list_participants(&self) -> Result<Vec<Participant>, RepositoryError>;
    async fn get_squad(&self, participant_id: ParticipantId) -> Result<Squad, RepositoryError>;
}

/// Shape of a squads file: one record per participant.
#[derive(Debug, Deserialize)]
struct SquadRecord {
    id: ParticipantId,
    name: String,
    #[serde(default)]
    squad: Squad,
}

/// In-memory implementation of SquadRepository for the command-line runner
/// and tests. Participants are listed in id order.
#[derive(Debug, Default)]
pub struct InMemorySquadRepository {
    participants: Arc<RwLock<BTreeMap<ParticipantId, (Participant, Squad)>>>,
}

impl InMemorySquadRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_squads(squads: Vec<(Participant, Squad)>) -> Self {
        let map = squads
            .into_iter()
            .map(|(participant, squad)| (participant.id, (participant, squad)))
            .collect();

        Self {
            participants: Arc::new(RwLock::new(map)),
        }
    }

    /// Loads participants from a JSON array of `{id, name, squad}` records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<SquadRecord> = serde_json::from_str(json)?;
        Ok(Self::with_squads(
            records
                .into_iter()
                .map(|r| (Participant::new(r.id, r.name), r.squad))
                .collect(),
        ))
    }

    /// Inserts or replaces a participant's squad.
    pub async fn upsert_squad(&self, participant: Participant, squad: Squad) {
        let mut participants = self.participants.write().await;
        participants.insert(participant.id, (participant, squad));
    }
}

#[async_trait]
impl SquadRepository for InMemorySquadRepository {
    #[instrument(skip(self))]
    async fn list_participants(&self) -> Result<Vec<Participant>, RepositoryError> {
        let participants = self.participants.read().await;
        debug!(count = participants.len(), "Listing participants from memory");
        Ok(participants.values().map(|(p, _)| p.clone()).collect())
    }

    #[instrument(skip(self))]
    async fn get_squad(&self, participant_id: ParticipantId) -> Result<Squad, RepositoryError> {
        let participants = self.participants.read().await;
        match participants.get(&participant_id) {
            Some((_, squad)) => Ok(squad.clone()),
            None => {
                warn!(participant_id, "Squad not found in memory");
                Err(RepositoryError::NotFound(format!(
                    "squad for participant {participant_id}"
                )))
            }
        }
    }
}
