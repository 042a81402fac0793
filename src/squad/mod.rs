mod errors;
pub mod models;
pub mod repository;
pub mod validator;

pub use errors::ValidationError;
pub use models::{Participant, ParticipantId, Squad, SquadEntry};
pub use repository::{InMemorySquadRepository, SquadRepository};
pub use validator::{SquadRules, SquadValidator};
