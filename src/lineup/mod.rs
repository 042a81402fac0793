mod errors;
pub mod models;
pub mod rules;
pub mod selector;

pub use errors::InsufficientDataError;
pub use models::{Best11Result, RoleCounts, SelectedPlayer};
pub use rules::{LineupRules, RoleQuota};
pub use selector::{select_best_11, Best11Selector};
