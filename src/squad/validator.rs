use std::collections::HashSet;

use super::{Squad, ValidationError};

/// Squad composition limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadRules {
    /// At this size exactly one inactive reserve is mandatory.
    pub max_size: usize,
    pub max_inactive_reserves: usize,
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            max_size: 19,
            max_inactive_reserves: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SquadValidator {
    rules: SquadRules,
}

impl SquadValidator {
    pub fn new(rules: SquadRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> SquadRules {
        self.rules
    }

    pub fn validate(&self, squad: &Squad) -> Result<(), ValidationError> {
        let size = squad.len();
        if size > self.rules.max_size {
            return Err(ValidationError::Oversize {
                size,
                max: self.rules.max_size,
            });
        }

        let mut seen = HashSet::with_capacity(size);
        for entry in squad.entries() {
            if !seen.insert(entry.key()) {
                return Err(ValidationError::DuplicatePlayer {
                    name: entry.name.clone(),
                });
            }
        }

        let reserves = squad.inactive_reserve_count();
        if reserves > self.rules.max_inactive_reserves {
            return Err(ValidationError::TooManyInactiveReserves { count: reserves });
        }
        if size == self.rules.max_size && reserves == 0 {
            return Err(ValidationError::MissingInactiveReserve { size });
        }

        Ok(())
    }
}
