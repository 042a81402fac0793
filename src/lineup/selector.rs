use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::debug;

use super::{Best11Result, InsufficientDataError, LineupRules, RoleCounts, SelectedPlayer};
use crate::scoring::{Role, ScoreSheet};
use crate::squad::{Squad, SquadEntry};

#[derive(Debug, Clone)]
struct Candidate<'a> {
    position: usize,
    entry: &'a SquadEntry,
    points: f64,
}

/// One role's eligible players, best first, with running totals so the
/// value of taking the top `k` is a lookup.
struct RolePool<'a> {
    candidates: Vec<Candidate<'a>>,
    prefix: Vec<f64>,
}

impl<'a> RolePool<'a> {
    fn new(mut candidates: Vec<Candidate<'a>>) -> Self {
        candidates.sort_by(|a, b| {
            b.points
                .total_cmp(&a.points)
                .then_with(|| a.position.cmp(&b.position))
        });

        let mut prefix = Vec::with_capacity(candidates.len() + 1);
        prefix.push(0.0);
        for candidate in &candidates {
            let running = prefix[prefix.len() - 1];
            prefix.push(running + candidate.points);
        }

        Self { candidates, prefix }
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }

    fn top(&self, k: usize) -> f64 {
        self.prefix[k]
    }
}

/// Picks the highest-scoring lineup that honours the role quotas.
///
/// Every quota-satisfying composition is tried; within a composition the
/// best players of each role are always the right choice, so the search is
/// exact while only visiting a few dozen compositions.
#[derive(Debug, Clone, Default)]
pub struct Best11Selector {
    rules: LineupRules,
}

impl Best11Selector {
    pub fn new(rules: LineupRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> LineupRules {
        self.rules
    }

    pub fn select(
        &self,
        squad: &Squad,
        scores: &ScoreSheet,
    ) -> Result<Best11Result, InsufficientDataError> {
        let mut grouped: BTreeMap<Role, Vec<Candidate>> = BTreeMap::new();
        for (position, entry) in squad.eligible() {
            grouped.entry(entry.role).or_default().push(Candidate {
                position,
                entry,
                points: scores.points_for(&entry.name),
            });
        }

        let mut pools: BTreeMap<Role, RolePool> = Role::iter()
            .map(|role| (role, RolePool::new(grouped.remove(&role).unwrap_or_default())))
            .collect();

        let mut available = RoleCounts::default();
        for (role, pool) in &pools {
            *available.slot(*role) = pool.len();
        }

        let mut best: Option<(f64, RoleCounts)> = None;
        for composition in self.rules.compositions() {
            let feasible = Role::iter().all(|role| composition.get(role) <= available.get(role));
            if !feasible {
                continue;
            }

            let total: f64 = pools
                .iter()
                .map(|(role, pool)| pool.top(composition.get(*role)))
                .sum();

            if best.map_or(true, |(best_total, _)| total > best_total) {
                best = Some((total, composition));
            }
        }

        let Some((total, composition)) = best else {
            debug!(%available, "No feasible lineup composition");
            return Err(InsufficientDataError { available });
        };

        let mut selected = Vec::with_capacity(self.rules.lineup_size);
        let mut excluded: Vec<(usize, SquadEntry)> = Vec::new();
        for (role, pool) in pools.iter_mut() {
            let take = composition.get(*role);
            for (rank, candidate) in pool.candidates.drain(..).enumerate() {
                if rank < take {
                    selected.push(SelectedPlayer {
                        entry: candidate.entry.clone(),
                        points: candidate.points,
                    });
                } else {
                    excluded.push((candidate.position, candidate.entry.clone()));
                }
            }
        }
        excluded.sort_by_key(|(position, _)| *position);

        debug!(total, %composition, "Selected best lineup");

        Ok(Best11Result {
            selected,
            total,
            excluded: excluded.into_iter().map(|(_, entry)| entry).collect(),
            composition,
        })
    }
}

/// Selects with the default quotas.
pub fn select_best_11(
    squad: &Squad,
    scores: &ScoreSheet,
) -> Result<Best11Result, InsufficientDataError> {
    Best11Selector::default().select(squad, scores)
}
