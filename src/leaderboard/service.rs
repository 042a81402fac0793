use chrono::Utc;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::{
    rank_entries, GameweekReport, LeaderboardEntry, LeaderboardError, LeaderboardRepository,
    LeaderboardView, ParticipantError, ParticipantFailure, PlayerWarning,
};
use crate::ingest::{FetchError, MatchStatsSource};
use crate::lineup::{Best11Selector, LineupRules};
use crate::scoring::{PlayerStat, ScoreCalculator, ScoreSheet};
use crate::squad::{Participant, SquadRepository, SquadRules, SquadValidator};

const TOP_SCORERS_LOGGED: usize = 3;

/// Drives scoring, validation and lineup selection for every participant in
/// a gameweek and keeps the leaderboard in step.
pub struct LeaderboardService {
    calculator: ScoreCalculator,
    validator: SquadValidator,
    selector: Best11Selector,
    match_source: Arc<dyn MatchStatsSource>,
    squads: Arc<dyn SquadRepository>,
    leaderboard: Arc<dyn LeaderboardRepository>,
    gameweek_mutexes: Arc<RwLock<HashMap<u32, Arc<AsyncMutex<()>>>>>,
}

impl LeaderboardService {
    pub fn builder(
        match_source: Arc<dyn MatchStatsSource>,
        squads: Arc<dyn SquadRepository>,
        leaderboard: Arc<dyn LeaderboardRepository>,
    ) -> LeaderboardServiceBuilder {
        LeaderboardServiceBuilder::new(match_source, squads, leaderboard)
    }

    /// Fetches every match concurrently, then scores the gameweek from the
    /// matches that could be fetched. Failed matches are reported, not fatal.
    #[instrument(skip(self, match_urls), fields(matches = match_urls.len()))]
    pub async fn process_gameweek(
        &self,
        gameweek: u32,
        match_urls: &[String],
    ) -> Result<GameweekReport, LeaderboardError> {
        ensure_valid_gameweek(gameweek)?;

        let fetched = join_all(
            match_urls
                .iter()
                .map(|url| self.match_source.fetch_match_stats(url)),
        )
        .await;

        let mut per_match_stats = Vec::with_capacity(fetched.len());
        let mut match_failures = Vec::new();
        for result in fetched {
            match result {
                Ok(stats) => per_match_stats.push(stats),
                Err(err) => {
                    warn!(url = err.url(), %err, "Skipping match that could not be fetched");
                    match_failures.push(err);
                }
            }
        }

        self.run_gameweek(gameweek, &per_match_stats, match_failures).await
    }

    /// Processes a gameweek from already-parsed statistics, one list per
    /// match. Reprocessing a gameweek replaces its stored points.
    #[instrument(skip(self, per_match_stats), fields(matches = per_match_stats.len()))]
    pub async fn process_gameweek_stats(
        &self,
        gameweek: u32,
        per_match_stats: &[Vec<PlayerStat>],
    ) -> Result<GameweekReport, LeaderboardError> {
        ensure_valid_gameweek(gameweek)?;
        self.run_gameweek(gameweek, per_match_stats, Vec::new()).await
    }

    /// Ranked leaderboard for a gameweek or the cumulative table.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(
        &self,
        view: LeaderboardView,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries = self.leaderboard.get_leaderboard(view).await?;
        rank_entries(view, &mut entries);
        Ok(entries)
    }

    /// Scores each match independently and merges the results by player.
    pub fn score_matches(&self, per_match_stats: &[Vec<PlayerStat>]) -> ScoreSheet {
        per_match_stats
            .iter()
            .flat_map(|stats| self.calculator.calculate_scores(stats))
            .collect()
    }

    async fn run_gameweek(
        &self,
        gameweek: u32,
        per_match_stats: &[Vec<PlayerStat>],
        match_failures: Vec<FetchError>,
    ) -> Result<GameweekReport, LeaderboardError> {
        let gameweek_lock = self.gameweek_lock(gameweek).await;
        let _guard = gameweek_lock.lock().await;

        let scores = self.score_matches(per_match_stats);
        for (rank, score) in scores.ranked().iter().take(TOP_SCORERS_LOGGED).enumerate() {
            debug!(
                gameweek,
                rank = rank + 1,
                player = %score.name,
                total_score = score.display_total(),
                matches = score.matches,
                "Top scorer"
            );
        }
        let warnings: Vec<PlayerWarning> = scores
            .iter()
            .flat_map(|score| {
                score.warnings.iter().map(|warning| PlayerWarning {
                    player: score.name.clone(),
                    warning: warning.clone(),
                })
            })
            .collect();

        let participants = self.squads.list_participants().await?;
        let mut entries = Vec::with_capacity(participants.len());
        let mut participant_failures = Vec::new();

        for participant in participants {
            match self.score_participant(gameweek, &participant, &scores).await {
                Ok(entry) => entries.push(entry),
                Err(error) => {
                    warn!(
                        participant_id = participant.id,
                        participant = %participant.name,
                        %error,
                        "Participant skipped for gameweek"
                    );
                    participant_failures.push(ParticipantFailure { participant, error });
                }
            }
        }

        rank_entries(LeaderboardView::Gameweek(gameweek), &mut entries);

        info!(
            gameweek,
            players_scored = scores.len(),
            participants_scored = entries.len(),
            participants_skipped = participant_failures.len(),
            matches_failed = match_failures.len(),
            "Gameweek processed"
        );

        Ok(GameweekReport {
            gameweek,
            entries,
            match_failures,
            participant_failures,
            warnings,
            players_scored: scores.len(),
        })
    }

    /// Nothing is written for a participant unless validation and selection
    /// both succeed.
    async fn score_participant(
        &self,
        gameweek: u32,
        participant: &Participant,
        scores: &ScoreSheet,
    ) -> Result<LeaderboardEntry, ParticipantError> {
        let squad = self.squads.get_squad(participant.id).await?;
        self.validator.validate(&squad)?;
        let best_11 = self.selector.select(&squad, scores)?;

        let entry = LeaderboardEntry {
            participant_id: participant.id,
            participant_name: participant.name.clone(),
            gameweek: LeaderboardView::Gameweek(gameweek),
            gw_points: best_11.total,
            cumulative_points: 0.0,
            best_11: Some(best_11),
            processed_at: Utc::now(),
        };
        self.leaderboard.save_leaderboard_entry(entry.clone()).await?;

        let cumulative_points: f64 = self
            .leaderboard
            .get_participant_entries(participant.id)
            .await?
            .iter()
            .map(|stored| stored.gw_points)
            .sum();

        debug!(
            participant_id = participant.id,
            gw_points = entry.gw_points,
            cumulative_points,
            "Participant scored"
        );

        Ok(LeaderboardEntry {
            cumulative_points,
            ..entry
        })
    }

    async fn gameweek_lock(&self, gameweek: u32) -> Arc<AsyncMutex<()>> {
        {
            let guard = self.gameweek_mutexes.read().await;
            if let Some(lock) = guard.get(&gameweek) {
                return lock.clone();
            }
        }

        let mut guard = self.gameweek_mutexes.write().await;
        guard
            .entry(gameweek)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

fn ensure_valid_gameweek(gameweek: u32) -> Result<(), LeaderboardError> {
    if gameweek == 0 {
        return Err(LeaderboardError::InvalidGameweek(gameweek));
    }
    Ok(())
}

pub struct LeaderboardServiceBuilder {
    calculator: ScoreCalculator,
    squad_rules: SquadRules,
    lineup_rules: LineupRules,
    match_source: Arc<dyn MatchStatsSource>,
    squads: Arc<dyn SquadRepository>,
    leaderboard: Arc<dyn LeaderboardRepository>,
}

impl LeaderboardServiceBuilder {
    fn new(
        match_source: Arc<dyn MatchStatsSource>,
        squads: Arc<dyn SquadRepository>,
        leaderboard: Arc<dyn LeaderboardRepository>,
    ) -> Self {
        Self {
            calculator: ScoreCalculator::new(),
            squad_rules: SquadRules::default(),
            lineup_rules: LineupRules::default(),
            match_source,
            squads,
            leaderboard,
        }
    }

    pub fn with_calculator(mut self, calculator: ScoreCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_squad_rules(mut self, rules: SquadRules) -> Self {
        self.squad_rules = rules;
        self
    }

    pub fn with_lineup_rules(mut self, rules: LineupRules) -> Self {
        self.lineup_rules = rules;
        self
    }

    pub fn build(self) -> LeaderboardService {
        LeaderboardService {
            calculator: self.calculator,
            validator: SquadValidator::new(self.squad_rules),
            selector: Best11Selector::new(self.lineup_rules),
            match_source: self.match_source,
            squads: self.squads,
            leaderboard: self.leaderboard,
            gameweek_mutexes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::InMemoryMatchSource;
    use crate::leaderboard::InMemoryLeaderboardRepository;
    use crate::scoring::Role;
    use crate::shared::RepositoryError;
    use crate::squad::{InMemorySquadRepository, Squad, SquadEntry, ValidationError};

    /// Eleven players, one per slot of a 1-4-2-4 lineup, each scoring
    /// `runs` as a batsman would.
    fn squad(prefix: &str) -> Squad {
        let roles = [
            Role::WicketKeeper,
            Role::Batsman,
            Role::Batsman,
            Role::Batsman,
            Role::Batsman,
            Role::AllRounder,
            Role::AllRounder,
            Role::Bowler,
            Role::Bowler,
            Role::Bowler,
            Role::Bowler,
        ];
        roles
            .iter()
            .enumerate()
            .map(|(i, role)| SquadEntry::new(format!("{prefix}{i}"), *role))
            .collect()
    }

    fn stats_for(prefix: &str, runs: i32) -> Vec<PlayerStat> {
        squad(prefix)
            .entries()
            .iter()
            .map(|e| PlayerStat::new(e.name.clone(), e.role).with_batting(runs, 0, 0, 0))
            .collect()
    }

    fn service(
        squads: InMemorySquadRepository,
    ) -> (LeaderboardService, Arc<InMemoryLeaderboardRepository>) {
        let leaderboard = Arc::new(InMemoryLeaderboardRepository::new());
        let service = LeaderboardService::builder(
            Arc::new(InMemoryMatchSource::new()),
            Arc::new(squads),
            leaderboard.clone(),
        )
        .build();
        (service, leaderboard)
    }

    #[tokio::test]
    async fn scores_each_participant_and_ranks_them() {
        let (service, _) = service(InMemorySquadRepository::with_squads(vec![
            (Participant::new(1, "Asha"), squad("a")),
            (Participant::new(2, "Ben"), squad("b")),
        ]));

        let report = service
            .process_gameweek_stats(1, &[stats_for("a", 10), stats_for("b", 20)])
            .await
            .unwrap();

        assert!(report.is_clean());
        assert_eq!(report.players_scored, 22);
        assert_eq!(report.entries[0].participant_id, 2);
        assert_eq!(report.entries[0].gw_points, 220.0);
        assert_eq!(report.entries[1].gw_points, 110.0);
    }

    #[tokio::test]
    async fn invalid_squad_is_skipped_without_affecting_others() {
        let mut duplicated = squad("a").entries().to_vec();
        duplicated.push(SquadEntry::new("A0", Role::Batsman));

        let (service, leaderboard) = service(InMemorySquadRepository::with_squads(vec![
            (Participant::new(1, "Asha"), Squad::new(duplicated)),
            (Participant::new(2, "Ben"), squad("b")),
        ]));

        let report = service
            .process_gameweek_stats(1, &[stats_for("a", 10), stats_for("b", 20)])
            .await
            .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.participant_failures.len(), 1);
        assert!(matches!(
            report.participant_failures[0].error,
            ParticipantError::Validation(ValidationError::DuplicatePlayer { .. })
        ));
        assert_eq!(leaderboard.entry_count().await, 1);
    }

    #[tokio::test]
    async fn missing_squad_is_reported_per_participant() {
        struct NoSquads;

        #[async_trait::async_trait]
        impl SquadRepository for NoSquads {
            async fn list_participants(&self) -> Result<Vec<Participant>, RepositoryError> {
                Ok(vec![Participant::new(9, "Ghost")])
            }
            async fn get_squad(&self, id: u64) -> Result<Squad, RepositoryError> {
                Err(RepositoryError::NotFound(format!("squad {id}")))
            }
        }

        let service = LeaderboardService::builder(
            Arc::new(InMemoryMatchSource::new()),
            Arc::new(NoSquads),
            Arc::new(InMemoryLeaderboardRepository::new()),
        )
        .build();

        let report = service.process_gameweek_stats(1, &[]).await.unwrap();
        assert!(report.entries.is_empty());
        assert!(matches!(
            report.participant_failures[0].error,
            ParticipantError::Repository(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_reprocessing_of_a_gameweek_does_not_interleave() {
        let (service, leaderboard) = service(InMemorySquadRepository::with_squads(vec![
            (Participant::new(1, "Asha"), squad("a")),
            (Participant::new(2, "Ben"), squad("b")),
        ]));
        let first = vec![stats_for("a", 10), stats_for("b", 20)];
        let second = vec![stats_for("a", 5), stats_for("b", 25)];

        let (first_report, second_report) = tokio::join!(
            service.process_gameweek_stats(1, &first),
            service.process_gameweek_stats(1, &second)
        );
        let points = |report: GameweekReport| -> Vec<(u64, f64, f64)> {
            report
                .entries
                .iter()
                .map(|e| (e.participant_id, e.gw_points, e.cumulative_points))
                .collect()
        };
        let first_points = points(first_report.unwrap());
        let second_points = points(second_report.unwrap());

        // Each run sees only its own writes
        assert_eq!(first_points, vec![(2, 220.0, 220.0), (1, 110.0, 110.0)]);
        assert_eq!(second_points, vec![(2, 275.0, 275.0), (1, 55.0, 55.0)]);

        assert_eq!(leaderboard.entry_count().await, 2);
        let stored: Vec<_> = service
            .get_leaderboard(LeaderboardView::Gameweek(1))
            .await
            .unwrap()
            .iter()
            .map(|e| (e.participant_id, e.gw_points, e.cumulative_points))
            .collect();
        assert!(
            stored == first_points || stored == second_points,
            "stored table mixes both runs: {stored:?}"
        );
    }

    #[tokio::test]
    async fn rejects_gameweek_zero() {
        let (service, _) = service(InMemorySquadRepository::new());
        assert!(matches!(
            service.process_gameweek_stats(0, &[]).await,
            Err(LeaderboardError::InvalidGameweek(0))
        ));
    }

    #[tokio::test]
    async fn failed_matches_are_reported_and_the_rest_scored() {
        let source =
            InMemoryMatchSource::with_matches(vec![("m1".to_string(), stats_for("a", 5))]);
        let leaderboard = Arc::new(InMemoryLeaderboardRepository::new());
        let service = LeaderboardService::builder(
            Arc::new(source),
            Arc::new(InMemorySquadRepository::with_squads(vec![(
                Participant::new(1, "Asha"),
                squad("a"),
            )])),
            leaderboard,
        )
        .build();

        let report = service
            .process_gameweek(1, &["m1".to_string(), "gone".to_string()])
            .await
            .unwrap();

        assert_eq!(report.match_failures.len(), 1);
        assert_eq!(report.match_failures[0].url(), "gone");
        assert_eq!(report.entries[0].gw_points, 55.0);
    }

    #[tokio::test]
    async fn clamped_statistics_surface_as_warnings() {
        let (service, _) = service(InMemorySquadRepository::with_squads(vec![(
            Participant::new(1, "Asha"),
            squad("a"),
        )]));
        let mut stats = stats_for("a", 10);
        stats[0].catches = -1;

        let report = service.process_gameweek_stats(1, &[stats]).await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].player, "a0");
        assert_eq!(report.entries[0].gw_points, 110.0);
    }
}
