use cricket_points::{
    AppError, Config, InMemorySquadRepository, JsonFileLeaderboardRepository, JsonFileMatchSource,
    LeaderboardRecord, LeaderboardService, LeaderboardView,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: cricket_points <gameweek> <match-file>...";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let gameweek: u32 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| AppError::Usage(USAGE.to_string()))?;
    let match_files: Vec<String> = args.collect();
    if match_files.is_empty() {
        return Err(AppError::Usage(USAGE.to_string()));
    }

    info!(
        gameweek,
        matches = match_files.len(),
        squads = %config.squads_path.display(),
        leaderboard = %config.leaderboard_path.display(),
        "Starting gameweek run"
    );

    let squads_json = tokio::fs::read_to_string(&config.squads_path).await?;
    let squads = Arc::new(InMemorySquadRepository::from_json(&squads_json)?);
    let leaderboard =
        Arc::new(JsonFileLeaderboardRepository::open(&config.leaderboard_path).await?);
    let service =
        LeaderboardService::builder(Arc::new(JsonFileMatchSource::new()), squads, leaderboard)
            .build();

    let report = service.process_gameweek(gameweek, &match_files).await?;
    for failure in &report.match_failures {
        error!(url = failure.url(), %failure, "Match could not be scored");
    }
    for failure in &report.participant_failures {
        error!(
            participant_id = failure.participant.id,
            participant = %failure.participant.name,
            error = %failure.error,
            "Participant skipped"
        );
    }
    for warning in &report.warnings {
        warn!(player = %warning.player, warning = %warning.warning, "Statistic clamped");
    }

    let gameweek_table: Vec<LeaderboardRecord> = service
        .get_leaderboard(LeaderboardView::Gameweek(gameweek))
        .await?
        .iter()
        .map(LeaderboardRecord::from)
        .collect();
    let cumulative_table: Vec<LeaderboardRecord> = service
        .get_leaderboard(LeaderboardView::Cumulative)
        .await?
        .iter()
        .map(LeaderboardRecord::from)
        .collect();

    let output = json!({
        "gameweek": gameweek,
        "leaderboard": gameweek_table,
        "cumulative": cumulative_table,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
