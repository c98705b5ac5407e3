use std::{env, fs};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uno_lobby::{
    action::TurnAction, config::LobbyConfig, repository::InMemoryRepository,
    service::GameService,
};

/// A recorded game: who sits down and what each of them does, in order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Script {
    players: Vec<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    #[serde(default)]
    player: usize,
    #[serde(flatten)]
    action: TurnAction,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let path = env::args()
        .nth(1)
        .ok_or_else(|| eyre!("usage: uno-replay <script.json>"))?;
    let contents = fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read {path}"))?;
    let script: Script = serde_json::from_str(&contents).wrap_err("Failed to parse script")?;

    let mut config = LobbyConfig::from_env()?;
    if let Some(seed) = script.seed {
        config.seed = Some(seed);
    }
    if let Some(hand_size) = script.hand_size {
        config.hand_size = hand_size;
    }
    config.validate()?;

    let service = GameService::new(InMemoryRepository::new(), config);
    let created = service.create_game(script.players).await?;
    let id = created.id;
    info!(%id, steps = script.steps.len(), "replaying script");

    let mut snapshots = vec![created];
    for (number, step) in script.steps.into_iter().enumerate() {
        match service.perform(id, step.player, step.action).await {
            Ok(snapshot) => snapshots.push(snapshot),
            Err(error) => warn!(step = number, player = step.player, %error, "step refused"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
