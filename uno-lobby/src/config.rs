use std::{env::var, str::FromStr};

use uno_engine::constants::{DEFAULT_HAND_SIZE, MAX_PLAYERS, MIN_PLAYERS};

use crate::error::{LobbyError, Result};

pub const DEFAULT_MAX_PLAYERS: usize = 5;

/// Settings for a [`GameService`](crate::service::GameService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Seats a lobby accepts through `join_game`.
    pub max_players: usize,
    /// Cards dealt to each player when a game starts.
    pub hand_size: usize,
    /// Seed for deck shuffles. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
        }
    }
}

impl LobbyConfig {
    /// Reads `UNO_MAX_PLAYERS`, `UNO_HAND_SIZE` and `UNO_SEED`, falling back
    /// to the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_players: env_or("UNO_MAX_PLAYERS", defaults.max_players)?,
            hand_size: env_or("UNO_HAND_SIZE", defaults.hand_size)?,
            seed: env_opt("UNO_SEED")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(LobbyError::Config(format!(
                "max_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.max_players
            )));
        }
        if self.hand_size == 0 {
            return Err(LobbyError::Config("hand_size must be positive".to_string()));
        }
        Ok(())
    }
}

fn env_opt<T: FromStr>(key: &str) -> Result<Option<T>> {
    match var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| LobbyError::Config(format!("`{key}` has an invalid value: {value}"))),
        Err(_) => Ok(None),
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    Ok(env_opt(key)?.unwrap_or(default))
}
