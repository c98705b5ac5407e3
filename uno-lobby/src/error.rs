use std::fmt::Debug;

use thiserror::Error;
use uno_engine::error::UnoError;

use crate::repository::GameId;

#[derive(Error, Debug)]
pub enum LobbyError {
    #[error("Game not found: {0}")]
    GameNotFound(GameId),
    #[error("Game is full")]
    GameFull,
    #[error("Player name already exists in this game: {0}")]
    NameTaken(String),
    #[error("Game has already started")]
    AlreadyStarted,
    #[error("Game has not started yet")]
    NotStarted,
    #[error("Need at least 2 players to start the game")]
    NotEnoughPlayers,
    #[error("Not your turn. Current player is {current}, you are {requested}")]
    NotYourTurn { current: usize, requested: usize },
    #[error("Invalid move")]
    InvalidMove,
    #[error("No more cards to draw")]
    DeckEmpty,
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Uno(#[from] UnoError),
}

pub type Result<T, E = LobbyError> = std::result::Result<T, E>;
