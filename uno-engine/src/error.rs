use std::fmt::Debug;

use thiserror::Error;

use crate::card::CardKind;

/// Precondition violations. Game-logic refusals (illegal moves, an empty
/// deck mid-round, a callout that does not apply) are never reported
/// through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players: {0}")]
    NotEnoughPlayers(usize),
    #[error("Too many players: {0}")]
    TooManyPlayers(usize),
    #[error("Player index out of bounds: {index} (player count {count})")]
    PlayerIndexOutOfBounds { index: usize, count: usize },
    #[error("No cards in discard pile")]
    EmptyDiscardPile,
    #[error("A color must be chosen when playing a wild card")]
    MissingChosenColor,
    #[error("Deck exhausted before starting")]
    DeckExhausted,
    #[error("Invalid round memento: {0}")]
    InvalidMemento(String),
    #[error(transparent)]
    Memento(#[from] MementoError),
}

/// Validation failures while rebuilding cards from plain records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MementoError {
    #[error("Unknown card type: {0}")]
    UnknownType(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Missing field `{field}` for card type {kind}")]
    MissingField { kind: CardKind, field: &'static str },
    #[error("Card number {0} is out of range")]
    NumberOutOfRange(u8),
    #[error("Card type {0} cannot carry a chosen color")]
    UnexpectedChosenColor(CardKind),
    #[error("Unplayed {0} card cannot carry a chosen color")]
    UnplayedChosenColor(CardKind),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
