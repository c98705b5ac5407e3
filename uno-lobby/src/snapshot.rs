use serde::Serialize;
use uno_engine::{
    card::{Card, CardColor},
    round::{Round, RoundPhase},
};

use crate::repository::GameId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Lobby,
    Playing,
}

impl From<RoundPhase> for GameStatus {
    fn from(phase: RoundPhase) -> Self {
        match phase {
            RoundPhase::Lobby => GameStatus::Lobby,
            RoundPhase::Playing => GameStatus::Playing,
        }
    }
}

/// A card as observers see it. Played wild cards show their chosen color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    #[serde(rename = "type")]
    pub kind: String,
    pub color: Option<CardColor>,
    pub number: Option<u8>,
    pub chosen_color: Option<CardColor>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        CardView {
            kind: card.kind().to_string(),
            color: card.active_color(),
            number: card.number(),
            chosen_color: card.chosen_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub index: usize,
    pub name: String,
    pub hand_size: usize,
    /// Only filled in for the player the snapshot was taken for.
    pub cards: Vec<CardView>,
    pub has_declared_uno: bool,
}

/// The state of one game, as broadcast to everyone watching it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub id: GameId,
    pub players: Vec<PlayerView>,
    pub current_player: usize,
    pub top_card: Option<CardView>,
    pub direction: i8,
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Takes a snapshot of `round`, revealing only `requester`'s cards.
    pub fn capture(id: GameId, round: &Round, requester: Option<usize>) -> Self {
        let players = round
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerView {
                index,
                name: player.name().to_string(),
                hand_size: player.cards_count(),
                cards: if requester == Some(index) {
                    player.hand().iter().map(CardView::from).collect()
                } else {
                    Vec::new()
                },
                has_declared_uno: player.uno_declared(),
            })
            .collect();

        GameSnapshot {
            id,
            players,
            current_player: round.current_player(),
            top_card: round.top_card().ok().map(CardView::from),
            direction: round.direction().into(),
            status: round.phase().into(),
        }
    }
}
