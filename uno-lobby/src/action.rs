use serde::{Deserialize, Serialize};
use uno_engine::card::CardColor;

/// A request from one player, as it arrives from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TurnAction {
    Join { name: String },
    Start,
    Play {
        card_index: usize,
        #[serde(default)]
        color: Option<CardColor>,
    },
    Draw,
    DeclareUno,
    CatchUno { target: usize },
}
