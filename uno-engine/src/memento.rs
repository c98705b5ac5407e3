//! Plain-record snapshots of cards, decks and rounds.
//!
//! A card becomes `{type, color?, number?}`. Fields that do not apply to a
//! card are left out entirely rather than written as `null`:
//!
//! | type                      | color | number |
//! |---------------------------|-------|--------|
//! | `NUMBERED`                | yes   | yes    |
//! | `SKIP`, `REVERSE`, `DRAW` | yes   | no     |
//! | `WILD`, `WILD DRAW`       | no    | no     |
//!
//! Wild cards lying face-up on a discard pile additionally carry
//! `chosenColor`. Cards in a deck never do, so deck records always have the
//! three-field shape above.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, CardColor, CardKind, ColoredCard},
    constants::MAX_CARD_NUMBER,
    error::MementoError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen_color: Option<String>,
}

/// Everything needed to resume a round exactly where it was left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundMemento {
    pub players: Vec<String>,
    pub dealer: usize,
    pub current_player: usize,
    pub direction: i8,
    pub deck: Vec<CardRecord>,
    pub hands: Vec<Vec<CardRecord>>,
    pub discard_pile: Vec<CardRecord>,
    pub uno_declared: Vec<bool>,
}

fn color_name(color: CardColor) -> String {
    color.to_string().to_uppercase()
}

fn parse_color(name: &str) -> Result<CardColor, MementoError> {
    CardColor::from_str(name).map_err(|_| MementoError::InvalidColor(name.to_string()))
}

impl From<&Card> for CardRecord {
    fn from(card: &Card) -> Self {
        CardRecord {
            kind: card.kind().to_string(),
            color: card.color().map(color_name),
            number: card.number(),
            chosen_color: card.chosen_color().map(color_name),
        }
    }
}

impl TryFrom<CardRecord> for Card {
    type Error = MementoError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let kind = CardKind::from_str(&record.kind)
            .map_err(|_| MementoError::UnknownType(record.kind.clone()))?;

        let color = || -> Result<CardColor, MementoError> {
            let name = record
                .color
                .as_deref()
                .ok_or(MementoError::MissingField { kind, field: "color" })?;
            parse_color(name)
        };
        let chosen_color = record.chosen_color.as_deref().map(parse_color).transpose()?;

        if chosen_color.is_some() && !matches!(kind, CardKind::Wild | CardKind::WildDraw) {
            return Err(MementoError::UnexpectedChosenColor(kind));
        }

        let card = match kind {
            CardKind::Numbered => {
                let number = record
                    .number
                    .ok_or(MementoError::MissingField { kind, field: "number" })?;
                if number > MAX_CARD_NUMBER {
                    return Err(MementoError::NumberOutOfRange(number));
                }
                Card::Colored(color()?, ColoredCard::Number(number))
            }
            CardKind::Skip => Card::Colored(color()?, ColoredCard::Skip),
            CardKind::Reverse => Card::Colored(color()?, ColoredCard::Reverse),
            CardKind::Draw => Card::Colored(color()?, ColoredCard::Draw),
            CardKind::Wild => Card::Wild(chosen_color),
            CardKind::WildDraw => Card::WildDraw(chosen_color),
        };

        Ok(card)
    }
}

pub(crate) fn cards_from_records<C>(records: Vec<CardRecord>) -> Result<C, MementoError>
where
    C: FromIterator<Card>,
{
    records.into_iter().map(Card::try_from).collect()
}

/// Like [`cards_from_records`], for cards nobody has played yet: a deck or a
/// hand. Only a played wild has a chosen color, so one here is rejected.
pub(crate) fn unplayed_cards_from_records<C>(records: Vec<CardRecord>) -> Result<C, MementoError>
where
    C: FromIterator<Card>,
{
    records
        .into_iter()
        .map(|record| {
            let card = Card::try_from(record)?;
            match card.chosen_color() {
                Some(_) => Err(MementoError::UnplayedChosenColor(card.kind())),
                None => Ok(card),
            }
        })
        .collect()
}
