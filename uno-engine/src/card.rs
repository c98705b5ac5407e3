use core::fmt;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    EnumString,
    EnumCountMacro,
    EnumIter,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardColor {
    Red,
    Green,
    Blue,
    Yellow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    Draw,
}

/// A single card.
///
/// Wild cards carry the color picked by the player who put them on the
/// discard pile. While a wild card sits in a deck or a hand the color is
/// always `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild(Option<CardColor>),
    WildDraw(Option<CardColor>),
}

/// The discriminator used by the plain-record format.
#[derive(Clone, Copy, Debug, Display, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CardKind {
    Numbered,
    Skip,
    Reverse,
    Draw,
    Wild,
    #[strum(to_string = "WILD DRAW", serialize = "WILD_DRAW")]
    WildDraw,
}

impl Card {
    pub const fn numbered(color: CardColor, number: u8) -> Self {
        Card::Colored(color, ColoredCard::Number(number))
    }

    pub const fn skip(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::Skip)
    }

    pub const fn reverse(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::Reverse)
    }

    pub const fn draw(color: CardColor) -> Self {
        Card::Colored(color, ColoredCard::Draw)
    }

    pub fn kind(&self) -> CardKind {
        match self {
            Card::Colored(_, ColoredCard::Number(_)) => CardKind::Numbered,
            Card::Colored(_, ColoredCard::Skip) => CardKind::Skip,
            Card::Colored(_, ColoredCard::Reverse) => CardKind::Reverse,
            Card::Colored(_, ColoredCard::Draw) => CardKind::Draw,
            Card::Wild(_) => CardKind::Wild,
            Card::WildDraw(_) => CardKind::WildDraw,
        }
    }

    /// The color printed on the card. Wild cards have none.
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild(_) | Card::WildDraw(_) => None,
        }
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            Card::Colored(_, ColoredCard::Number(number)) => Some(*number),
            _ => None,
        }
    }

    pub fn chosen_color(&self) -> Option<CardColor> {
        match self {
            Card::Wild(chosen) | Card::WildDraw(chosen) => *chosen,
            Card::Colored(_, _) => None,
        }
    }

    /// The color this card counts as when it is the top of the discard pile.
    pub fn active_color(&self) -> Option<CardColor> {
        self.color().or_else(|| self.chosen_color())
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild(_) | Card::WildDraw(_))
    }

    /// Returns a copy of a wild card with `color` recorded as its chosen color.
    /// Colored cards are returned unchanged.
    pub fn with_chosen_color(self, color: CardColor) -> Self {
        match self {
            Card::Wild(_) => Card::Wild(Some(color)),
            Card::WildDraw(_) => Card::WildDraw(Some(color)),
            colored => colored,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => {
                write!(f, "{} {}", color, {
                    match card {
                        ColoredCard::Number(number) => number.to_string(),
                        ColoredCard::Skip => "Skip".to_string(),
                        ColoredCard::Reverse => "Reverse".to_string(),
                        ColoredCard::Draw => "Draw".to_string(),
                    }
                })
            }
            Card::Wild(None) => write!(f, "Wild"),
            Card::Wild(Some(color)) => write!(f, "Wild ({color})"),
            Card::WildDraw(None) => write!(f, "Wild Draw"),
            Card::WildDraw(Some(color)) => write!(f, "Wild Draw ({color})"),
        }
    }
}
