use strum::EnumCount;

use crate::card::CardColor;

pub(crate) const MAX_CARD_NUMBER: u8 = 9;

/// Copies of `number` in each color: a single zero, two of everything else.
pub(crate) const fn copies_of_number(number: u8) -> u8 {
    if number == 0 {
        1
    } else {
        2
    }
}

/// Copies of each of Skip, Reverse and Draw in each color.
pub(crate) const ACTION_COPIES_PER_COLOR: u8 = 2;
pub(crate) const ACTION_KINDS: u8 = 3;

/// Copies of Wild, and separately of Wild Draw.
pub(crate) const WILD_COPIES: u8 = 4;

const fn colored_cards_per_color() -> u8 {
    let mut count = 0;
    let mut number = 0;
    while number <= MAX_CARD_NUMBER {
        count += copies_of_number(number);
        number += 1;
    }
    count + ACTION_KINDS * ACTION_COPIES_PER_COLOR
}

pub const TOTAL_CARDS_IN_DECK: u8 =
    colored_cards_per_color() * CardColor::COUNT as u8 + 2 * WILD_COPIES;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const DEFAULT_HAND_SIZE: usize = 7;

pub(crate) const DRAW_PENALTY: usize = 2;
pub(crate) const WILD_DRAW_PENALTY: usize = 4;
pub(crate) const UNO_PENALTY: usize = 2;
