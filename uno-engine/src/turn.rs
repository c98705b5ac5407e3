use serde::{Deserialize, Serialize};

use crate::{
    card::{Card, ColoredCard},
    constants::{DRAW_PENALTY, WILD_DRAW_PENALTY},
};

/// Rotational sense in which turns advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

impl From<Direction> for i8 {
    fn from(direction: Direction) -> Self {
        direction.step() as i8
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Clockwise),
            -1 => Ok(Direction::CounterClockwise),
            other => Err(format!("direction must be 1 or -1, got {other}")),
        }
    }
}

/// How a played card moves the turn along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnEffect {
    /// Move ahead this many seats.
    Advance(usize),
    /// Flip the direction, then move ahead one seat.
    Reverse,
    /// Move to the next seat, make that player draw, then move past them.
    ForceDraw(usize),
}

impl TurnEffect {
    pub(crate) fn of(card: &Card, player_count: usize) -> Self {
        match card {
            Card::Colored(_, ColoredCard::Number(_)) | Card::Wild(_) => TurnEffect::Advance(1),
            Card::Colored(_, ColoredCard::Skip) => TurnEffect::Advance(2),
            // With two players a reverse hands the turn straight back.
            Card::Colored(_, ColoredCard::Reverse) if player_count == 2 => TurnEffect::Advance(2),
            Card::Colored(_, ColoredCard::Reverse) => TurnEffect::Reverse,
            Card::Colored(_, ColoredCard::Draw) => TurnEffect::ForceDraw(DRAW_PENALTY),
            Card::WildDraw(_) => TurnEffect::ForceDraw(WILD_DRAW_PENALTY),
        }
    }
}

/// Seat index reached by moving `steps` seats from `from` in `direction`.
pub(crate) fn seat_after(from: usize, direction: Direction, steps: usize, player_count: usize) -> usize {
    let count = player_count as isize;
    let offset = direction.step() * steps as isize;
    (from as isize + offset).rem_euclid(count) as usize
}
