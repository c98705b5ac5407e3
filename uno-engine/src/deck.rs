use std::collections::VecDeque;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::*,
    error::MementoError,
    memento::{unplayed_cards_from_records, CardRecord},
};

/// The draw pile. The front of the deck is the next card to be dealt.
///
/// `Deck::default()` is an empty deck; `Deck::new()` is the standard one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CardRecord>", try_from = "Vec<CardRecord>")]
pub struct Deck(pub(crate) VecDeque<Card>);

impl Deck {
    /// A fresh, unshuffled 108 card deck.
    pub fn new() -> Self {
        let mut cards = VecDeque::with_capacity(TOTAL_CARDS_IN_DECK.into());

        for color in CardColor::iter() {
            for number in 0..=MAX_CARD_NUMBER {
                for _ in 0..copies_of_number(number) {
                    cards.push_back(Card::numbered(color, number));
                }
            }
            for action in [ColoredCard::Skip, ColoredCard::Reverse, ColoredCard::Draw] {
                for _ in 0..ACTION_COPIES_PER_COLOR {
                    cards.push_back(Card::Colored(color, action));
                }
            }
        }

        for _ in 0..WILD_COPIES {
            cards.push_back(Card::Wild(None));
        }
        for _ in 0..WILD_COPIES {
            cards.push_back(Card::WildDraw(None));
        }

        Self(cards)
    }

    /// Builds a deck that deals `cards` in the given order.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self(cards.into_iter().collect())
    }

    /// Uniformly permutes the deck in place. Pass a seeded rng to get a
    /// reproducible order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.0.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the front card, or `None` once the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.0.pop_front()
    }

    pub(crate) fn put_back(&mut self, card: Card) {
        self.0.push_back(card);
    }

    /// A new deck holding only the cards that match `predicate`, in their
    /// current order.
    pub fn filter<P>(&self, mut predicate: P) -> Deck
    where
        P: FnMut(&Card) -> bool,
    {
        Deck(self.0.iter().filter(|card| predicate(card)).copied().collect())
    }

    pub fn cards_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }

    pub fn to_memento(&self) -> Vec<CardRecord> {
        self.0.iter().map(CardRecord::from).collect()
    }

    pub fn from_memento(records: Vec<CardRecord>) -> Result<Self, MementoError> {
        unplayed_cards_from_records(records).map(Self)
    }
}

impl From<Deck> for Vec<CardRecord> {
    fn from(deck: Deck) -> Self {
        deck.to_memento()
    }
}

impl TryFrom<Vec<CardRecord>> for Deck {
    type Error = MementoError;

    fn try_from(records: Vec<CardRecord>) -> Result<Self, Self::Error> {
        Deck::from_memento(records)
    }
}
