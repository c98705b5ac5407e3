//! Rules engine for a single round of Uno.
//!
//! A [`round::Round`] owns the draw pile, the discard pile and every
//! player's hand, and is the only thing allowed to move cards between them.
//! The engine is synchronous and keeps no global state; randomness comes in
//! through [`deck::Deck::shuffle`].

pub mod card;
pub mod constants;
pub mod deck;
pub mod error;
pub mod hand;
pub mod memento;
pub mod player;
pub mod round;
pub mod turn;
