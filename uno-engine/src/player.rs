use crate::{card::Card, hand::Hand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    pub(crate) hand: Hand,
    pub(crate) uno_declared: bool,
}

impl Player {
    pub fn new(name: String, hand: Hand) -> Self {
        Self {
            name,
            hand,
            uno_declared: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn uno_declared(&self) -> bool {
        self.uno_declared
    }

    /// Adds a card to the hand. Holding more cards voids any earlier
    /// declaration.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.add(card);
        self.uno_declared = false;
    }

    /// Removes a card from the hand. The declaration survives only while
    /// exactly one card is left.
    pub(crate) fn remove_card(&mut self, card: &Card) -> bool {
        let removed = self.hand.remove(card);
        if self.hand.len() != 1 {
            self.uno_declared = false;
        }
        removed
    }

    pub(crate) fn uno(&mut self) -> bool {
        if self.hand.len() == 1 {
            self.uno_declared = true;
            true
        } else {
            false
        }
    }

    pub fn needs_to_say_uno(&self) -> bool {
        self.hand.len() == 1 && !self.uno_declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    fn player_with(cards: Vec<Card>) -> Player {
        Player::new("Player 1".to_string(), Hand::new(cards))
    }

    #[test]
    fn uno_only_works_with_one_card() {
        let mut player = player_with(vec![
            Card::numbered(CardColor::Red, 1),
            Card::numbered(CardColor::Red, 2),
        ]);
        assert!(!player.uno());
        assert!(!player.uno_declared());

        player.hand.truncate(1);
        assert!(player.needs_to_say_uno());
        assert!(player.uno());
        assert!(player.uno_declared());
        assert!(!player.needs_to_say_uno());
    }

    #[test]
    fn drawing_clears_declaration() {
        let mut player = player_with(vec![Card::numbered(CardColor::Red, 1)]);
        player.uno();

        player.add_card(Card::skip(CardColor::Blue));

        assert!(!player.uno_declared());
    }

    #[test]
    fn playing_down_to_one_card_keeps_declaration() {
        let mut player = player_with(vec![
            Card::numbered(CardColor::Red, 1),
            Card::numbered(CardColor::Red, 2),
        ]);
        player.uno_declared = true;

        assert!(player.remove_card(&Card::numbered(CardColor::Red, 2)));
        assert!(player.uno_declared());

        assert!(player.remove_card(&Card::numbered(CardColor::Red, 1)));
        assert!(!player.uno_declared());
    }
}
