use crate::card::Card;

/// The cards held by one player.
///
/// Cards are matched by value, so removing one of two identical cards (two
/// Red 5s, say) takes whichever comes first. Either choice leaves the hand in
/// the same state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand(Vec<Card>);

impl Hand {
    pub fn new(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    pub fn add(&mut self, card: Card) {
        self.0.push(card);
    }

    /// Removes the first card equal to `card`. Returns whether one was found.
    pub fn remove(&mut self, card: &Card) -> bool {
        match self.0.iter().position(|x| x == card) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.0.get(index)
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }

    #[cfg(test)]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardColor;

    #[test]
    fn add_keeps_insertion_order() {
        let mut hand = Hand::default();
        hand.add(Card::numbered(CardColor::Red, 5));
        hand.add(Card::Wild(None));

        assert_eq!(
            hand.cards(),
            &[Card::numbered(CardColor::Red, 5), Card::Wild(None)]
        );
        assert_eq!(hand.len(), 2);
    }

    #[test]
    fn remove_matches_by_value() {
        let mut hand = Hand::new(vec![
            Card::numbered(CardColor::Red, 5),
            Card::skip(CardColor::Blue),
            Card::numbered(CardColor::Red, 5),
        ]);

        assert!(hand.remove(&Card::numbered(CardColor::Red, 5)));
        assert_eq!(
            hand.cards(),
            &[Card::skip(CardColor::Blue), Card::numbered(CardColor::Red, 5)]
        );
    }

    #[test]
    fn remove_reports_missing_cards() {
        let mut hand = Hand::new(vec![Card::numbered(CardColor::Green, 2)]);

        assert!(!hand.remove(&Card::numbered(CardColor::Green, 3)));
        assert!(!hand.remove(&Card::numbered(CardColor::Red, 2)));
        assert_eq!(hand.len(), 1);
    }
}
