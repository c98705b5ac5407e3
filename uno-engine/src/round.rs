use tracing::{debug, trace};

use crate::card::{Card, CardColor, ColoredCard};
use crate::constants::{MAX_PLAYERS, MIN_PLAYERS, TOTAL_CARDS_IN_DECK, UNO_PENALTY};
use crate::deck::Deck;
use crate::error::{Result, UnoError};
use crate::hand::Hand;
use crate::memento::{cards_from_records, unplayed_cards_from_records, CardRecord, RoundMemento};
use crate::player::Player;
use crate::turn::{seat_after, Direction, TurnEffect};

/// Where a round is in its life. Derived from the round's fields, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Players are known but nothing has been dealt.
    Lobby,
    /// Cards are dealt and the discard pile has a top card.
    Playing,
}

/// One hand of play: the deck, the discard pile, every player's hand and
/// whose turn it is.
///
/// Every mutating method either applies completely or leaves the round
/// untouched. Callers that share a round between tasks must serialize the
/// calls themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Round {
    deck: Deck,
    players: Vec<Player>,
    discard_pile: Vec<Card>,
    dealer: usize,
    current_player: usize,
    direction: Direction,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty round whose first turn will go to `dealer` once dealt.
    pub fn with_dealer(dealer: usize) -> Self {
        Self {
            dealer,
            ..Self::default()
        }
    }

    /// Seats `players` without dealing anything.
    pub fn initialize_lobby(&mut self, players: Vec<String>) -> Result<()> {
        if players.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers(players.len()));
        }

        self.players = players
            .into_iter()
            .map(|name| Player::new(name, Hand::default()))
            .collect();
        self.deck = Deck::default();
        self.discard_pile.clear();
        self.current_player = 0;
        self.direction = Direction::Clockwise;

        debug!(players = self.players.len(), "lobby initialized");
        Ok(())
    }

    /// Deals `hand_size` cards to every player from `deck`, one card per
    /// player at a time, then turns over the first non-wild card to start
    /// the discard pile.
    ///
    /// Wild cards met while looking for that first card go to the back of
    /// the deck.
    pub fn setup(&mut self, players: Vec<String>, mut deck: Deck, hand_size: usize) -> Result<()> {
        if players.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers(players.len()));
        }
        if players.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers(players.len()));
        }

        let mut hands = vec![Hand::default(); players.len()];
        for _ in 0..hand_size {
            for hand in &mut hands {
                if let Some(card) = deck.deal() {
                    hand.add(card);
                }
            }
        }

        let mut first_card = None;
        for _ in 0..deck.cards_count() {
            let Some(card) = deck.deal() else {
                break;
            };
            if card.is_wild() {
                deck.put_back(card);
            } else {
                first_card = Some(card);
                break;
            }
        }
        let first_card = first_card.ok_or(UnoError::DeckExhausted)?;

        self.players = players
            .into_iter()
            .zip(hands)
            .map(|(name, hand)| Player::new(name, hand))
            .collect();
        self.deck = deck;
        self.discard_pile = vec![first_card];
        self.current_player = self.dealer % self.players.len();
        self.direction = Direction::Clockwise;

        debug!(
            players = self.players.len(),
            hand_size,
            top = %first_card,
            current_player = self.current_player,
            "round set up"
        );
        Ok(())
    }

    pub fn phase(&self) -> RoundPhase {
        if self.discard_pile.is_empty() {
            RoundPhase::Lobby
        } else {
            RoundPhase::Playing
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Result<&str> {
        self.get_player(index).map(Player::name)
    }

    pub fn player_hand(&self, index: usize) -> Result<&Hand> {
        self.get_player(index).map(Player::hand)
    }

    pub fn top_card(&self) -> Result<&Card> {
        self.discard_pile.last().ok_or(UnoError::EmptyDiscardPile)
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// True when the player holds one card and has not declared it.
    pub fn needs_to_say_uno(&self, index: usize) -> Result<bool> {
        self.get_player(index).map(Player::needs_to_say_uno)
    }

    pub fn has_declared_uno(&self, index: usize) -> Result<bool> {
        self.get_player(index).map(Player::uno_declared)
    }

    /// Cards in the deck, every hand and the discard pile together.
    pub fn total_cards(&self) -> usize {
        self.deck.cards_count()
            + self.players.iter().map(Player::cards_count).sum::<usize>()
            + self.discard_pile.len()
    }

    /// Whether the first card in the player's hand could be played now.
    pub fn can_play(&self, index: usize, color_override: Option<CardColor>) -> bool {
        let Some(player) = self.players.get(index) else {
            return false;
        };
        self.is_playable(&player.hand, 0, color_override)
            .unwrap_or(false)
    }

    /// Plays the card at `card_index` from the current player's hand.
    ///
    /// Returns `Ok(false)` without touching anything if the index is out of
    /// range or the card cannot be played on the current top card. Wild
    /// cards need `chosen_color`; other cards ignore it.
    pub fn play(&mut self, card_index: usize, chosen_color: Option<CardColor>) -> Result<bool> {
        let current = self.current_player;
        let Some(player) = self.players.get(current) else {
            return Ok(false);
        };
        let Some(card) = player.hand.get(card_index).copied() else {
            trace!(player = current, card_index, "card index out of range");
            return Ok(false);
        };

        if !self.is_playable(&player.hand, card_index, None)? {
            trace!(player = current, %card, "card not playable");
            return Ok(false);
        }

        let played = if card.is_wild() {
            card.with_chosen_color(chosen_color.ok_or(UnoError::MissingChosenColor)?)
        } else {
            card
        };

        self.players[current].remove_card(&card);
        self.discard_pile.push(played);
        self.apply_turn_effect(&played);

        debug!(
            player = current,
            card = %played,
            cards_left = self.players[current].cards_count(),
            next = self.current_player,
            "card played"
        );
        Ok(true)
    }

    /// Deals one card to `target` (the current player by default).
    ///
    /// Returns `Ok(None)` when the deck is empty.
    pub fn draw_card(&mut self, target: Option<usize>) -> Result<Option<Card>> {
        let index = target.unwrap_or(self.current_player);
        self.get_player(index)?;

        let card = self.deal_to(index);
        debug!(player = index, drawn = card.is_some(), "card drawn");
        Ok(card)
    }

    /// Records a declaration for a player holding exactly one card.
    pub fn say_uno(&mut self, index: usize) -> Result<bool> {
        let declared = self.get_player_mut(index)?.uno();
        debug!(player = index, declared, "uno declared");
        Ok(declared)
    }

    /// Penalizes a player who holds one card without having declared it.
    pub fn catch_uno(&mut self, target: usize) -> Result<bool> {
        if !self.get_player(target)?.needs_to_say_uno() {
            return Ok(false);
        }

        for _ in 0..UNO_PENALTY {
            self.deal_to(target);
        }
        self.players[target].uno_declared = false;

        debug!(player = target, "caught without declaring uno");
        Ok(true)
    }

    /// Moves the turn to the next player without playing a card.
    pub fn advance_turn(&mut self) {
        self.move_turn_n_players_ahead(1);
    }

    pub fn to_memento(&self) -> RoundMemento {
        RoundMemento {
            players: self.players.iter().map(|p| p.name().to_string()).collect(),
            dealer: self.dealer,
            current_player: self.current_player,
            direction: self.direction.into(),
            deck: self.deck.to_memento(),
            hands: self
                .players
                .iter()
                .map(|p| p.hand.iter().map(CardRecord::from).collect())
                .collect(),
            discard_pile: self.discard_pile.iter().map(CardRecord::from).collect(),
            uno_declared: self.players.iter().map(Player::uno_declared).collect(),
        }
    }

    pub fn from_memento(memento: RoundMemento) -> Result<Self> {
        let RoundMemento {
            players,
            dealer,
            current_player,
            direction,
            deck,
            hands,
            discard_pile,
            uno_declared,
        } = memento;

        if players.len() > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers(players.len()));
        }
        if hands.len() != players.len() || uno_declared.len() != players.len() {
            return Err(UnoError::InvalidMemento(format!(
                "{} players but {} hands and {} declarations",
                players.len(),
                hands.len(),
                uno_declared.len()
            )));
        }
        let direction = Direction::try_from(direction).map_err(UnoError::InvalidMemento)?;

        let deck = Deck::from_memento(deck)?;
        let discard_pile: Vec<Card> = cards_from_records(discard_pile)?;
        let mut seated = Vec::with_capacity(players.len());
        for ((name, hand), declared) in players.into_iter().zip(hands).zip(uno_declared) {
            let hand: Hand = unplayed_cards_from_records(hand)?;
            if declared && hand.len() != 1 {
                return Err(UnoError::InvalidMemento(format!(
                    "{name} declared uno while holding {} cards",
                    hand.len()
                )));
            }
            let mut player = Player::new(name, hand);
            player.uno_declared = declared;
            seated.push(player);
        }

        let round = Round {
            deck,
            players: seated,
            discard_pile,
            dealer,
            current_player,
            direction,
        };

        if round.phase() == RoundPhase::Lobby {
            if round.total_cards() != 0 {
                return Err(UnoError::InvalidMemento(format!(
                    "undealt round holds {} cards",
                    round.total_cards()
                )));
            }
            return Ok(round);
        }

        if let Some(card) = round
            .discard_pile
            .iter()
            .find(|card| card.is_wild() && card.chosen_color().is_none())
        {
            return Err(UnoError::InvalidMemento(format!(
                "played {card} has no chosen color"
            )));
        }

        if round.players.len() < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers(round.players.len()));
        }
        if current_player >= round.players.len() {
            return Err(UnoError::InvalidMemento(format!(
                "current player {current_player} is not seated"
            )));
        }
        if round.total_cards() != TOTAL_CARDS_IN_DECK as usize {
            return Err(UnoError::InvalidMemento(format!(
                "round holds {} cards",
                round.total_cards()
            )));
        }

        Ok(round)
    }

    fn get_player(&self, index: usize) -> Result<&Player> {
        let count = self.players.len();
        self.players
            .get(index)
            .ok_or(UnoError::PlayerIndexOutOfBounds { index, count })
    }

    fn get_player_mut(&mut self, index: usize) -> Result<&mut Player> {
        let count = self.players.len();
        self.players
            .get_mut(index)
            .ok_or(UnoError::PlayerIndexOutOfBounds { index, count })
    }

    /// Legality of `hand[index]` against the top card. The active color is
    /// `color_override` when given, otherwise whatever the top card counts
    /// as.
    fn is_playable(
        &self,
        hand: &Hand,
        index: usize,
        color_override: Option<CardColor>,
    ) -> Result<bool> {
        let top = self.top_card()?;
        let active_color = color_override.or_else(|| top.active_color());
        let Some(card) = hand.get(index) else {
            return Ok(false);
        };

        let playable = match card {
            Card::Wild(_) => true,
            // Only allowed when no other non-wild card in hand could be played.
            Card::WildDraw(_) => !hand.iter().enumerate().any(|(other_index, other)| {
                other_index != index && !other.is_wild() && matches_top(other, top, active_color)
            }),
            colored => matches_top(colored, top, active_color),
        };
        Ok(playable)
    }

    fn apply_turn_effect(&mut self, card: &Card) {
        match TurnEffect::of(card, self.players.len()) {
            TurnEffect::Advance(steps) => self.move_turn_n_players_ahead(steps),
            TurnEffect::Reverse => {
                self.direction = self.direction.reversed();
                self.move_turn_n_players_ahead(1);
            }
            TurnEffect::ForceDraw(count) => {
                self.move_turn_n_players_ahead(1);
                let victim = self.current_player;
                for _ in 0..count {
                    // An empty deck shortens the penalty, nothing more.
                    self.deal_to(victim);
                }
                self.move_turn_n_players_ahead(1);
            }
        }
    }

    fn deal_to(&mut self, index: usize) -> Option<Card> {
        let card = self.deck.deal()?;
        self.players[index].add_card(card);
        Some(card)
    }

    fn move_turn_n_players_ahead(&mut self, n: usize) {
        if self.players.is_empty() {
            return;
        }
        self.current_player =
            seat_after(self.current_player, self.direction, n, self.players.len());
    }
}

/// Whether a non-wild `card` may go on `top` given the active color.
fn matches_top(card: &Card, top: &Card, active_color: Option<CardColor>) -> bool {
    match card {
        Card::Colored(color, ColoredCard::Number(number)) => {
            active_color == Some(*color) || top.number() == Some(*number)
        }
        Card::Colored(color, _) => active_color == Some(*color) || card.kind() == top.kind(),
        Card::Wild(_) | Card::WildDraw(_) => true,
    }
}
