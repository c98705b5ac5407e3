//! Lobby and turn handling on top of the round engine.
//!
//! The service owns what the engine leaves to its caller: addressing games
//! by id, checking that a request comes from the player whose turn it is,
//! and telling each game's observers about every change to it. Each game is
//! locked for the whole of a request, so concurrent requests against one
//! game apply one after the other.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{info, instrument, warn};
use uno_engine::{
    card::CardColor,
    deck::Deck,
    round::{Round, RoundPhase},
};

use crate::{
    action::TurnAction,
    config::LobbyConfig,
    error::{LobbyError, Result},
    repository::{GameId, GameRepository, SharedRound},
    snapshot::{CardView, GameSnapshot},
};

const UPDATE_CHANNEL_CAPACITY: usize = 64;

pub struct GameService<R> {
    repository: R,
    config: LobbyConfig,
    rng: Mutex<ChaCha8Rng>,
    channels: RwLock<BTreeMap<GameId, broadcast::Sender<GameSnapshot>>>,
}

impl<R: GameRepository> GameService<R> {
    pub fn new(repository: R, config: LobbyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            repository,
            config,
            rng: Mutex::new(rng),
            channels: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn config(&self) -> &LobbyConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Receives a snapshot after every change to game `id`, and to no other
    /// game. Snapshots sent here never reveal anyone's cards.
    pub async fn subscribe(&self, id: GameId) -> Result<broadcast::Receiver<GameSnapshot>> {
        self.shared_round(id).await?;
        let mut channels = self.channels.write().await;
        let sender = channels
            .entry(id)
            .or_insert_with(|| broadcast::channel(UPDATE_CHANNEL_CAPACITY).0);
        Ok(sender.subscribe())
    }

    /// Opens a game. A single name opens a lobby that others can join;
    /// two or more names deal right away.
    #[instrument(skip(self))]
    pub async fn create_game(&self, player_names: Vec<String>) -> Result<GameSnapshot> {
        let mut round = Round::new();
        if player_names.len() == 1 {
            round.initialize_lobby(player_names)?;
        } else {
            let deck = self.shuffled_deck().await;
            round.setup(player_names, deck, self.config.hand_size)?;
        }

        let id = self.repository.insert(round).await;
        info!(%id, "game created");

        let shared = self.shared_round(id).await?;
        let round = shared.lock().await;
        Ok(self.publish(id, &round).await)
    }

    #[instrument(skip(self))]
    pub async fn join_game(&self, id: GameId, player_name: String) -> Result<GameSnapshot> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;

        if round.phase() == RoundPhase::Playing {
            return Err(LobbyError::AlreadyStarted);
        }
        if round.player_count() >= self.config.max_players {
            return Err(LobbyError::GameFull);
        }
        if round.players().iter().any(|p| p.name() == player_name) {
            return Err(LobbyError::NameTaken(player_name));
        }

        let mut names = player_names(&round);
        names.push(player_name);
        round.initialize_lobby(names)?;

        info!(%id, players = round.player_count(), "player joined");
        Ok(self.publish(id, &round).await)
    }

    /// Deals a freshly shuffled deck to everyone in the lobby. Starting a
    /// game that is already running changes nothing.
    #[instrument(skip(self))]
    pub async fn start_game(&self, id: GameId) -> Result<GameSnapshot> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;

        if round.phase() == RoundPhase::Lobby {
            if round.player_count() < 2 {
                return Err(LobbyError::NotEnoughPlayers);
            }
            let names = player_names(&round);
            let deck = self.shuffled_deck().await;
            round.setup(names, deck, self.config.hand_size)?;
            info!(%id, players = round.player_count(), "game started");
        }

        Ok(self.publish(id, &round).await)
    }

    #[instrument(skip(self))]
    pub async fn play_card(
        &self,
        id: GameId,
        player: usize,
        card_index: usize,
        color: Option<CardColor>,
    ) -> Result<GameSnapshot> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;
        authorize(&round, player)?;

        if !round.play(card_index, color)? {
            warn!(%id, player, card_index, "invalid move");
            return Err(LobbyError::InvalidMove);
        }

        self.publish(id, &round).await;
        Ok(GameSnapshot::capture(id, &round, Some(player)))
    }

    /// Draws one card for the current player and passes the turn on.
    #[instrument(skip(self))]
    pub async fn draw_card(&self, id: GameId, player: usize) -> Result<GameSnapshot> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;
        authorize(&round, player)?;

        if round.draw_card(None)?.is_none() {
            warn!(%id, player, "deck is empty");
            return Err(LobbyError::DeckEmpty);
        }
        round.advance_turn();

        self.publish(id, &round).await;
        Ok(GameSnapshot::capture(id, &round, Some(player)))
    }

    /// Returns whether the declaration was accepted.
    #[instrument(skip(self))]
    pub async fn declare_uno(&self, id: GameId, player: usize) -> Result<(bool, GameSnapshot)> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;
        ensure_playing(&round)?;

        let declared = round.say_uno(player)?;
        if declared {
            self.publish(id, &round).await;
        }
        Ok((declared, GameSnapshot::capture(id, &round, Some(player))))
    }

    /// Returns whether `target` was caught and penalized.
    #[instrument(skip(self))]
    pub async fn catch_uno(&self, id: GameId, target: usize) -> Result<(bool, GameSnapshot)> {
        let shared = self.shared_round(id).await?;
        let mut round = shared.lock().await;
        ensure_playing(&round)?;

        let caught = round.catch_uno(target)?;
        if caught {
            info!(%id, target, "player caught without declaring uno");
            self.publish(id, &round).await;
        }
        Ok((caught, GameSnapshot::capture(id, &round, None)))
    }

    /// Runs one request on behalf of `player`.
    pub async fn perform(
        &self,
        id: GameId,
        player: usize,
        action: TurnAction,
    ) -> Result<GameSnapshot> {
        match action {
            TurnAction::Join { name } => self.join_game(id, name).await,
            TurnAction::Start => self.start_game(id).await,
            TurnAction::Play { card_index, color } => {
                self.play_card(id, player, card_index, color).await
            }
            TurnAction::Draw => self.draw_card(id, player).await,
            TurnAction::DeclareUno => Ok(self.declare_uno(id, player).await?.1),
            TurnAction::CatchUno { target } => Ok(self.catch_uno(id, target).await?.1),
        }
    }

    pub async fn game(&self, id: GameId, requester: Option<usize>) -> Result<GameSnapshot> {
        let shared = self.shared_round(id).await?;
        let round = shared.lock().await;
        Ok(GameSnapshot::capture(id, &round, requester))
    }

    pub async fn games(&self) -> Vec<GameSnapshot> {
        let mut snapshots = Vec::new();
        for id in self.repository.ids().await {
            if let Some(shared) = self.repository.get(id).await {
                let round = shared.lock().await;
                snapshots.push(GameSnapshot::capture(id, &round, None));
            }
        }
        snapshots
    }

    pub async fn player_hand(&self, id: GameId, player: usize) -> Result<Vec<CardView>> {
        let shared = self.shared_round(id).await?;
        let round = shared.lock().await;
        Ok(round
            .player_hand(player)?
            .iter()
            .map(CardView::from)
            .collect())
    }

    async fn shared_round(&self, id: GameId) -> Result<SharedRound> {
        self.repository
            .get(id)
            .await
            .ok_or(LobbyError::GameNotFound(id))
    }

    async fn shuffled_deck(&self) -> Deck {
        let mut deck = Deck::new();
        deck.shuffle(&mut *self.rng.lock().await);
        deck
    }

    async fn publish(&self, id: GameId, round: &Round) -> GameSnapshot {
        let snapshot = GameSnapshot::capture(id, round, None);
        if let Some(sender) = self.channels.read().await.get(&id) {
            // Nobody listening is fine.
            let _ = sender.send(snapshot.clone());
        }
        snapshot
    }
}

fn player_names(round: &Round) -> Vec<String> {
    round
        .players()
        .iter()
        .map(|player| player.name().to_string())
        .collect()
}

fn ensure_playing(round: &Round) -> Result<()> {
    match round.phase() {
        RoundPhase::Playing => Ok(()),
        RoundPhase::Lobby => Err(LobbyError::NotStarted),
    }
}

fn authorize(round: &Round, player: usize) -> Result<()> {
    ensure_playing(round)?;
    let current = round.current_player();
    if player != current {
        return Err(LobbyError::NotYourTurn {
            current,
            requested: player,
        });
    }
    Ok(())
}
