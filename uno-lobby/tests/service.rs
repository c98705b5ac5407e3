use std::sync::Arc;

use tokio::sync::broadcast;
use uno_engine::{
    card::{Card, CardColor},
    deck::Deck,
    round::Round,
};
use uno_lobby::{
    action::TurnAction,
    config::LobbyConfig,
    error::LobbyError,
    repository::{GameId, GameRepository, InMemoryRepository},
    service::GameService,
    snapshot::GameStatus,
};

fn seeded_config() -> LobbyConfig {
    LobbyConfig {
        seed: Some(42),
        ..LobbyConfig::default()
    }
}

fn seeded_service() -> GameService<InMemoryRepository> {
    GameService::new(InMemoryRepository::new(), seeded_config())
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Two players, two cards each: Ana holds Red 6 and Red 7, Bo holds Green 1
/// and Green 2, and Red 5 starts the discard pile.
async fn service_with_stacked_round() -> (GameService<InMemoryRepository>, GameId) {
    let deck = Deck::from_cards([
        Card::numbered(CardColor::Red, 6),
        Card::numbered(CardColor::Green, 1),
        Card::numbered(CardColor::Red, 7),
        Card::numbered(CardColor::Green, 2),
        Card::numbered(CardColor::Red, 5),
        Card::numbered(CardColor::Blue, 9),
        Card::numbered(CardColor::Blue, 8),
        Card::numbered(CardColor::Blue, 7),
    ]);
    let mut round = Round::new();
    round.setup(names(&["Ana", "Bo"]), deck, 2).unwrap();

    let repository = InMemoryRepository::new();
    let id = repository.insert(round).await;
    (GameService::new(repository, seeded_config()), id)
}

async fn total_cards(service: &GameService<InMemoryRepository>, id: GameId) -> usize {
    let shared = service.repository().get(id).await.unwrap();
    let round = shared.lock().await;
    round.total_cards()
}

#[tokio::test]
async fn lobby_fills_up_then_starts() {
    let service = GameService::new(
        InMemoryRepository::new(),
        LobbyConfig {
            max_players: 3,
            ..seeded_config()
        },
    );

    let created = service.create_game(names(&["Ana"])).await.unwrap();
    assert_eq!(created.status, GameStatus::Lobby);
    let id = created.id;

    assert!(matches!(
        service.start_game(id).await,
        Err(LobbyError::NotEnoughPlayers)
    ));

    service.join_game(id, "Bo".to_string()).await.unwrap();
    assert!(matches!(
        service.join_game(id, "Bo".to_string()).await,
        Err(LobbyError::NameTaken(name)) if name == "Bo"
    ));
    let joined = service.join_game(id, "Cy".to_string()).await.unwrap();
    assert_eq!(joined.players.len(), 3);
    assert!(matches!(
        service.join_game(id, "Di".to_string()).await,
        Err(LobbyError::GameFull)
    ));

    let started = service.start_game(id).await.unwrap();
    assert_eq!(started.status, GameStatus::Playing);
    assert!(started.top_card.is_some());
    assert!(started.players.iter().all(|player| player.hand_size == 7));
    assert!(started.players.iter().all(|player| player.cards.is_empty()));

    // Starting again changes nothing.
    assert_eq!(service.start_game(id).await.unwrap(), started);

    assert!(matches!(
        service.join_game(id, "Di".to_string()).await,
        Err(LobbyError::AlreadyStarted)
    ));
    assert_eq!(total_cards(&service, id).await, 108);
}

#[tokio::test]
async fn several_names_deal_right_away() {
    let service = seeded_service();

    let created = service
        .create_game(names(&["Ana", "Bo", "Cy"]))
        .await
        .unwrap();

    assert_eq!(created.status, GameStatus::Playing);
    assert_eq!(created.current_player, 0);
    assert_eq!(created.direction, 1);
    assert_eq!(service.games().await.len(), 1);
    assert_eq!(service.player_hand(created.id, 2).await.unwrap().len(), 7);
}

#[tokio::test]
async fn seeded_services_deal_the_same_cards() {
    let first = seeded_service();
    let second = seeded_service();

    let a = first.create_game(names(&["Ana", "Bo"])).await.unwrap();
    let b = second.create_game(names(&["Ana", "Bo"])).await.unwrap();

    assert_eq!(
        first.player_hand(a.id, 0).await.unwrap(),
        second.player_hand(b.id, 0).await.unwrap()
    );
    assert_eq!(a.top_card, b.top_card);
}

#[tokio::test]
async fn unknown_games_are_reported() {
    let service = seeded_service();

    assert!(matches!(
        service.game(GameId(9), None).await,
        Err(LobbyError::GameNotFound(GameId(9)))
    ));
    assert!(matches!(
        service.draw_card(GameId(9), 0).await,
        Err(LobbyError::GameNotFound(_))
    ));
    assert!(matches!(
        service.subscribe(GameId(9)).await,
        Err(LobbyError::GameNotFound(_))
    ));
}

#[tokio::test]
async fn only_the_current_player_may_move() {
    let service = seeded_service();
    let id = service.create_game(names(&["Ana", "Bo"])).await.unwrap().id;

    assert!(matches!(
        service.draw_card(id, 1).await,
        Err(LobbyError::NotYourTurn {
            current: 0,
            requested: 1
        })
    ));
    assert!(matches!(
        service.play_card(id, 1, 0, None).await,
        Err(LobbyError::NotYourTurn { .. })
    ));
}

#[tokio::test]
async fn lobby_refuses_turns() {
    let service = seeded_service();
    let id = service.create_game(names(&["Ana"])).await.unwrap().id;

    assert!(matches!(
        service.draw_card(id, 0).await,
        Err(LobbyError::NotStarted)
    ));
    assert!(matches!(
        service.declare_uno(id, 0).await,
        Err(LobbyError::NotStarted)
    ));
}

#[tokio::test]
async fn drawing_passes_the_turn() {
    let service = seeded_service();
    let id = service.create_game(names(&["Ana", "Bo"])).await.unwrap().id;
    let mut updates = service.subscribe(id).await.unwrap();

    let snapshot = service.draw_card(id, 0).await.unwrap();

    assert_eq!(snapshot.current_player, 1);
    assert_eq!(snapshot.players[0].hand_size, 8);
    assert_eq!(snapshot.players[0].cards.len(), 8);

    let update = updates.recv().await.unwrap();
    assert_eq!(update.id, id);
    assert_eq!(update.current_player, 1);
    assert!(update.players[0].cards.is_empty());
}

#[tokio::test]
async fn observers_only_hear_about_their_game() {
    let service = seeded_service();
    let watched = service.create_game(names(&["Ana", "Bo"])).await.unwrap().id;
    let mut updates = service.subscribe(watched).await.unwrap();

    let other = service.create_game(names(&["Cy", "Di"])).await.unwrap().id;
    service.draw_card(other, 0).await.unwrap();
    assert!(matches!(
        updates.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));

    service.draw_card(watched, 0).await.unwrap();
    let update = updates.recv().await.unwrap();
    assert_eq!(update.id, watched);
    assert!(matches!(
        updates.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn illegal_plays_are_refused() {
    let (service, id) = service_with_stacked_round().await;

    // Ana has no card at index 5.
    assert!(matches!(
        service.play_card(id, 0, 5, None).await,
        Err(LobbyError::InvalidMove)
    ));

    service.play_card(id, 0, 0, None).await.unwrap();

    // Bo's greens do not go on a Red 6.
    assert!(matches!(
        service.play_card(id, 1, 0, None).await,
        Err(LobbyError::InvalidMove)
    ));
    assert_eq!(service.game(id, None).await.unwrap().current_player, 1);
}

#[tokio::test]
async fn catching_a_missed_uno() {
    let (service, id) = service_with_stacked_round().await;

    let snapshot = service
        .perform(
            id,
            0,
            TurnAction::Play {
                card_index: 0,
                color: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(snapshot.players[0].hand_size, 1);

    let (caught, snapshot) = service.catch_uno(id, 0).await.unwrap();
    assert!(caught);
    assert_eq!(snapshot.players[0].hand_size, 3);

    let (caught, _) = service.catch_uno(id, 0).await.unwrap();
    assert!(!caught);
}

#[tokio::test]
async fn declaring_uno_in_time() {
    let (service, id) = service_with_stacked_round().await;

    let (declared, _) = service.declare_uno(id, 0).await.unwrap();
    assert!(!declared);

    service.play_card(id, 0, 0, None).await.unwrap();
    let (declared, snapshot) = service.declare_uno(id, 0).await.unwrap();
    assert!(declared);
    assert!(snapshot.players[0].has_declared_uno);

    let (caught, _) = service.catch_uno(id, 0).await.unwrap();
    assert!(!caught);
}

#[tokio::test]
async fn empty_deck_refuses_a_draw() {
    let (service, id) = service_with_stacked_round().await;

    service.draw_card(id, 0).await.unwrap();
    service.draw_card(id, 1).await.unwrap();
    service.draw_card(id, 0).await.unwrap();

    assert!(matches!(
        service.draw_card(id, 1).await,
        Err(LobbyError::DeckEmpty)
    ));
    assert_eq!(service.game(id, None).await.unwrap().current_player, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_apply_one_at_a_time() {
    let service = Arc::new(seeded_service());
    let id = service
        .create_game(names(&["Ana", "Bo", "Cy", "Di"]))
        .await
        .unwrap()
        .id;

    let mut tasks = Vec::new();
    for player in 0..4 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let mut drawn = 0;
            for _ in 0..10 {
                if service.draw_card(id, player).await.is_ok() {
                    drawn += 1;
                }
                tokio::task::yield_now().await;
            }
            drawn
        }));
    }

    let mut drawn = 0;
    for task in tasks {
        drawn += task.await.unwrap();
    }

    let snapshot = service.game(id, None).await.unwrap();
    let held: usize = snapshot.players.iter().map(|p| p.hand_size).sum();
    assert_eq!(held, 28 + drawn);
    assert_eq!(total_cards(&service, id).await, 108);
}
