//! Integration tests for the HTTP authority client and the session actor
//! running against a stub game server.
//!
//! The stub always picks the word "TEST", allows 6 wrong guesses, and
//! answers errors with `{"error": ...}` bodies.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::{sync::watch, time::timeout};
use wordgame::{
    Authority, GameEvent, GameState, HttpAuthority, SessionActor, Snapshot,
    config::{AuthorityConfig, SessionConfig},
    net::{
        errors::{FailureReason, Operation},
        messages::GuessRequest,
    },
};

const WORD: &str = "TEST";
const GUESS_LIMIT: u32 = 6;

#[derive(Clone)]
struct StubGame {
    current: Vec<char>,
    guesses_remaining: u32,
}

#[derive(Clone, Default)]
struct Stub {
    games: Arc<Mutex<HashMap<String, StubGame>>>,
    next_id: Arc<AtomicUsize>,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "error": message })))
}

async fn new_game(State(stub): State<Stub>) -> Json<Value> {
    let id = format!("game-{}", stub.next_id.fetch_add(1, Ordering::SeqCst));
    let game = StubGame {
        current: vec!['_'; WORD.len()],
        guesses_remaining: GUESS_LIMIT,
    };
    let current: String = game.current.iter().collect();
    stub.games.lock().unwrap().insert(id.clone(), game);

    Json(json!({
        "id": id,
        "current": current,
        "guesses_remaining": GUESS_LIMIT,
    }))
}

async fn guess(
    State(stub): State<Stub>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.id.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "id is missing"));
    }
    let mut chars = request.guess.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(letter), None) => letter.to_ascii_uppercase(),
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "guess can only be 1 (one) character",
            ));
        }
    };

    let mut games = stub.games.lock().unwrap();
    let Some(mut game) = games.get(&request.id).cloned() else {
        return Err(api_error(StatusCode::NOT_FOUND, "the game couldn't be found"));
    };

    let mut correct = false;
    for (i, c) in WORD.chars().enumerate() {
        if c == letter {
            game.current[i] = c;
            correct = true;
        }
    }
    if !correct {
        game.guesses_remaining -= 1;
    }

    let current: String = game.current.iter().collect();
    if game.guesses_remaining == 0 || current == WORD {
        games.remove(&request.id);
    } else {
        games.insert(request.id.clone(), game.clone());
    }

    Ok(Json(json!({
        "current": current,
        "guesses_remaining": game.guesses_remaining,
    })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn missing_fields() -> Json<Value> {
    Json(json!({ "id": "game-x" }))
}

async fn not_json() -> &'static str {
    "<html>teapot</html>"
}

/// Start the stub server on an ephemeral port and return its base URL.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/new", post(new_game))
        .route("/guess", post(guess))
        .route("/health", get(health))
        .route("/broken/new", post(missing_fields))
        .route("/broken/guess", post(not_json))
        .with_state(Stub::default());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn authority(base_url: &str) -> HttpAuthority {
    let mut config = AuthorityConfig::new(base_url);
    config.request_timeout = Some(Duration::from_secs(5));
    HttpAuthority::new(&config).unwrap()
}

/// An address nothing is listening on.
fn unused_addr() -> std::net::SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

async fn wait_until(
    snapshots: &mut watch::Receiver<Snapshot>,
    ready: impl FnMut(&Snapshot) -> bool,
) -> Snapshot {
    timeout(Duration::from_secs(5), snapshots.wait_for(ready))
        .await
        .expect("timed out waiting for snapshot")
        .expect("session stopped")
        .clone()
}

async fn wait_for(snapshots: &mut watch::Receiver<Snapshot>, state: GameState) -> Snapshot {
    wait_until(snapshots, |snapshot| snapshot.state == state).await
}

// ============================================================================
// HTTP Authority Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let base_url = spawn_stub().await;
    let status = authority(&base_url).health().await.unwrap();
    assert_eq!(status.status, "ok");
}

#[tokio::test]
async fn test_create_session() {
    let base_url = spawn_stub().await;
    let session = authority(&base_url).create_session().await.unwrap();

    assert!(!session.id.is_empty());
    assert_eq!(session.current, "____");
    assert_eq!(session.guesses_remaining, GUESS_LIMIT);
}

#[tokio::test]
async fn test_guess_flow() {
    let base_url = spawn_stub().await;
    let client = authority(&base_url);
    let session = client.create_session().await.unwrap();

    let expected = [('e', "_E__", 6), ('t', "TE_T", 6), ('m', "TE_T", 5), ('s', "TEST", 5)];
    for (letter, current, remaining) in expected {
        let outcome = client
            .submit_guess(&GuessRequest::new(session.id.clone(), letter))
            .await
            .unwrap();
        assert_eq!(outcome.current, current, "guess '{letter}'");
        assert_eq!(outcome.guesses_remaining, remaining, "guess '{letter}'");
    }
}

#[tokio::test]
async fn test_unknown_session_is_status_failure() {
    let base_url = spawn_stub().await;
    let err = authority(&base_url)
        .submit_guess(&GuessRequest::new("123", 'z'))
        .await
        .unwrap_err();

    assert_eq!(err.operation, Operation::SubmitGuess);
    assert_eq!(
        err.reason,
        FailureReason::Status {
            code: 404,
            message: Some("the game couldn't be found".to_string()),
        }
    );
}

#[tokio::test]
async fn test_missing_id_is_bad_request() {
    let base_url = spawn_stub().await;
    let err = authority(&base_url)
        .submit_guess(&GuessRequest::new("", 'z'))
        .await
        .unwrap_err();

    assert!(matches!(err.reason, FailureReason::Status { code: 400, .. }));
}

#[tokio::test]
async fn test_missing_fields_are_malformed() {
    let base_url = spawn_stub().await;
    let err = authority(&format!("{base_url}/broken"))
        .create_session()
        .await
        .unwrap_err();

    assert_eq!(err.operation, Operation::CreateSession);
    assert!(matches!(err.reason, FailureReason::Malformed(_)));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let base_url = spawn_stub().await;
    let err = authority(&format!("{base_url}/broken"))
        .submit_guess(&GuessRequest::new("game-x", 'a'))
        .await
        .unwrap_err();

    assert!(matches!(err.reason, FailureReason::Malformed(_)));
}

#[tokio::test]
async fn test_unknown_route_is_status_failure() {
    let base_url = spawn_stub().await;
    let err = authority(&format!("{base_url}/nowhere"))
        .create_session()
        .await
        .unwrap_err();

    assert!(matches!(err.reason, FailureReason::Status { code: 404, message: None }));
}

// ============================================================================
// End-to-End Session Tests
// ============================================================================

#[tokio::test]
async fn test_session_plays_to_win() {
    let base_url = spawn_stub().await;
    let (actor, handle) = SessionActor::new(Arc::new(authority(&base_url)), SessionConfig::default());
    let mut snapshots = handle.subscribe();
    tokio::spawn(actor.run());

    let snapshot = wait_for(&mut snapshots, GameState::Playing).await;
    assert_eq!(snapshot.context.current, "____");

    for (i, letter) in ['t', 'e'].into_iter().enumerate() {
        handle.dispatch(GameEvent::Guess(letter)).await.unwrap();
        wait_until(&mut snapshots, |snapshot| {
            snapshot.state == GameState::Playing && snapshot.context.guessed_letters.len() == i + 1
        })
        .await;
    }

    handle.dispatch(GameEvent::Guess('s')).await.unwrap();
    let won = wait_for(&mut snapshots, GameState::Win).await;
    assert_eq!(won.context.current, "TEST");
    assert_eq!(won.context.guessed_letters, vec!['t', 'e', 's']);
    assert_eq!(won.context.guesses_remaining, GUESS_LIMIT);
}

#[tokio::test]
async fn test_session_plays_to_loss() {
    let base_url = spawn_stub().await;
    let (actor, handle) = SessionActor::new(Arc::new(authority(&base_url)), SessionConfig::default());
    let mut snapshots = handle.subscribe();
    tokio::spawn(actor.run());
    wait_for(&mut snapshots, GameState::Playing).await;

    let misses = ['a', 'b', 'c', 'd', 'f', 'g'];
    for (i, letter) in misses.into_iter().enumerate() {
        handle.dispatch(GameEvent::Guess(letter)).await.unwrap();
        if i + 1 < misses.len() {
            let remaining = GUESS_LIMIT - 1 - i as u32;
            let snapshot = wait_until(&mut snapshots, |snapshot| {
                snapshot.state == GameState::Playing
                    && snapshot.context.guesses_remaining == remaining
            })
            .await;
            assert_eq!(snapshot.context.guessed_letters.len(), i + 1);
        }
    }

    let lost = wait_for(&mut snapshots, GameState::Lose).await;
    assert_eq!(lost.context.guesses_remaining, 0);
    assert_eq!(lost.context.current, "____");
}

#[tokio::test]
async fn test_unreachable_authority_routes_to_failure() {
    let (actor, handle) = SessionActor::new(
        Arc::new(authority(&format!("http://{}", unused_addr()))),
        SessionConfig::default(),
    );
    let mut snapshots = handle.subscribe();
    tokio::spawn(actor.run());

    let failed = wait_for(&mut snapshots, GameState::Failure).await;
    assert!(failed.context.id.is_empty());
}
