use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chess_risk::api::ChessComClient;
use chess_risk::config::FetchSettings;
use chess_risk::domain::{GameOutcome, TimeClass};
use chess_risk::errors::UpstreamError;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct Upstream {
    base: String,
    stats_calls: AtomicU32,
    months_read: Mutex<Vec<String>>,
}

fn game(player_result: &str, opponent_result: &str, end_time: i64) -> Value {
    json!({
        "white": {"username": "Suspect", "rating": 1480, "result": player_result},
        "black": {"username": "victim", "rating": 1500, "result": opponent_result},
        "accuracies": {"white": 92.5, "black": 70.1},
        "time_class": "blitz",
        "rules": "chess",
        "rated": true,
        "end_time": end_time
    })
}

async fn profile() -> Json<Value> {
    Json(json!({"username": "suspect", "joined": 1_704_067_200}))
}

/// First call is rejected as overloaded
async fn stats(State(upstream): State<Arc<Upstream>>) -> Response {
    if upstream.stats_calls.fetch_add(1, Ordering::SeqCst) == 0 {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    Json(json!({
        "chess_blitz": {
            "last": {"rating": 1480},
            "record": {"win": 30, "loss": 8, "draw": 2}
        },
        "chess_rapid": {"last": {"rating": 1600}}
    }))
    .into_response()
}

async fn archives(State(upstream): State<Arc<Upstream>>) -> Json<Value> {
    let month = |m: &str| format!("{}/player/suspect/games/2024/{}", upstream.base, m);
    Json(json!({"archives": [month("01"), month("02"), month("03")]}))
}

async fn monthly(
    State(upstream): State<Arc<Upstream>>,
    Path((_name, _year, month)): Path<(String, String, String)>,
) -> Json<Value> {
    if let Ok(mut read) = upstream.months_read.lock() {
        read.push(month.clone());
    }
    let games = match month.as_str() {
        "02" => vec![game("resigned", "win", 1_707_000_000)],
        "03" => vec![
            game("win", "checkmated", 1_710_000_000),
            game("agreed", "agreed", 1_710_500_000),
        ],
        _ => vec![game("win", "timeout", 1_705_000_000)],
    };
    Json(json!({"games": games}))
}

async fn spawn_upstream() -> (String, Arc<Upstream>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let upstream = Arc::new(Upstream {
        base: base.clone(),
        ..Upstream::default()
    });

    let router = Router::new()
        .route("/player/:name", get(profile))
        .route("/player/:name/stats", get(stats))
        .route("/player/:name/games/archives", get(archives))
        .route("/player/:name/games/:year/:month", get(monthly))
        .with_state(Arc::clone(&upstream));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (base, upstream)
}

fn settings(base: &str) -> FetchSettings {
    FetchSettings {
        api_base_url: base.to_string(),
        timeout_secs: 5,
        max_retries: 2,
        backoff_base_ms: 0,
        backoff_max_ms: 0,
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn snapshot_combines_profile_stats_and_newest_archives() {
    let (base, upstream) = spawn_upstream().await;
    let client = ChessComClient::new(&settings(&base)).unwrap();

    let snapshot = client.fetch_snapshot("Suspect").await.unwrap();

    assert_eq!(snapshot.username, "Suspect");
    assert_eq!(snapshot.joined.timestamp(), 1_704_067_200);

    let blitz = &snapshot.formats[&TimeClass::Blitz];
    assert_eq!(blitz.rating, 1480);
    assert_eq!((blitz.record.wins, blitz.record.losses, blitz.record.draws), (30, 8, 2));
    assert_eq!(snapshot.formats[&TimeClass::Rapid].record.total(), 0);
    assert!(!snapshot.formats.contains_key(&TimeClass::Bullet));

    // Newest two months only, newest game first
    let results: Vec<GameOutcome> = snapshot.games.iter().map(|game| game.result).collect();
    assert_eq!(results, vec![GameOutcome::Draw, GameOutcome::Win, GameOutcome::Loss]);
    assert_eq!(snapshot.games[0].accuracy, Some(92.5));

    let mut months = upstream.months_read.lock().unwrap().clone();
    months.sort();
    assert_eq!(months, vec!["02", "03"]);

    // The overloaded stats response was retried
    assert_eq!(upstream.stats_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unknown_player_is_reported_as_not_found() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, Router::new()).await.unwrap();
    });
    let client = ChessComClient::new(&settings(&base)).unwrap();

    let err = client.fetch_snapshot("ghost").await.unwrap_err();

    assert!(matches!(err, UpstreamError::PlayerNotFound(name) if name == "ghost"));
}
