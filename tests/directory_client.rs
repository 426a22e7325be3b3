use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use showfinder::directory::{DirectoryApi, DirectoryError, Label, TvMazeClient};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
struct Seen {
    queries: Arc<Mutex<Vec<Option<String>>>>,
    episode_ids: Arc<Mutex<Vec<u64>>>,
}

async fn search(State(seen): State<Seen>, RawQuery(query): RawQuery) -> Json<Value> {
    seen.queries.lock().unwrap().push(query);
    Json(json!([
        {
            "score": 0.9,
            "show": {
                "id": 1,
                "name": "Batman",
                "summary": "<p>Gotham.</p>",
                "image": { "medium": "https://static.tvmaze.com/1.jpg", "original": "https://static.tvmaze.com/1o.jpg" }
            }
        },
        { "score": 0.4, "show": { "id": 2, "name": "Batman Beyond", "summary": null, "image": null } }
    ]))
}

async fn episodes(State(seen): State<Seen>, Path(id): Path<u64>) -> (StatusCode, Json<Value>) {
    seen.episode_ids.lock().unwrap().push(id);
    match id {
        1 => (
            StatusCode::OK,
            Json(json!([
                { "id": 10, "name": "Pilot", "season": 1, "number": 1, "airdate": "1966-01-12" },
                { "id": 11, "name": "Second", "season": 1, "number": 2 }
            ])),
        ),
        2 => (StatusCode::OK, Json(json!({ "not": "a list" }))),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "name": "Not Found", "status": 404 }))),
    }
}

async fn stand_in() -> (String, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/search/shows", get(search))
        .route("/shows/:id/episodes", get(episodes))
        .with_state(seen.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stand-in");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stand-in serves");
    });
    (format!("http://{}/", addr), seen)
}

fn client(base: &str) -> TvMazeClient {
    TvMazeClient::with_base_url(base, Duration::from_secs(5)).expect("client builds")
}

#[tokio::test]
async fn search_sends_encoded_term_and_decodes_hits() {
    let (base, seen) = stand_in().await;
    let hits = client(&base).search_shows("batman & robin").await.expect("search");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].show.name, "Batman");
    assert!(hits[1].show.image.is_none());
    assert_eq!(
        seen.queries.lock().unwrap().clone(),
        vec![Some("q=batman%20%26%20robin".to_string())]
    );
}

#[tokio::test]
async fn empty_term_is_forwarded_as_empty_q() {
    let (base, seen) = stand_in().await;
    client(&base).search_shows("").await.expect("search");
    assert_eq!(seen.queries.lock().unwrap().clone(), vec![Some("q=".to_string())]);
}

#[tokio::test]
async fn lists_episodes_for_the_requested_show() {
    let (base, seen) = stand_in().await;
    let eps = client(&base).list_episodes(1).await.expect("episodes");
    assert_eq!(seen.episode_ids.lock().unwrap().clone(), vec![1]);
    assert_eq!(eps.len(), 2);
    assert_eq!(eps[0].name, "Pilot");
    assert_eq!(eps[1].number, Label::Number(2));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base, _seen) = stand_in().await;
    let err = client(&base).list_episodes(404).await.unwrap_err();
    match err {
        DirectoryError::Status { status, url, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert!(url.ends_with("/shows/404/episodes"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let (base, _seen) = stand_in().await;
    let err = client(&base).list_episodes(2).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_directory_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(&format!("http://{}", addr))
        .search_shows("batman")
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::Request { .. }));
}
