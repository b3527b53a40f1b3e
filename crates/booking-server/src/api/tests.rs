use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, persistence, state::AppState};

async fn setup_app() -> (Router, Arc<AppState>) {
    let mut config = Config::from_env();
    config.database_path = std::env::temp_dir()
        .join(format!("booking-test-{}.db", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .to_string();

    let db = persistence::init_database(
        &config.database_path,
        config.database_max_connections,
        config.database_busy_timeout(),
    )
    .await
    .expect("init db");
    persistence::seed::seed_demo_data(db.pool())
        .await
        .expect("seed db");
    let state = Arc::new(AppState::new(db));

    let app = api::routes().with_state(state.clone());
    (app, state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn health_echoes_request_id() {
    let (app, _state) = setup_app().await;

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn request_id_is_minted_when_absent() {
    let (app, _state) = setup_app().await;

    let res = app.oneshot(get("/users/999")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let minted = res.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(minted).is_ok(), "{minted}");
}

#[tokio::test]
async fn create_and_list_users() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/users",
            json!({ "name": "Miss Piggy", "email_address": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = read_json(res).await;
    assert_eq!(body["id"], 4);
    assert!(body["email_address"].is_null());

    let res = app.clone().oneshot(get("/users")).await.unwrap();
    let users = read_json(res).await;
    assert_eq!(users.as_array().unwrap().len(), 4);
    assert_eq!(users[0]["name"], "Mickey Mouse");
}

#[tokio::test]
async fn create_user_without_name_is_bad_request() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(post_json("/users", json!({ "email_address": "x@example.com" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["error"], "name is required");
}

#[tokio::test]
async fn create_drone_and_fetch_it() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(post_json("/drones", json!({ "name": "Drone D" })))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = read_json(res).await["id"].as_i64().unwrap();

    let res = app.clone().oneshot(get(&format!("/drones/{}", id))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let drone = read_json(res).await;
    assert_eq!(drone["name"], "Drone D");
    assert!(drone["location"].is_null());

    let res = app.oneshot(get("/drones/999")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn overlapping_booking_is_conflict() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/bookings",
            json!({
                "user_id": 2,
                "drone_id": 1,
                "booked_on": "2014-09-25",
                "booked_from": "10:00",
                "booked_to": "11:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = read_json(res).await;
    assert_eq!(
        body["error"],
        "Cannot book drone: There is an overlapping booking for this time period"
    );

    let res = app
        .oneshot(post_json(
            "/bookings",
            json!({
                "user_id": 2,
                "drone_id": 1,
                "booked_on": "2014-09-26",
                "booked_from": "09:00",
                "booked_to": "10:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let booking = read_json(res).await;
    assert_eq!(booking["booked_on"], "2014-09-26");
    assert_eq!(booking["booked_from"], "09:00");
}

#[tokio::test]
async fn malformed_booking_time_is_bad_request() {
    let (app, _state) = setup_app().await;

    let res = app
        .oneshot(post_json(
            "/bookings",
            json!({
                "user_id": 1,
                "drone_id": 2,
                "booked_on": "2020-01-01",
                "booked_from": "9am"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn booking_without_ids_is_bad_request() {
    let (app, _state) = setup_app().await;

    let res = app
        .clone()
        .oneshot(post_json(
            "/bookings",
            json!({ "drone_id": 2, "booked_on": "2020-01-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "user_id is required");

    let res = app
        .oneshot(post_json(
            "/bookings",
            json!({ "user_id": 1, "booked_on": "2020-01-01" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "drone_id is required");
}

#[tokio::test]
async fn list_bookings_by_user_and_drone() {
    let (app, _state) = setup_app().await;

    let res = app.clone().oneshot(get("/bookings")).await.unwrap();
    let all = read_json(res).await;
    assert_eq!(all.as_array().unwrap().len(), 4);
    assert_eq!(all[1]["drone_name"], "Drone C");
    assert!(all[1]["booked_from"].is_null());

    let res = app.clone().oneshot(get("/bookings/user/1")).await.unwrap();
    let mickey = read_json(res).await;
    assert_eq!(mickey.as_array().unwrap().len(), 2);
    assert!(mickey
        .as_array()
        .unwrap()
        .iter()
        .all(|b| b["user_name"] == "Mickey Mouse"));

    let res = app.clone().oneshot(get("/bookings?drone_id=1")).await.unwrap();
    let drone_a = read_json(res).await;
    assert_eq!(drone_a.as_array().unwrap().len(), 2);

    let res = app.oneshot(get("/bookings/drone/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
