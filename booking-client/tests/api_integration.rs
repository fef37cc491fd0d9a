// booking-client/tests/api_integration.rs
// 端到端测试 - 真实 HTTP 往返，服务端为进程内 axum mock

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use booking_client::{
    App, AssumeYes, BookingApi, ClientConfig, ClientError, FileSessionStore, Screen,
    SessionManager,
};
use serde_json::{Value, json};
use shared::{LoginRequest, ReservationCreate};

const TOKEN: &str = "tok-alice";

#[derive(Default)]
struct MockState {
    restaurants: Mutex<Vec<Value>>,
    cancelled: Mutex<Vec<String>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", TOKEN);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

async fn login(Json(req): Json<Value>) -> Response {
    if req["email"] == "alice@example.com" && req["password"] == "secret" {
        Json(json!({
            "token": TOKEN,
            "user": {"id": "u1", "name": "Alice", "email": "alice@example.com", "role": "admin"}
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        )
            .into_response()
    }
}

async fn list_restaurants(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(Value::Array(state.restaurants.lock().unwrap().clone()))
}

async fn create_restaurant(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(req): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        // 纯文本错误体：客户端应回退到状态行
        return (StatusCode::FORBIDDEN, "forbidden").into_response();
    }
    let mut list = state.restaurants.lock().unwrap();
    let id = format!("r{}", list.len() + 1);
    let mut created = req.clone();
    created["id"] = json!(id);
    created["createdAt"] = json!("2024-01-01T00:00:00Z");
    list.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn delete_restaurant(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> StatusCode {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    state.restaurants.lock().unwrap().retain(|r| r["id"] != id);
    StatusCode::NO_CONTENT
}

async fn my_reservations(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "missing or invalid token"})),
        )
            .into_response();
    }
    // nil slice on the server side
    Json(Value::Null).into_response()
}

async fn create_reservation(Path(id): Path<String>, Json(req): Json<Value>) -> Response {
    if req.get("tableId").is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unexpected tableId"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(json!({"id": format!("{}-res1", id)}))).into_response()
}

async fn cancel_reservation(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Json<Value> {
    state.cancelled.lock().unwrap().push(id);
    Json(json!({"status": "cancelled"}))
}

async fn spawn_server() -> (String, Arc<MockState>) {
    let state = Arc::new(MockState::default());
    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/restaurants", get(list_restaurants).post(create_restaurant))
        .route("/restaurants/{id}", delete(delete_restaurant))
        .route("/restaurants/{id}/reservations", post(create_reservation))
        .route("/reservations/{id}", delete(cancel_reservation))
        .route("/me/reservations", get(my_reservations));
    let app = Router::new()
        .nest("/api/v1", api)
        .route("/healthz", get(|| async { Json(json!({"status": "ok"})) }))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), state)
}

fn api_for(base: &str, session: SessionManager) -> BookingApi {
    BookingApi::connect(&ClientConfig::new(base), session).unwrap()
}

#[tokio::test]
async fn test_login_error_body_is_surfaced() {
    let (base, _) = spawn_server().await;
    let api = api_for(&base, SessionManager::in_memory());

    let err = api
        .login(&LoginRequest {
            email: "alice@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "invalid credentials");
}

#[tokio::test]
async fn test_plain_text_error_falls_back_to_status_line() {
    let (base, _) = spawn_server().await;
    let api = api_for(&base, SessionManager::in_memory());

    let err = api
        .create_restaurant(&Default::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));
    assert_eq!(err.to_string(), "HTTP 403: Forbidden");
}

#[tokio::test]
async fn test_admin_flow_through_app() {
    let (base, state) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");

    let session = SessionManager::restore(FileSessionStore::new(&file));
    let mut app = App::new(api_for(&base, session));
    app.start().await;
    assert_eq!(app.screen(), Screen::Anonymous);

    assert!(app.login("alice@example.com", "secret").await);
    assert_eq!(app.screen(), Screen::Authenticated);
    assert!(file.exists());

    let form = shared::RestaurantCreate {
        name: "Cafe A".into(),
        address: "1 Main St".into(),
        open_time: "08:00".into(),
        close_time: "20:00".into(),
    };
    assert!(app.restaurants.create(&form).await);
    assert_eq!(
        app.restaurants.status().message(),
        Some("Restaurant created. ID: r1")
    );
    assert_eq!(app.restaurants.render().unwrap().items().len(), 1);

    // 204 without body
    assert!(app.restaurants.delete("r1", "Cafe A", &AssumeYes).await);
    assert!(state.restaurants.lock().unwrap().is_empty());
    assert!(app.restaurants.render().unwrap().is_placeholder());

    app.logout().await;
    assert!(!file.exists());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let (base, _) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("nested").join("session.json");

    {
        let session = SessionManager::restore(FileSessionStore::new(&file));
        let mut app = App::new(api_for(&base, session));
        assert!(app.login("alice@example.com", "secret").await);
    }

    let session = SessionManager::restore(FileSessionStore::new(&file));
    assert_eq!(session.token().as_deref(), Some(TOKEN));
    let mut app = App::new(api_for(&base, session));
    assert_eq!(app.screen(), Screen::Authenticated);

    // 服务端返回 null 列表
    app.reservations
        .show_tab(booking_client::ui::ReservationTab::Mine)
        .await;
    assert!(app.reservations.render().unwrap().is_placeholder());
    assert!(!app.reservations.status().is_error());
}

#[tokio::test]
async fn test_reservation_without_table_and_cancel() {
    let (base, state) = spawn_server().await;
    let api = api_for(&base, SessionManager::in_memory());

    let payload = ReservationCreate {
        table_id: None,
        start: "2024-05-01T17:00:00Z".parse().unwrap(),
        end: "2024-05-01T19:00:00Z".parse().unwrap(),
        guests: 2,
    };
    let created = api.create_reservation("r1", &payload).await.unwrap();
    assert_eq!(created.id, "r1-res1");

    api.cancel_reservation("r1-res1").await.unwrap();
    assert_eq!(*state.cancelled.lock().unwrap(), vec!["r1-res1".to_string()]);
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let (base, _) = spawn_server().await;
    let api = api_for(&base, SessionManager::in_memory());

    let err = api.my_reservations().await.unwrap_err();
    assert_eq!(err.to_string(), "missing or invalid token");
}

#[tokio::test]
async fn test_health_uses_origin() {
    let (base, _) = spawn_server().await;
    let api = api_for(&base, SessionManager::in_memory());

    let body = api.health().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unreachable_server() {
    let api = api_for("http://127.0.0.1:9/api/v1", SessionManager::in_memory());
    let err = api.list_restaurants().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
