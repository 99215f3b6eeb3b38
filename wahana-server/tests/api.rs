//! Router-level API tests over in-memory SQLite

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use wahana_server::api;
use wahana_server::db::create_schema;
use wahana_server::ServerState;

async fn test_state() -> ServerState {
    let pool = SqlitePoolOptions::new()
        .connect("sqlite::memory:")
        .await
        .unwrap();
    create_schema(&pool).await.unwrap();
    seed(&pool).await;
    ServerState::for_tests(pool)
}

async fn seed(pool: &SqlitePool) {
    sqlx::query(
        "INSERT INTO ticket (id, name, slug, category, price_adult, price_child, \
         price_weekend_adult) VALUES (1, 'Entrance', 'entrance', 'personal', 100000, 50000, 120000)",
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO settings (id, webhook_token, payment_timeout_minutes) \
         VALUES (1, 'hook-secret', 60)",
    )
    .execute(pool)
    .await
    .unwrap();
}

async fn send(state: &ServerState, request: Request<Body>) -> (StatusCode, Value) {
    let response = api::router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
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

fn checkout_body() -> Value {
    json!({
        "visit_date": "2030-05-01",
        "visit_type": "personal",
        "cart": {
            "tickets": [{"slug": "entrance", "variant": "adult", "qty": 2}],
            "addons": []
        },
        "customer_name": "Ani",
        "customer_email": "ani@example.com",
        "customer_phone": "0812",
        "payment_method": "qris"
    })
}

#[tokio::test]
async fn test_health() {
    let state = test_state().await;
    let (status, body) = send(&state, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_check_date_weekend_prices() {
    let state = test_state().await;
    // 2030-05-04 is a Saturday
    let (status, body) = send(&state, get("/api/check-date?date=2030-05-04")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "weekend");
    assert_eq!(body["tickets"][0]["adult"], 120_000);
    // no weekend child override, falls back to base
    assert_eq!(body["tickets"][0]["child"], 50_000);
}

#[tokio::test]
async fn test_checkout_webhook_scan_flow() {
    let state = test_state().await;

    let (status, order) = send(&state, post_json("/api/orders/checkout", checkout_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["total_price"], 200_000);
    let invoice = order["invoice_number"].as_str().unwrap().to_string();
    let code = order["ticket_code"].as_str().unwrap().to_string();

    // scan before payment is rejected
    let (status, body) = send(
        &state,
        post_json(
            "/api/scan",
            json!({"code": code, "scan_type": "gate", "mode": "execute", "gate": "north"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4101);

    // gateway reports payment
    let webhook = Request::builder()
        .method("POST")
        .uri("/api/webhook/payment")
        .header("content-type", "application/json")
        .header("x-callback-token", "hook-secret")
        .body(Body::from(
            json!({"external_id": invoice, "status": "PAID"}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&state, webhook).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (_, order) = send(&state, get(&format!("/api/orders/{code}"))).await;
    assert_eq!(order["payment_status"], "paid");

    // first scan stamps, second is rejected with the prior time
    let scan_body =
        json!({"code": code, "scan_type": "gate", "mode": "execute", "gate": "north"});
    let (status, result) = send(&state, post_json("/api/scan", scan_body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(result["scanned_at"].is_i64());

    let (status, body) = send(&state, post_json("/api/scan", scan_body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4102);
    assert!(body["details"]["scanned_at"].is_i64());
}

#[tokio::test]
async fn test_webhook_bad_token_unauthorized() {
    let state = test_state().await;
    let webhook = Request::builder()
        .method("POST")
        .uri("/api/webhook/payment")
        .header("content-type", "application/json")
        .header("x-callback-token", "wrong")
        .body(Body::from(
            json!({"external_id": "INV-X", "status": "PAID"}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&state, webhook).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn test_checkout_closed_date_rejected() {
    let state = test_state().await;
    let (status, _) = send(
        &state,
        post_json(
            "/api/date-overrides",
            json!({"date": "2030-05-01", "type": "closed"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, post_json("/api/orders/checkout", checkout_body())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4002);
    assert_eq!(body["details"]["visit_date"], "2030-05-01");
}

#[tokio::test]
async fn test_duplicate_date_override_conflict() {
    let state = test_state().await;
    let payload = json!({"date": "2030-12-25", "type": "high_season"});
    let (status, _) = send(&state, post_json("/api/date-overrides", payload.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, post_json("/api/date-overrides", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6501);
}

#[tokio::test]
async fn test_check_promo() {
    let state = test_state().await;
    let (status, _) = send(
        &state,
        post_json(
            "/api/promos",
            json!({"code": "HEMAT", "discount_type": "percent", "value": 10}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &state,
        post_json("/api/check-promo", json!({"code": "hemat", "total": 200000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["discount"], 20_000);

    let (status, body) = send(
        &state,
        post_json("/api/check-promo", json!({"code": "NOPE", "total": 200000})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6201);
}

#[tokio::test]
async fn test_partner_duplicate_phone_conflict() {
    let state = test_state().await;
    let payload = json!({"name": "Ibu Sari", "phone": "0813", "fee_percentage": 5});
    let (status, created) = send(&state, post_json("/api/partners", payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["fee_percentage"], 5);

    let (status, _) = send(&state, post_json("/api/partners", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reseller_topup_minimum_enforced() {
    let state = test_state().await;
    let (status, account) = send(
        &state,
        post_json(
            "/api/resellers",
            json!({"name": "Budi", "agency": "Jaya Tour", "email": "b@e.com", "phone": "0811"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // the password hash never leaves the server
    assert!(account.get("password_hash").is_none());
    let id = account["id"].as_i64().unwrap();

    let (status, body) = send(
        &state,
        post_json(&format!("/api/resellers/{id}/topup"), json!({"amount": 1000})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 5102);
    assert_eq!(body["details"]["minimum"], 100_000_000);
}
