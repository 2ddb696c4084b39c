//! HTTP routes exercised in-process.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use roll_quote::api::{AppState, router};
use roll_quote::catalog::Catalog;
use roll_quote::config::DEFAULT_ORDER_EMAIL;
use roll_quote::types::RollCatalog;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> axum::Router {
    router(AppState {
        catalog: Catalog::seed(),
        rolls: RollCatalog::standard(),
        order_email: DEFAULT_ORDER_EMAIL.to_string(),
    })
}

async fn send(req: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_up() {
    let response = app()
        .oneshot(Request::get("/up").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_materials_grouped() {
    let (status, body) = send(Request::get("/materials").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0]["category"], "PHOTO");
    assert_eq!(groups[1]["materials"][0]["id"], "p1");
    assert_eq!(groups[2]["materials"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_quote_fitted() {
    let (status, body) = post(
        "/quote",
        json!({ "width": 50, "height": 70, "quantity": 2, "material_id": "p1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["layout"]["kind"], "fitted");
    assert_eq!(body["layout"]["roll_width"], 61.0);
    assert_eq!(body["layout"]["orientation"], "portrait");
    assert_eq!(body["description"], "Roll 61cm (utilization 82%)");
    let unit = body["unit_price"].as_f64().unwrap();
    let total = body["total_price"].as_f64().unwrap();
    assert!((unit - 167.895).abs() < 1e-6);
    assert!((total - 2.0 * unit).abs() < 1e-9);
}

#[tokio::test]
async fn test_quote_adhoc_price_and_rolls() {
    let (status, body) = post(
        "/quote",
        json!({ "width": 200, "height": 200, "price": 100, "rolls": [250] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["layout"]["kind"], "fitted");
    assert_eq!(body["layout"]["roll_width"], 250.0);
}

#[tokio::test]
async fn test_quote_blank_material_uses_price() {
    let (status, body) = post(
        "/quote",
        json!({ "width": 50, "height": 70, "material_id": " ", "price": 100 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["layout"]["roll_width"], 61.0);

    let (status, body) = post("/quote", json!({ "width": 50, "height": 70, "material_id": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "no material selected");
}

#[tokio::test]
async fn test_quote_oversized() {
    let (status, body) = post(
        "/quote",
        json!({ "width": 200, "height": 200, "material_id": "p1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["layout"]["kind"], "oversized");
    assert!((body["unit_price"].as_f64().unwrap() - 1800.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_quote_validation_errors() {
    let (status, body) = post("/quote", json!({ "width": 0, "height": 70, "material_id": "p1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = post("/quote", json!({ "width": 50, "height": 70 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = post("/quote", json!({ "width": 50, "height": 70, "material_id": "nope" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "unknown material 'nope'");

    let (status, _) = post(
        "/quote",
        json!({ "width": 50, "height": 70, "price": 100, "rolls": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_checkout() {
    let (status, body) = post(
        "/order",
        json!({
            "items": [
                { "width": 50, "height": 70, "quantity": 2, "material_id": "p1" },
                { "width": 200, "height": 200, "material_id": "ph1" }
            ],
            "payment": "cash",
            "customer": { "name": "Ana", "email": "ana@example.com", "phone": "123" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[1]["details"], "Size exceeds standard rolls");

    let subtotal = body["summary"]["subtotal"].as_f64().unwrap();
    let final_total = body["summary"]["final_total"].as_f64().unwrap();
    assert!((subtotal - 1335.79).abs() < 1e-6);
    assert!((final_total - subtotal * 0.85).abs() < 1e-9);
    assert!(body["summary"]["installments"].is_null());

    assert_eq!(body["email"]["to"], DEFAULT_ORDER_EMAIL);
    assert_eq!(body["email"]["subject"], "Print order - Ana");
    assert!(
        body["mailto"]
            .as_str()
            .unwrap()
            .starts_with("mailto:contato@molduraspanorama.com.br?subject=Print%20order%20-%20Ana&body=")
    );
}

#[tokio::test]
async fn test_order_errors() {
    let (status, body) = post("/order", json!({ "items": [] })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "EMPTY_ORDER");

    let (status, body) = post("/order", json!({ "items": [{ "width": 50, "height": 70 }] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "no material selected");
}
