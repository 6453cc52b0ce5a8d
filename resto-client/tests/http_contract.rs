// resto-client/tests/http_contract.rs
// Runs the clients against a throwaway axum server standing in for the hosted APIs.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use resto_client::{ClientConfig, ClientError, EmailConfig, EmailMessage};
use serde_json::{Value, json};
use shared::models::{EmailLogEntry, NewTransaction, NewTransactionDetail};
use shared::order::{OrderType, PaymentMethod};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Recorded {
    path: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    body: Value,
}

#[derive(Clone, Default)]
struct FakeBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    fail_details: bool,
}

impl FakeBackend {
    fn record(&self, path: String, headers: HeaderMap, query: HashMap<String, String>, body: Value) {
        self.requests.lock().unwrap().push(Recorded {
            path,
            headers,
            query,
            body,
        });
    }

    fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

async fn select_rows(
    State(state): State<FakeBackend>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.record(table.clone(), headers, query, Value::Null);
    let rows = match table.as_str() {
        "products" => json!([
            {"id": "prod-rice", "name": "Fried Rice", "base_price": 25000,
             "categories": {"name": "Food"}, "stock": 5, "stock_type": "STOK_FISIK",
             "available": true, "is_active": true},
            {"id": "prod-tea", "name": "Iced Tea", "base_price": 5000, "categories": null}
        ]),
        "modifier_groups" => json!([
            {"id": "grp-spice", "name": "Spice", "type": "SINGLE", "required": true,
             "min_select": 1, "max_select": 1}
        ]),
        "modifier_items" => json!([
            {"id": "mod-hot", "group_id": "grp-spice", "name": "Hot", "price_adjust": 0, "available": true}
        ]),
        "product_modifiers" => json!([{"product_id": "prod-rice", "group_id": "grp-spice"}]),
        _ => return (StatusCode::NOT_FOUND, Json(json!({"message": "relation does not exist"}))),
    };
    (StatusCode::OK, Json(rows))
}

async fn insert_rows(
    State(state): State<FakeBackend>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record(table.clone(), headers, HashMap::new(), body.clone());
    match table.as_str() {
        "transactions" => (
            StatusCode::CREATED,
            Json(json!({"id": "9f8e7d6c-0000-4000-8000-000000000001", "total": body["total"]})),
        )
            .into_response(),
        "transaction_details" if state.fail_details => (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23503",
                "message": "insert or update on table \"transaction_details\" violates foreign key constraint",
                "details": null,
                "hint": null
            })),
        )
            .into_response(),
        _ => StatusCode::CREATED.into_response(),
    }
}

async fn send_email(
    State(state): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("smtp/email".to_string(), headers.clone(), HashMap::new(), body);
    if headers.get("api-key").map(|v| v.as_bytes()) != Some(b"brevo-key".as_slice()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": "unauthorized", "message": "Key not found"})),
        );
    }
    (StatusCode::CREATED, Json(json!({"messageId": "<msg-1@smtp>"})))
}

async fn spawn(state: FakeBackend) -> String {
    let app = Router::new()
        .route("/rest/v1/{table}", get(select_rows).post(insert_rows))
        .route("/smtp/email", post(send_email))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn sample_transaction() -> NewTransaction {
    NewTransaction {
        customer_id: Some("user-1".into()),
        branch_id: Some("branch-1".into()),
        subtotal: 50000,
        tax: 5000,
        total: 55000,
        payment_method: PaymentMethod::Qris,
        order_type: OrderType::DineIn,
    }
}

#[tokio::test]
async fn test_catalog_fetch_sends_filters_and_headers() {
    let backend = FakeBackend::default();
    let base = spawn(backend.clone()).await;
    let client = ClientConfig::new(&base, "anon-key")
        .build_data_client()
        .unwrap();

    let products = client.fetch_products().await.unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].category_name(), "Food");
    assert_eq!(products[1].category_name(), "Others");

    let items = client.fetch_modifier_items().await.unwrap();
    assert_eq!(items[0].name, "Hot");

    let recorded = backend.take();
    let products_req = &recorded[0];
    assert_eq!(products_req.path, "products");
    assert_eq!(products_req.query["select"], "*,categories(name)");
    assert_eq!(products_req.query["is_active"], "eq.true");
    assert_eq!(products_req.headers["apikey"], "anon-key");
    assert_eq!(products_req.headers["authorization"], "Bearer anon-key");
    assert_eq!(recorded[1].query["available"], "eq.true");
}

#[tokio::test]
async fn test_access_token_used_as_bearer() {
    let backend = FakeBackend::default();
    let base = spawn(backend.clone()).await;
    let client = ClientConfig::new(&base, "anon-key")
        .with_access_token("user-jwt")
        .build_data_client()
        .unwrap();

    client.fetch_product_modifiers().await.unwrap();
    let recorded = backend.take();
    assert_eq!(recorded[0].headers["authorization"], "Bearer user-jwt");
    assert_eq!(recorded[0].query["select"], "product_id,group_id");
}

#[tokio::test]
async fn test_order_write_round() {
    let backend = FakeBackend::default();
    let base = spawn(backend.clone()).await;
    let client = ClientConfig::new(&base, "anon-key")
        .build_data_client()
        .unwrap();

    let row = client.insert_transaction(&sample_transaction()).await.unwrap();
    assert_eq!(row.id, "9f8e7d6c-0000-4000-8000-000000000001");

    let details = vec![NewTransactionDetail {
        transaction_id: row.id.clone(),
        product_id: None,
        product_name: "Packaging Fee (TA)".into(),
        quantity: 1,
        unit_price: 2000,
        modifiers: vec![],
    }];
    client.insert_transaction_details(&details).await.unwrap();

    let recorded = backend.take();
    assert_eq!(recorded[0].headers["prefer"], "return=representation");
    assert_eq!(recorded[0].body["order_type"], "DINE_IN");
    assert_eq!(recorded[1].path, "transaction_details");
    assert_eq!(recorded[1].headers["prefer"], "return=minimal");
    assert_eq!(recorded[1].body[0]["qty"], 1);
    assert_eq!(recorded[1].body[0]["price"], 2000);
}

#[tokio::test]
async fn test_rejected_insert_surfaces_reason() {
    let backend = FakeBackend {
        fail_details: true,
        ..Default::default()
    };
    let base = spawn(backend.clone()).await;
    let client = ClientConfig::new(&base, "anon-key")
        .build_data_client()
        .unwrap();

    let err = client.insert_transaction_details(&[]).await.unwrap_err();
    match err {
        ClientError::Validation(reason) => assert!(reason.contains("foreign key")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let backend = FakeBackend::default();
    let base = spawn(backend).await;
    let client = ClientConfig::new(&base, "anon-key")
        .build_data_client()
        .unwrap();

    let err = client
        .get_rows::<Value>("vouchers", &[("select", "*")])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref r) if r == "relation does not exist"));
}

#[tokio::test]
async fn test_email_log_insert() {
    let backend = FakeBackend::default();
    let base = spawn(backend.clone()).await;
    let client = ClientConfig::new(&base, "anon-key")
        .build_data_client()
        .unwrap();

    client
        .insert_email_log(&EmailLogEntry::failed("guest@example.com", "Order", "timeout"))
        .await
        .unwrap();
    let recorded = backend.take();
    assert_eq!(recorded[0].path, "email_logs");
    assert_eq!(recorded[0].body["status"], "FAILED");
    assert_eq!(recorded[0].body["error_message"], "timeout");
}

#[tokio::test]
async fn test_email_send() {
    let backend = FakeBackend::default();
    let base = spawn(backend.clone()).await;
    let client = EmailConfig::new("brevo-key")
        .with_base_url(&base)
        .with_sender("Resto", "orders@resto.test")
        .build_email_client()
        .unwrap();

    let receipt = client
        .send(&EmailMessage {
            to: "guest@example.com".into(),
            subject: "Order #9F8E7D6C".into(),
            html: "<p>thanks</p>".into(),
        })
        .await
        .unwrap();
    assert_eq!(receipt.message_id.as_deref(), Some("<msg-1@smtp>"));

    let recorded = backend.take();
    let body = &recorded[0].body;
    assert_eq!(body["sender"]["email"], "orders@resto.test");
    assert_eq!(body["to"][0]["email"], "guest@example.com");
    assert_eq!(body["htmlContent"], "<html><body><p>thanks</p></body></html>");
}

#[tokio::test]
async fn test_email_send_bad_key() {
    let backend = FakeBackend::default();
    let base = spawn(backend).await;
    let client = EmailConfig::new("wrong")
        .with_base_url(&base)
        .build_email_client()
        .unwrap();

    let err = client
        .send(&EmailMessage {
            to: "guest@example.com".into(),
            subject: "s".into(),
            html: "h".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));
}
