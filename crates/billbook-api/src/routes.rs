use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::{Bill, BillInput, Item, ItemInput, Store};

const INVALID_ID: &str = "Invalid ID format";
const INVALID_JSON: &str = "Invalid JSON";
const BILL_NOT_FOUND: &str = "Bill not found";
const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Clone, Default)]
pub struct AppState {
    store: Arc<RwLock<Store>>,
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/bills", get(list_bills).post(create_bill))
        .route(
            "/bills/{id}",
            get(get_bill).put(update_bill).delete(delete_bill),
        )
        .route("/itens", get(list_items).post(create_item))
        .route(
            "/itens/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Serialize)]
struct Deleted {
    message: &'static str,
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|error| {
        tracing::debug!("Rejected request body: {}", error);
        AppError::bad_request(INVALID_JSON)
    })
}

fn parse_bill_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request(INVALID_ID))
}

fn parse_item_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::bad_request(INVALID_ID))
}

async fn list_bills(State(state): State<AppState>) -> Json<Vec<Bill>> {
    Json(state.store.read().await.bills())
}

async fn create_bill(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Bill>), AppError> {
    let input: BillInput = parse_json(&body)?;
    let bill = state.store.write().await.create_bill(input, Utc::now());
    tracing::info!("Created bill {}", bill.id);
    Ok((StatusCode::CREATED, Json(bill)))
}

async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bill>, AppError> {
    let id = parse_bill_id(&id)?;
    state
        .store
        .read()
        .await
        .bill(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(BILL_NOT_FOUND))
}

async fn update_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Bill>, AppError> {
    let id = parse_bill_id(&id)?;
    let input: BillInput = parse_json(&body)?;
    state
        .store
        .write()
        .await
        .update_bill(id, input, Utc::now())
        .map(Json)
        .ok_or_else(|| AppError::not_found(BILL_NOT_FOUND))
}

async fn delete_bill(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let id = parse_bill_id(&id)?;
    if !state.store.write().await.delete_bill(id) {
        return Err(AppError::not_found(BILL_NOT_FOUND));
    }
    tracing::info!("Deleted bill {}", id);
    Ok(Json(Deleted {
        message: "Bill deleted",
    }))
}

async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    Json(state.store.read().await.items())
}

async fn create_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let input: ItemInput = parse_json(&body)?;
    let item = state.store.write().await.create_item(input);
    tracing::info!("Created item {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let id = parse_item_id(&id)?;
    state
        .store
        .read()
        .await
        .item(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Item>, AppError> {
    let id = parse_item_id(&id)?;
    let input: ItemInput = parse_json(&body)?;
    state
        .store
        .write()
        .await
        .update_item(id, input)
        .map(Json)
        .ok_or_else(|| AppError::not_found(ITEM_NOT_FOUND))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, AppError> {
    let id = parse_item_id(&id)?;
    if !state.store.write().await.delete_item(id) {
        return Err(AppError::not_found(ITEM_NOT_FOUND));
    }
    tracing::info!("Deleted item {}", id);
    Ok(Json(Deleted {
        message: "Item deleted",
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn router() -> Router {
        app_router(AppState::default())
    }

    #[tokio::test]
    async fn empty_collections_serialize_as_arrays() {
        let router = router();
        assert_eq!(
            send(&router, Method::GET, "/bills", None).await,
            (StatusCode::OK, json!([]))
        );
        assert_eq!(
            send(&router, Method::GET, "/itens", None).await,
            (StatusCode::OK, json!([]))
        );
    }

    #[tokio::test]
    async fn bill_lifecycle() {
        let router = router();
        let (status, created) = send(
            &router,
            Method::POST,
            "/bills",
            Some(json!({
                "embasa": 12.5,
                "coelba": 30,
                "created_at": "2024-03-05T14:30:00.000Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["updated_at"], Value::Null);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, updated) = send(
            &router,
            Method::PUT,
            &format!("/bills/{id}"),
            Some(json!({
                "embasa": 13,
                "coelba": 31,
                "created_at": "2030-01-01T00:00:00.000Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["created_at"], created["created_at"]);
        assert!(updated["updated_at"].is_string());

        let (status, fetched) = send(&router, Method::GET, &format!("/bills/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, updated);

        let (status, _) = send(&router, Method::DELETE, &format!("/bills/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, Method::GET, &format!("/bills/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": BILL_NOT_FOUND }));
    }

    #[tokio::test]
    async fn malformed_ids_and_bodies_are_bad_requests() {
        let router = router();
        assert_eq!(
            send(&router, Method::GET, "/bills/not-a-uuid", None).await,
            (StatusCode::BAD_REQUEST, json!({ "error": INVALID_ID }))
        );
        assert_eq!(
            send(&router, Method::DELETE, "/itens/abc", None).await,
            (StatusCode::BAD_REQUEST, json!({ "error": INVALID_ID }))
        );

        let request = Request::builder()
            .method(Method::POST)
            .uri("/itens")
            .body(Body::from("{nome"))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn item_ids_are_sequential_integers() {
        let router = router();
        let (_, first) = send(
            &router,
            Method::POST,
            "/itens",
            Some(json!({ "nome": "Monitor", "preco": 850.5 })),
        )
        .await;
        let (_, second) = send(
            &router,
            Method::POST,
            "/itens",
            Some(json!({ "nome": "Cabo", "preco": 20 })),
        )
        .await;
        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));

        let (status, updated) = send(
            &router,
            Method::PUT,
            "/itens/2",
            Some(json!({ "nome": "Cabo HDMI", "preco": 25.9 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated, json!({ "id": 2, "nome": "Cabo HDMI", "preco": 25.9 }));

        let (status, list) = send(&router, Method::GET, "/itens", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn unknown_records_are_not_found() {
        let router = router();
        let missing = Uuid::new_v4();
        assert_eq!(
            send(
                &router,
                Method::PUT,
                &format!("/bills/{missing}"),
                Some(json!({ "embasa": 1 }))
            )
            .await
            .0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            send(&router, Method::DELETE, "/itens/9", None).await,
            (StatusCode::NOT_FOUND, json!({ "error": ITEM_NOT_FOUND }))
        );
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) = send(&router(), Method::GET, "/healthz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
