use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{any, get},
};

use crate::{
    dto::game_entry::{CreateGameEntryRequest, CreatedGameEntry, GameEntry},
    error::AppError,
    routes::extract::JsonBody,
    services::catalog_service,
    state::SharedState,
};

/// Collection and item endpoints of the game catalog.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/gamedb", get(list_entries).post(create_entry))
        .route("/api/gamedb/{id}", get(get_entry).delete(delete_entry))
        .route("/api/gamedb/{id}/{*rest}", any(reject_extra_segments))
}

/// List every catalog entry.
#[utoipa::path(
    get,
    path = "/api/gamedb",
    tag = "gamedb",
    responses(
        (status = 200, description = "All catalog entries", body = [GameEntry]),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_entries(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameEntry>>, AppError> {
    let entries = catalog_service::list_entries(&state).await?;
    Ok(Json(entries))
}

/// Add an entry to the catalog.
#[utoipa::path(
    post,
    path = "/api/gamedb",
    tag = "gamedb",
    request_body = CreateGameEntryRequest,
    responses(
        (status = 201, description = "Entry created", body = CreatedGameEntry),
        (status = 400, description = "Body is not a valid entry, or an entry with this id already exists"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_entry(
    State(state): State<SharedState>,
    JsonBody(payload): JsonBody<CreateGameEntryRequest>,
) -> Result<(StatusCode, Json<CreatedGameEntry>), AppError> {
    let created = catalog_service::create_entry(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Fetch a single entry.
#[utoipa::path(
    get,
    path = "/api/gamedb/{id}",
    tag = "gamedb",
    params(("id" = i64, Path, description = "Identifier of the entry")),
    responses(
        (status = 200, description = "The entry", body = GameEntry),
        (status = 404, description = "No such entry, or the id is not an integer"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_entry(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<Json<GameEntry>, AppError> {
    let id = parse_id(&raw_id)?;
    let entry = catalog_service::get_entry(&state, id).await?;
    Ok(Json(entry))
}

/// Delete a single entry. Deleting an unknown id still succeeds.
#[utoipa::path(
    delete,
    path = "/api/gamedb/{id}",
    tag = "gamedb",
    params(("id" = i64, Path, description = "Identifier of the entry")),
    responses(
        (status = 200, description = "Entry no longer exists"),
        (status = 404, description = "The id is not an integer"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete_entry(
    State(state): State<SharedState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&raw_id)?;
    catalog_service::delete_entry(&state, id).await?;
    Ok(StatusCode::OK)
}

/// Item paths take exactly one segment after the collection prefix.
async fn reject_extra_segments() -> AppError {
    AppError::BadRequest("item path takes a single id segment".into())
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("`{raw}` is not a valid entry id")))
}

#[cfg(all(test, feature = "sqlite-store"))]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Method, Request, header},
    };
    use futures::future::BoxFuture;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        dao::{
            catalog_store::{CatalogStore, sqlite::SqliteCatalogStore},
            models::{GameEntryEntity, NewGameEntryEntity},
            storage::{StorageError, StorageResult},
        },
        routes,
        state::AppState,
    };

    async fn test_app() -> Router {
        let store = SqliteCatalogStore::in_memory()
            .await
            .expect("in-memory store");
        routes::app(AppState::new(Arc::new(store)))
    }

    /// Store whose every call fails, standing in for an unreachable database.
    struct BrokenStore;

    fn broken<T: Send + 'static>() -> BoxFuture<'static, StorageResult<T>> {
        Box::pin(async {
            Err(StorageError::Timeout {
                operation: "test",
                after: std::time::Duration::from_secs(3),
            })
        })
    }

    impl CatalogStore for BrokenStore {
        fn find_entry(&self, _: i64) -> BoxFuture<'static, StorageResult<Option<GameEntryEntity>>> {
            broken()
        }
        fn list_entries(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntryEntity>>> {
            broken()
        }
        fn insert_entry(&self, _: NewGameEntryEntity) -> BoxFuture<'static, StorageResult<i64>> {
            broken()
        }
        fn delete_entry(&self, _: i64) -> BoxFuture<'static, StorageResult<()>> {
            broken()
        }
        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            broken()
        }
    }

    fn broken_app() -> Router {
        routes::app(AppState::new(Arc::new(BrokenStore)))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, header::HeaderMap, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::ORIGIN, "http://front.example");
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let parsed = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, headers, parsed)
    }

    #[tokio::test]
    async fn empty_catalog_lists_as_empty_array() {
        let app = test_app().await;
        let (status, _, body) = send(&app, Method::GET, "/api/gamedb", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn created_entry_can_be_fetched_by_returned_id() {
        let app = test_app().await;
        let (status, _, created) = send(
            &app,
            Method::POST,
            "/api/gamedb",
            Some(json!({"gamename": "Portal", "price": 9.99, "imageurl": "x.png"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["gameid"].as_i64().expect("numeric gameid");

        let (status, _, entry) = send(&app, Method::GET, &format!("/api/gamedb/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entry["gameid"], json!(id));
        assert_eq!(entry["gamename"], json!("Portal"));
        assert_eq!(entry["price"], json!(9.99));
        assert_eq!(entry["imageurl"], json!("x.png"));
    }

    #[tokio::test]
    async fn supplied_id_is_the_key() {
        let app = test_app().await;
        let (status, _, created) = send(
            &app,
            Method::POST,
            "/api/gamedb",
            Some(json!({"gameid": 400, "gamename": "Portal 2", "price": 19.99, "imageurl": "p2.png"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"gameid": 400}));

        let (status, _, entries) = send(&app, Method::GET, "/api/gamedb", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            entries,
            json!([{"gameid": 400, "gamename": "Portal 2", "price": 19.99, "imageurl": "p2.png"}])
        );
    }

    #[tokio::test]
    async fn duplicate_id_is_bad_request() {
        let app = test_app().await;
        let payload = json!({"gameid": 7, "gamename": "Braid", "price": 4.99, "imageurl": "b.png"});
        let (first, _, _) = send(&app, Method::POST, "/api/gamedb", Some(payload.clone())).await;
        let (second, _, body) = send(&app, Method::POST, "/api/gamedb", Some(payload)).await;
        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::BAD_REQUEST);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let app = test_app().await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/gamedb")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/gamedb",
            Some(json!({"gameid": "seven"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = test_app().await;
        let (status, _, body) = send(&app, Method::GET, "/api/gamedb/9999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn non_integer_id_is_not_found() {
        let app = test_app().await;
        let (status, _, _) = send(&app, Method::GET, "/api/gamedb/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = send(&app, Method::DELETE, "/api/gamedb/abc", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn extra_path_segment_is_bad_request() {
        let app = test_app().await;
        let (status, _, _) = send(&app, Method::GET, "/api/gamedb/1/2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _, _) = send(&app, Method::DELETE, "/api/gamedb/1/2/3", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let app = test_app().await;
        let (_, _, created) = send(
            &app,
            Method::POST,
            "/api/gamedb",
            Some(json!({"gamename": "Limbo", "price": 2.5, "imageurl": "l.png"})),
        )
        .await;
        let uri = format!("/api/gamedb/{}", created["gameid"]);

        let (first, _, _) = send(&app, Method::DELETE, &uri, None).await;
        let (second, _, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::OK);

        let (status, _, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unsupported_methods_are_rejected() {
        let app = test_app().await;
        let (status, _, _) = send(&app, Method::DELETE, "/api/gamedb", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        let (status, _, _) = send(&app, Method::PUT, "/api/gamedb/1", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn preflight_succeeds_on_both_endpoints() {
        let app = test_app().await;
        for uri in ["/api/gamedb", "/api/gamedb/1"] {
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(uri)
                .header(header::ORIGIN, "http://front.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let headers = response.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
        }
    }

    #[tokio::test]
    async fn bare_options_is_answered_as_preflight() {
        let app = test_app().await;
        for uri in ["/api/gamedb", "/api/gamedb/1"] {
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");

            let headers = response.headers();
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
            assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));

            let body = axum::body::to_bytes(response.into_body(), 1024)
                .await
                .unwrap();
            assert!(body.is_empty(), "{uri}");
        }
    }

    #[tokio::test]
    async fn options_with_extra_segment_is_still_preflight() {
        let app = test_app().await;
        let (status, headers, body) = send(&app, Method::OPTIONS, "/api/gamedb/1/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&app, Method::DELETE, "/api/gamedb/1/2", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn responses_carry_cors_and_json_headers() {
        let app = test_app().await;
        let (_, headers, _) = send(&app, Method::GET, "/api/gamedb", None).await;
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));

        let (_, headers, _) = send(&app, Method::GET, "/api/gamedb/42", None).await;
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn storage_failures_are_internal_errors() {
        let app = broken_app();
        let (status, _, body) = send(&app, Method::GET, "/api/gamedb", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, Value::Null);

        let (status, _, _) = send(&app, Method::GET, "/api/gamedb/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, _, _) = send(&app, Method::DELETE, "/api/gamedb/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/api/gamedb",
            Some(json!({"gamename": "Portal"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn healthcheck_reflects_store_reachability() {
        let (status, _, body) = send(&test_app().await, Method::GET, "/healthcheck", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let (status, _, body) = send(&broken_app(), Method::GET, "/healthcheck", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "degraded"}));
    }
}
