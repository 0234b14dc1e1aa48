mod category;
mod product;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{CategoryResponse, CategorySummary, ProductResponse},
    },
    errors::ErrorResponse,
    utils::shutdown_signal,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::category::category_routes;
pub use self::product::product_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        category::get_categories,
    ),
    components(schemas(
        CreateProductRequest,
        UpdateProductRequest,
        ProductResponse,
        CategorySummary,
        CategoryResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Product", description = "Product endpoints"),
        (name = "Category", description = "Category endpoints"),
    )
)]
struct ApiDoc;

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}"),
        );
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: Arc<AppState>) -> Router {
        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(app_state.clone())
            .merge(product_routes(app_state.clone()))
            .merge(category_routes(app_state.clone()));

        let (app_router, api) = api_router.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::category::CategoryCommandRepositoryTrait,
        di::{DependenciesInject, Repositories},
        repository::memory::InMemoryCatalog,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, Response},
    };
    use prometheus_client::registry::Registry;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(repo: &InMemoryCatalog) -> Router {
        let mut registry = Registry::default();
        let repo = Arc::new(repo.clone());
        let di_container = DependenciesInject::from_repositories(
            Repositories {
                product_query: repo.clone(),
                product_command: repo.clone(),
                category_query: repo,
            },
            &mut registry,
        )
        .unwrap();

        AppRouter::build(Arc::new(AppState::from_parts(di_container, registry)))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_then_fetch_product_with_categories() {
        let repo = InMemoryCatalog::new();
        let electronics = repo.create_category("Electronics", None).await.unwrap();
        let computers = repo
            .create_category("Computers", Some(&electronics.id))
            .await
            .unwrap();
        let app = app(&repo);

        let created = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/product",
                json!({
                    "name": "Laptop",
                    "qty": 10,
                    "price": 1500,
                    "photo": "laptop.jpg",
                    "categoryIds": [computers.id]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["status"], "success");
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let fetched = app
            .clone()
            .oneshot(get_request(&format!("/product/{id}")))
            .await
            .unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched = body_json(fetched).await;
        assert_eq!(
            fetched["data"]["categories"],
            json!([{ "id": computers.id, "name": "Computers" }])
        );

        let categories = body_json(app.oneshot(get_request("/category")).await.unwrap()).await;
        assert_eq!(categories["data"][0]["name"], "Electronics");
        assert_eq!(
            categories["data"][0]["childCategories"][0]["name"],
            "Computers"
        );
        assert_eq!(
            categories["data"][0]["childCategories"][0]["parentCategoryId"],
            json!(electronics.id)
        );
        assert_eq!(categories["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_filters_by_name_query() {
        let repo = InMemoryCatalog::new();
        let app = app(&repo);

        for name in ["Smartphone", "Laptop"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/product",
                    json!({ "name": name, "qty": 1, "price": 9.5, "photo": "p.jpg" }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let filtered = body_json(app.clone().oneshot(get_request("/product?name=Smart")).await.unwrap()).await;
        let all = body_json(app.oneshot(get_request("/product")).await.unwrap()).await;

        assert_eq!(filtered["data"].as_array().unwrap().len(), 1);
        assert_eq!(filtered["data"][0]["name"], "Smartphone");
        assert_eq!(all["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn missing_product_is_404_for_get_patch_and_delete() {
        let repo = InMemoryCatalog::new();
        let app = app(&repo);

        let requests = [
            get_request("/product/missing"),
            json_request("PATCH", "/product/missing", json!({ "name": "x" })),
            Request::builder()
                .method("DELETE")
                .uri("/product/missing")
                .body(Body::empty())
                .unwrap(),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body = body_json(response).await;
            assert_eq!(body["status"], "error");
            assert_eq!(body["message"], "Product with ID missing not found");
        }
        assert_eq!(repo.update_calls(), 0);
        assert_eq!(repo.delete_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_body_is_400_with_details() {
        let app = app(&InMemoryCatalog::new());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/product",
                json!({ "name": "Laptop", "qty": 0, "price": 1, "photo": "p.jpg" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"]["qty"].is_array());

        let malformed = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/product")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_category_is_400() {
        let repo = InMemoryCatalog::new();
        let app = app(&repo);

        let response = app
            .oneshot(json_request(
                "POST",
                "/product",
                json!({
                    "name": "Laptop", "qty": 1, "price": 1, "photo": "p.jpg",
                    "categoryIds": ["ghost"]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(repo.product_count(), 0);
    }

    #[tokio::test]
    async fn patch_with_empty_category_ids_clears_them_and_delete_returns_last_state() {
        let repo = InMemoryCatalog::new();
        let category = repo.create_category("Chairs", None).await.unwrap();
        let app = app(&repo);

        let created = body_json(
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/product",
                    json!({
                        "name": "Stool", "qty": 2, "price": 30, "photo": "stool.jpg",
                        "categoryIds": [category.id]
                    }),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let patched = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/product/{id}"),
                json!({ "categoryIds": [] }),
            ))
            .await
            .unwrap();
        assert_eq!(patched.status(), StatusCode::OK);
        assert_eq!(body_json(patched).await["data"]["categories"], json!([]));

        let deleted = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/product/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);
        assert_eq!(body_json(deleted).await["data"]["name"], "Stool");

        let gone = app.oneshot(get_request(&format!("/product/{id}"))).await.unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn metrics_endpoint_exposes_service_counters() {
        let app = app(&InMemoryCatalog::new());

        app.clone().oneshot(get_request("/category")).await.unwrap();
        let response = app.oneshot(get_request("/metrics")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("category_query_service_request_counter_total"));
    }
}
