//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BrandService, CustomerService, DeviceModelService, DeviceService, MediaService,
    RealtimeLogService, RepairItemService, RepairSessionService, ServiceCatalogService,
    TransactionService, UserService, WarrantyService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::storage::FileStorage;
use crate::interfaces::http::common::{ApiResponse, PaginationParams};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    auth, brands, customers, device_models, devices, logs, media, repair_items, repair_sessions,
    service_catalog, transactions, users, warranties,
};

/// Headroom on top of the file size limit for multipart framing and text fields
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared state for every route. Handlers take `State<AppState>`; the health
/// probe and the auth middleware get their own slices through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub customers: Arc<CustomerService>,
    pub brands: Arc<BrandService>,
    pub device_models: Arc<DeviceModelService>,
    pub service_catalog: Arc<ServiceCatalogService>,
    pub devices: Arc<DeviceService>,
    pub repair_sessions: Arc<RepairSessionService>,
    pub repair_items: Arc<RepairItemService>,
    pub transactions: Arc<TransactionService>,
    pub warranties: Arc<WarrantyService>,
    pub logs: Arc<RealtimeLogService>,
    pub media: Arc<MediaService>,
    pub auth: AuthState,
    pub health: HealthState,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        jwt_config: JwtConfig,
        storage: Arc<dyn FileStorage>,
        max_file_size: u64,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

        Self {
            users: Arc::new(UserService::new(repos.clone(), jwt_config.clone())),
            customers: Arc::new(CustomerService::new(repos.clone())),
            brands: Arc::new(BrandService::new(repos.clone())),
            device_models: Arc::new(DeviceModelService::new(repos.clone())),
            service_catalog: Arc::new(ServiceCatalogService::new(repos.clone())),
            devices: Arc::new(DeviceService::new(repos.clone())),
            repair_sessions: Arc::new(RepairSessionService::new(repos.clone())),
            repair_items: Arc::new(RepairItemService::new(repos.clone())),
            transactions: Arc::new(TransactionService::new(repos.clone())),
            warranties: Arc::new(WarrantyService::new(repos.clone())),
            logs: Arc::new(RealtimeLogService::new(repos.clone())),
            media: Arc::new(MediaService::new(repos, storage, max_file_size)),
            auth: AuthState { jwt_config },
            health: HealthState::new(db),
            max_upload_bytes: usize::try_from(max_file_size)
                .unwrap_or(usize::MAX)
                .saturating_add(MULTIPART_OVERHEAD),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::get_current_user,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::activate_user,
        users::deactivate_user,
        users::delete_user,
        customers::list_customers,
        customers::search_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        brands::list_brands,
        brands::list_active_brands,
        brands::get_brand,
        brands::create_brand,
        brands::update_brand,
        brands::delete_brand,
        device_models::list_models_by_brand,
        device_models::list_models_by_type,
        device_models::get_model,
        device_models::create_model,
        device_models::update_model,
        device_models::delete_model,
        service_catalog::list_services,
        service_catalog::list_active_services,
        service_catalog::get_service,
        service_catalog::create_service,
        service_catalog::update_service,
        service_catalog::delete_service,
        devices::list_devices,
        devices::get_device,
        devices::create_device,
        devices::update_device,
        devices::change_status,
        devices::assign_device,
        devices::delete_device,
        repair_sessions::create_session,
        repair_sessions::update_session,
        repair_sessions::get_session,
        repair_sessions::list_sessions_by_device,
        repair_sessions::list_sessions,
        repair_items::create_item,
        repair_items::update_item,
        repair_items::get_item,
        repair_items::list_items_by_device,
        repair_items::device_total,
        repair_items::delete_item,
        transactions::create_transaction,
        transactions::update_transaction,
        transactions::get_transaction,
        transactions::list_transactions,
        transactions::list_transactions_by_device,
        transactions::revenue,
        transactions::delete_transaction,
        warranties::create_warranty,
        warranties::update_warranty,
        warranties::get_warranty,
        warranties::get_warranty_by_code,
        warranties::list_warranties_by_device,
        warranties::list_expiring,
        warranties::list_expired,
        warranties::delete_warranty,
        logs::list_device_logs,
        media::upload_media,
        media::get_media,
        media::download_media,
        media::serve_file,
        media::list_media_by_entity,
        media::my_uploads,
        media::list_media,
        media::delete_media,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginationParams,
            health::HealthResponse,
            auth::LoginRequest,
            auth::LoginResponse,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            customers::CustomerDto,
            customers::CustomerRequest,
            brands::BrandDto,
            brands::CreateBrandRequest,
            brands::UpdateBrandRequest,
            device_models::DeviceModelDto,
            device_models::CreateDeviceModelRequest,
            device_models::UpdateDeviceModelRequest,
            service_catalog::ServiceCatalogDto,
            service_catalog::CreateServiceCatalogRequest,
            service_catalog::UpdateServiceCatalogRequest,
            devices::DeviceDto,
            devices::CreateDeviceRequest,
            devices::UpdateDeviceRequest,
            devices::ChangeStatusRequest,
            devices::AssignRequest,
            repair_sessions::RepairSessionDto,
            repair_sessions::CreateRepairSessionRequest,
            repair_sessions::UpdateRepairSessionRequest,
            repair_items::RepairItemDto,
            repair_items::CreateRepairItemRequest,
            repair_items::UpdateRepairItemRequest,
            repair_items::TotalCostDto,
            transactions::TransactionDto,
            transactions::TransactionRequest,
            transactions::RevenueDto,
            warranties::WarrantyDto,
            warranties::CreateWarrantyRequest,
            warranties::UpdateWarrantyRequest,
            logs::RealtimeLogDto,
            media::MediaDto,
            media::UploadMediaForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Login and the current staff member"),
        (name = "Users", description = "Staff accounts (admin only)"),
        (name = "Customers", description = "Customer directory"),
        (name = "Brands", description = "Device brands"),
        (name = "Device Models", description = "Models per brand"),
        (name = "Service Catalog", description = "Priced repair services"),
        (name = "Devices", description = "Device intake, status and billing totals"),
        (name = "Repair Sessions", description = "Visits of a device to the shop"),
        (name = "Repair Items", description = "Work performed on a device"),
        (name = "Transactions", description = "Payments and revenue"),
        (name = "Warranties", description = "Warranty issuance and lookup"),
        (name = "Logs", description = "Per-device audit trail"),
        (name = "Media", description = "File attachments"),
    ),
    info(
        title = "FixSync Repair Shop API",
        version = "1.0.0",
        description = "Device intake, repairs, billing and warranties for a repair shop"
    )
)]
pub struct ApiDoc;

/// Routes under `/api/v1`
fn api_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/auth/login", post(auth::login));

    let protected = Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(customers::routes())
        .merge(brands::routes())
        .merge(device_models::routes())
        .merge(service_catalog::routes())
        .merge(devices::routes())
        .merge(repair_sessions::routes())
        .merge(repair_items::routes())
        .merge(transactions::routes())
        .merge(warranties::routes())
        .merge(logs::routes())
        .merge(media::routes())
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    public.merge(protected)
}

/// Build the full application router.
///
/// `/metrics` is mounted only when a Prometheus recorder was installed.
pub fn create_api_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_routes(&state))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(handle) = metrics {
        app = app.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    app.layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::application::CreateUser;
    use crate::domain::{DeviceModel, RepositoryProvider, UserRole};
    use crate::infrastructure::database::test_support::memory_db;
    use crate::infrastructure::storage::InMemoryFileStorage;

    struct TestApp {
        router: Router,
        repos: Arc<dyn RepositoryProvider>,
        state: AppState,
    }

    async fn test_app() -> TestApp {
        let db = memory_db().await;
        let state = AppState::new(
            db.clone(),
            JwtConfig::default(),
            Arc::new(InMemoryFileStorage::default()),
            1024 * 1024,
        );
        for (email, role) in [
            ("admin@shop.test", UserRole::Admin),
            ("tech@shop.test", UserRole::Technician),
            ("desk@shop.test", UserRole::Receptionist),
        ] {
            state
                .users
                .create_user(CreateUser {
                    full_name: email.into(),
                    email: email.into(),
                    password: "secret123".into(),
                    phone: None,
                    role: Some(role),
                })
                .await
                .unwrap();
        }
        TestApp {
            router: create_api_router(state.clone(), None),
            repos: Arc::new(SeaOrmRepositoryProvider::new(db)),
            state,
        }
    }

    impl TestApp {
        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut req = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let body = match body {
                Some(json) => {
                    req = req.header(header::CONTENT_TYPE, "application/json");
                    Body::from(serde_json::to_vec(&json).unwrap())
                }
                None => Body::empty(),
            };
            let resp = self
                .router
                .clone()
                .into_service()
                .call(req.body(body).unwrap())
                .await
                .unwrap();
            let status = resp.status();
            let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }

        async fn login(&self, email: &str) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/v1/auth/login",
                    None,
                    Some(json!({"email": email, "password": "secret123"})),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "login failed: {}", body);
            body["data"]["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = test_app().await;
        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn login_rejects_bad_password() {
        let app = test_app().await;
        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(json!({"email": "admin@shop.test", "password": "wrong-pass"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn protected_routes_need_a_token() {
        let app = test_app().await;
        let (status, _) = app.send(Method::GET, "/api/v1/devices", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = app.login("tech@shop.test").await;
        let (status, body) = app.send(Method::GET, "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role"], "TECHNICIAN");
    }

    #[tokio::test]
    async fn role_sets_are_enforced() {
        let app = test_app().await;
        let tech = app.login("tech@shop.test").await;
        let desk = app.login("desk@shop.test").await;

        let (status, _) = app.send(Method::GET, "/api/v1/users", Some(&tech), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let customer = json!({"name": "Nguyen Van A", "phone": "0901234567"});
        let (status, _) = app
            .send(Method::POST, "/api/v1/customers", Some(&tech), Some(customer.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = app
            .send(Method::POST, "/api/v1/customers", Some(&desk), Some(customer))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["phone"], "0901234567");

        let (status, _) = app
            .send(
                Method::GET,
                "/api/v1/transactions/revenue?start=2024-01-01T00:00:00Z&end=2024-12-31T00:00:00Z",
                Some(&tech),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn device_billing_flow() {
        let app = test_app().await;
        let admin = app.login("admin@shop.test").await;
        let tech = app.login("tech@shop.test").await;

        let brand = app.state.brands.create("Samsung", None).await.unwrap();
        let model = app
            .repos
            .device_models()
            .save(DeviceModel::new(brand.id, "Galaxy S21", "PHONE"))
            .await
            .unwrap();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/devices",
                Some(&tech),
                Some(json!({"brandId": brand.id, "modelId": model.id, "imei": "356789012345678"})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        let device_id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["deviceType"], "PHONE");
        assert_eq!(body["data"]["status"], "RECEIVED");

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/repair-items",
                Some(&tech),
                Some(json!({"deviceId": device_id, "serviceName": "Screen", "cost": 350000})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let payment = json!({"deviceId": device_id, "total": 350000, "discount": 50000, "paymentMethod": "CASH"});
        let (status, _) = app
            .send(Method::POST, "/api/v1/transactions", Some(&tech), Some(payment.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = app
            .send(Method::POST, "/api/v1/transactions", Some(&admin), Some(payment.clone()))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["finalAmount"], 300000);
        let (status, _) = app
            .send(Method::POST, "/api/v1/transactions", Some(&admin), Some(payment))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/v1/devices/{}", device_id);
        let (status, body) = app.send(Method::GET, &uri, Some(&tech), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["repairSubtotal"], 350000);
        assert_eq!(body["data"]["outstandingAmount"], 50000);

        let (status, body) = app
            .send(
                Method::PATCH,
                &format!("{}/status", uri),
                Some(&tech),
                Some(json!({"status": "REPAIRING"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "REPAIRING");

        let (status, body) = app
            .send(
                Method::GET,
                &format!("/api/v1/logs/device/{}?action=STATUS_CHANGED", device_id),
                Some(&tech),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, _) = app.send(Method::DELETE, &uri, Some(&tech), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, _) = app.send(Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = app.send(Method::GET, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_body_is_unprocessable() {
        let app = test_app().await;
        let admin = app.login("admin@shop.test").await;
        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/service-catalog",
                Some(&admin),
                Some(json!({"name": "", "baseCost": 100})),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn openapi_document_lists_resources() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/devices/{id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/warranties/code/{code}"));
    }
}
