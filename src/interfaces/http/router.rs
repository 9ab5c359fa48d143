//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
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

use crate::application::identity::UserService;
use crate::application::staff::{DepartmentService, EmployeeService};
use crate::config::PaginationConfig;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{ApiResponse, EmptyData, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{auth, departments, employees, health, metrics};

/// Everything the router needs, built once at startup
#[derive(Clone)]
pub struct ApiServices {
    pub db: DatabaseConnection,
    pub user_service: Arc<UserService<UserRepository>>,
    pub department_service: Arc<DepartmentService>,
    pub employee_service: Arc<EmployeeService>,
    pub pagination: PaginationConfig,
}

/// Security scheme modifier for OpenAPI
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
                        .description(Some("Session token from /api/auth/login"))
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
        auth::signup,
        auth::login,
        auth::logout,
        auth::logout_all,
        auth::get_current_user,
        auth::delete_account,
        departments::create_department,
        departments::list_departments,
        departments::get_department,
        departments::update_department,
        departments::delete_department,
        employees::create_employee,
        employees::list_employees,
        employees::list_sorted_by_location,
        employees::list_sorted_by_name,
        employees::get_employee,
        employees::update_employee,
        employees::delete_employee,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            PaginatedResponse<employees::EmployeeDto>,
            auth::RoleName,
            auth::SignupRequest,
            auth::LoginRequest,
            auth::SessionResponse,
            auth::UserInfo,
            auth::LogoutAllResponse,
            departments::UserSummary,
            departments::DepartmentDto,
            departments::CreateDepartmentRequest,
            departments::UpdateDepartmentRequest,
            employees::DepartmentSummary,
            employees::EmployeeDto,
            employees::CreateEmployeeRequest,
            employees::UpdateEmployeeRequest,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Authentication", description = "Signup, login, session revocation and own account"),
        (name = "Departments", description = "Departments and their managers"),
        (name = "Employees", description = "Employees, filtering, sorting and paging"),
    ),
    info(
        title = "Staffdesk API",
        version = "0.1.0",
        description = "Departments and employees behind bearer-token authentication",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full HTTP application.
///
/// `metrics_handle` is `None` when no Prometheus recorder is installed; the
/// `/metrics` route is then omitted.
pub fn create_api_router(services: ApiServices, metrics_handle: Option<PrometheusHandle>) -> Router {
    let auth_state = AuthState {
        user_service: services.user_service.clone(),
    };
    let require_auth = middleware::from_fn_with_state(auth_state, auth_middleware);

    // Public and protected routes share the prefix; `route_layer` only
    // guards the routes registered before it.
    let auth_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/logout-all", post(auth::logout_all))
        .route(
            "/me",
            get(auth::get_current_user).delete(auth::delete_account),
        )
        .route_layer(require_auth.clone())
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .with_state(auth::AuthHandlerState {
            user_service: services.user_service.clone(),
        });

    let department_routes = Router::new()
        .route(
            "/",
            get(departments::list_departments).post(departments::create_department),
        )
        .route(
            "/{id}",
            get(departments::get_department)
                .patch(departments::update_department)
                .delete(departments::delete_department),
        )
        .route_layer(require_auth.clone())
        .with_state(departments::DepartmentHandlerState {
            department_service: services.department_service.clone(),
        });

    let employee_routes = Router::new()
        .route(
            "/",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/sorted/location",
            get(employees::list_sorted_by_location),
        )
        .route("/sorted/name", get(employees::list_sorted_by_name))
        .route(
            "/{id}",
            get(employees::get_employee)
                .patch(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route_layer(require_auth)
        .with_state(employees::EmployeeHandlerState {
            employee_service: services.employee_service.clone(),
            pagination: services.pagination.clone(),
        });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db: services.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/departments", department_routes)
        .nest("/api/employees", employee_routes);

    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
