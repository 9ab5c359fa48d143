//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: database connection,
//! migrations, service wiring, the REST API listener, metrics and graceful
//! shutdown. The CLI binary and the integration tests both start the
//! service through it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::application::identity::UserService;
use crate::application::staff::{DepartmentService, EmployeeService};
use crate::config::AppConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{
    DepartmentRepository, EmployeeRepository, UserRepository,
};
use crate::infrastructure::database::{init_database, run_migrations, DatabaseConfig};
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, ApiServices};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Install the Prometheus recorder and expose `/metrics` (default: true).
    pub enable_metrics: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            enable_metrics: true,
        }
    }
}

/// Wire repositories and services over an open connection.
pub fn build_services(db: DatabaseConnection, config: &AppConfig) -> ApiServices {
    let user_repo = Arc::new(UserRepository::new(db.clone()));
    let department_repo = Arc::new(DepartmentRepository::new(db.clone()));
    let employee_repo = Arc::new(EmployeeRepository::new(db.clone()));

    let user_service = UserService::new(
        user_repo.clone(),
        department_repo.clone(),
        JwtConfig::from(&config.security),
        config.security.bcrypt_cost,
    );
    let department_service = DepartmentService::new(department_repo.clone(), user_repo.clone());
    let employee_service = EmployeeService::new(employee_repo, department_repo, user_repo);

    ApiServices {
        db,
        user_service: Arc::new(user_service),
        department_service: Arc::new(department_service),
        employee_service: Arc::new(employee_service),
        pagination: config.pagination.clone(),
    }
}

/// The global recorder can only be installed once per process, so restarts
/// within one process reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    if let Some(handle) = HANDLE.get() {
        return Some(handle.clone());
    }
    match install_recorder() {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(HANDLE.get_or_init(|| handle).clone())
        }
        Err(e) => {
            warn!(error = %e, "Metrics recorder unavailable, /metrics disabled");
            None
        }
    }
}

/// Handle to a running service.
///
/// ```rust,no_run
/// use staffdesk::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub config: AppConfig,
    /// Address the API is actually bound to (useful with port 0).
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Connect, migrate, wire the services and start serving the API.
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let config = opts.config;
        info!("Starting staff service...");

        let db = init_database(&DatabaseConfig::from(&config.database)).await?;
        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        let metrics_handle = if opts.enable_metrics {
            prometheus_handle()
        } else {
            None
        };

        let services = build_services(db.clone(), &config);
        info!(
            expiration_hours = config.security.jwt_expiration_hours,
            "JWT sessions configured"
        );
        let router = create_api_router(services, metrics_handle);

        let addr = config.api_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait until shutdown is triggered, drain in-flight requests within the
    /// configured timeout and close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(move || async move {
                if let Err(e) = api_task.await {
                    error!("REST API task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            warn!("In-flight requests abandoned");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Staff service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down staff service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing from the logging section.
///
/// `RUST_LOG` wins over the configured level. Call once at process start.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init(),
    };

    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }
}
