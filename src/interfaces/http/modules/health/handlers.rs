//! `GET /health`

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::infrastructure::database::migrator::Migrator;

#[derive(Clone)]
pub struct HealthState {
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

/// `ok` when the store answers and the schema is current, `degraded` when
/// migrations are pending, `unavailable` when the store is unreachable
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
    pub pending_migrations: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

async fn ping(db: &DatabaseConnection) -> Result<u64, DbErr> {
    let started = Instant::now();
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "SELECT 1".to_string(),
    ))
    .await?;
    Ok(started.elapsed().as_millis() as u64)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime_seconds = state.started_at.elapsed().as_secs();
    let version = env!("CARGO_PKG_VERSION").to_string();

    let latency = match ping(&state.db).await {
        Ok(ms) => ms,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            let body = HealthResponse {
                status: "unavailable".to_string(),
                version,
                uptime_seconds,
                database: ComponentHealth {
                    status: "error".to_string(),
                    latency_ms: None,
                },
                pending_migrations: 0,
            };
            return (StatusCode::SERVICE_UNAVAILABLE, Json(body));
        }
    };

    let pending_migrations = match Migrator::get_pending_migrations(&state.db).await {
        Ok(pending) => pending.len(),
        Err(e) => {
            warn!(error = %e, "Could not read migration state");
            0
        }
    };
    let status = if pending_migrations == 0 { "ok" } else { "degraded" };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version,
            uptime_seconds,
            database: ComponentHealth {
                status: "ok".to_string(),
                latency_ms: Some(latency),
            },
            pending_migrations,
        }),
    )
}
