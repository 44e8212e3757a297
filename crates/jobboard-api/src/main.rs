//! 잡보드 API 서버 진입점.
//!
//! 설정 로드 → 로깅 → 메트릭 → 저장소 연결(PostgreSQL 또는 메모리) → 역할 시딩 → 서버 시작.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};

use jobboard_api::repository::PgRepository;
use jobboard_api::{create_router, setup_metrics_recorder, AppState, TokenService};
use jobboard_core::{init_logging, AppConfig, LogConfig};

/// 설정에 따라 저장소를 연결하고 AppState를 만듭니다.
///
/// `database.url`이 없으면 메모리 저장소로 동작합니다 (개발 모드).
async fn create_app_state(config: &AppConfig, tokens: TokenService) -> anyhow::Result<AppState> {
    let Some(url) = &config.database.url else {
        warn!("database.url not set, using in-memory store (data is lost on restart)");
        return Ok(AppState::in_memory(tokens));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(url.expose_secret())
        .await
        .context("데이터베이스 연결 실패")?;
    info!(
        max_connections = config.database.max_connections,
        "PostgreSQL connection pool created"
    );

    PgRepository::new(pool.clone()).migrate().await?;

    Ok(AppState::postgres(pool, tokens))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("설정 로드 실패")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    info!("Starting JobBoard API server...");

    // 서명 키가 없거나 짧으면 여기서 종료
    config.validate()?;
    let tokens = TokenService::from_settings(&config.jwt)?;

    let metrics_handle = setup_metrics_recorder()?;
    info!("Prometheus metrics recorder initialized");

    let state = create_app_state(&config, tokens).await?;
    state.users.seed_roles().await?;
    info!(
        version = %state.version,
        store = state.health.backend(),
        "Application state initialized"
    );

    let app = create_router(Arc::new(state), &config.server, Some(metrics_handle));

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("{} 바인딩 실패", addr))?;

    info!(%addr, "API server listening");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
