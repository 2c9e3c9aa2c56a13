//! Operum Advisor
//!
//! 로그인(`/auth/login`)으로 서명 토큰을 발급하고, 이후 요청은 Bearer 토큰으로 인증합니다.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod handlers;
mod middleware;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "opr_advisor=debug,opr_core=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("Starting Advisor with config: {:?}", config);

    // 앱 상태 초기화 (키 검증 실패 시 기동 중단)
    let state = Arc::new(AppState::new(&config)?);

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Advisor listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        .route("/me", get(handlers::me::me))
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Middleware (마지막에 추가한 layer가 가장 바깥)
        .layer(from_fn_with_state(state.clone(), middleware::require_principal))
        .layer(from_fn_with_state(state.clone(), middleware::auth_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn(middleware::request_id))
        // State
        .with_state(state)
}
