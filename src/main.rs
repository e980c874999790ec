use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use portal::{
    AppState,
    cache::{KvStore, MemoryStore, RedisStore},
    config::Config,
    notify::TracingNotifier,
    remote::RemoteSource,
    router::create_router,
};
#[cfg(debug_assertions)]
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env();

    // 未配置 Redis 时使用进程内存储
    let store: Arc<dyn KvStore> = match &config.redis_url {
        Some(url) => {
            tracing::info!("Using redis store at {}", url);
            Arc::new(RedisStore::open(url).expect("Failed to create Redis client"))
        }
        None => {
            tracing::info!("REDIS_URL not set, using in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let remote = RemoteSource::from_config(&config);
    let state = AppState::new(config.clone(), store, remote, Arc::new(TracingNotifier));

    // 恢复上次的会话
    match state.sessions.restore().await {
        Ok(Some(session)) => tracing::info!("Restored session for {}", session.id),
        Ok(None) => tracing::debug!("No session to restore"),
        Err(e) => tracing::warn!("Could not restore session: {}", e),
    }

    let router = create_router(state.clone());

    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(CorsLayer::permissive())
    };

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Student portal listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router,
    )
    .await
    .expect("Failed to start server");
}
