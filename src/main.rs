use todos::application::todo_service::TodoServiceImpl;
use todos::config::ServerConfig;
use todos::http::routing::{self, todos as todo_routes};
use todos::infrastructure::memory_store::TodoStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env()?;
    // Todos live only as long as the process.
    let service = TodoServiceImpl::new(TodoStore::new());
    let router = routing::app(todo_routes::router(todo_routes::AppState { service }));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
