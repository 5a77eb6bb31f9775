use axum::{Router, http::StatusCode, routing::get};

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub(crate) fn router() -> Router {
    Router::new().route("/health", get(health))
}

pub async fn run(bind: &str, port: u16) {
    let listener = match tokio::net::TcpListener::bind((bind, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind health listener on {bind}:{port}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(listener).await {
        tracing::error!("health server failed: {err}");
    }
}

pub async fn run_with_listener(listener: tokio::net::TcpListener) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Health server listening on {}", addr);

    axum::serve(listener, router()).await
}

pub fn spawn_with_listener(
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(listener).await {
            tracing::error!("health server failed: {err}");
        }
    });

    Ok(addr)
}
