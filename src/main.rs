use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hanzi_trainer::{auth, config, routes, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hanzi_trainer=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let settings = config::load();
  tracing::info!("Data directory: {}", settings.data_dir.display());

  let state = AppState::open(&settings.data_dir, settings.words)
    .unwrap_or_else(|e| panic!("Failed to open data directory {}: {}", settings.data_dir.display(), e));

  {
    let conn = state.auth_db.lock().expect("Session database lock failed during startup");
    match auth::db::cleanup_expired_sessions(&conn) {
      Ok(0) => {}
      Ok(n) => tracing::info!("Removed {} expired sessions", n),
      Err(e) => tracing::warn!("Failed to clean up expired sessions: {}", e),
    }
  }

  let app = routes::router(state);

  let bind_addr = settings.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", settings.server_port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
