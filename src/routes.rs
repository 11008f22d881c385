//! HTTP router.

use axum::{
  routing::{delete, get, post},
  Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, handlers, state::AppState};

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(handlers::index))
    // Auth
    .route("/api/auth/register", post(auth::register))
    .route("/api/auth/login", post(auth::login))
    .route("/api/auth/logout", post(auth::logout))
    .route("/api/auth/check", get(auth::check))
    .route("/api/auth/stats", get(auth::stats))
    .route("/api/auth/stats/update", post(handlers::update_stats))
    // Words
    .route("/api/words", get(handlers::get_words).post(handlers::add_word))
    .route("/api/words/{word_id}", delete(handlers::delete_word))
    // Practice
    .route("/api/practice", post(handlers::practice))
    .route("/api/check", post(handlers::check_answer))
    .route("/api/game/finish", post(handlers::finish_game))
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::very_permissive())
    .with_state(state)
}
