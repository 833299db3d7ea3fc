use axum::routing::{get, post};
use axum::Router;
use fizzbuzz_core::StatsRepository;
use tower_http::trace::TraceLayer;

use crate::handlers::{fizzbuzz_handler, health_handler, stats_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router<R: StatsRepository>(state: AppState<R>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/v1",
                Router::new()
                    .route("/fizzbuzz", post(fizzbuzz_handler::<R>))
                    .route("/stats", get(stats_handler::<R>)),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
