use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    standings::public::{
        event_json, gc_channel, gc_json, gc_page, live_js, notify, sports_json,
    },
    state::AppState,
    util_resp::{StandardResponse, err_not_found},
};

async fn not_found() -> StandardResponse {
    err_not_found()
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/gc", get(gc_json))
        .route("/api/gc/sports", get(sports_json))
        .route("/api/gc/event", get(event_json))
        .route("/api/gc/channel", get(gc_channel))
        .route("/api/notify", post(notify))
        .route("/gc", get(gc_page))
        .route("/gc/live.js", get(live_js))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
