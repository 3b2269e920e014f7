//! Public GC endpoints: the JSON table, the sport index, the live channel
//! and the server-rendered tab.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use hypertext::prelude::*;
use serde::Deserialize;

use crate::{
    events::{EventCategory, StandingsEvent},
    live::StandingsFeed,
    msg::Msg,
    standings::{
        Standings, StandingRow,
        sports::{SportIndex, find_event},
    },
    state::AppState,
    teams::Category,
    template::Page,
    util_resp::{FailureResponse, StandardResponse, success},
};

const LIVE_JS: &str = r#"(function () {
    var root = document.getElementById("gc");
    var shown = root ? root.getAttribute("data-generation") : null;
    var scheme = window.location.protocol === "https:" ? "wss://" : "ws://";
    var ws = new WebSocket(scheme + window.location.host + "/api/gc/channel");
    ws.onmessage = function (event) {
        var frame = JSON.parse(event.data);
        if (String(frame.generation) !== shown) {
            window.location.reload();
        }
    };
    ws.onerror = function (event) {
        console.error("GC channel error:", event);
    };
})();
"#;

pub async fn gc_json(
    State(state): State<AppState>,
) -> Result<Json<Standings>, FailureResponse> {
    let snapshot = state.feed.ensure_loaded().await?;
    Ok(Json(snapshot.standings))
}

pub async fn sports_json(
    State(state): State<AppState>,
) -> Result<Json<SportIndex>, FailureResponse> {
    let events = state.feed.source().events().await?;
    Ok(Json(SportIndex::build(&events)))
}

#[derive(Deserialize)]
pub struct EventQuery {
    sport: String,
    #[serde(default)]
    category: EventCategory,
}

/// The event a results page shows for one sport and category.
pub async fn event_json(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<StandingsEvent>, FailureResponse> {
    let events = state.feed.source().events().await?;
    find_event(&events, &query.sport, &query.category)
        .cloned()
        .map(Json)
        .ok_or(FailureResponse::NotFound(()))
}

/// Entry point for the collections' change notifications. Responds once the
/// notification has been handed to subscribers; refreshes happen afterwards.
pub async fn notify(
    State(state): State<AppState>,
    Json(msg): Json<Msg>,
) -> StatusCode {
    let resource = msg.resource;
    // no subscribers is not an error, nothing needs refreshing
    let receivers = state.tx.send(msg).unwrap_or(0);
    tracing::info!(?resource, "notified {receivers} subscribers");
    StatusCode::ACCEPTED
}

pub async fn gc_channel(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    let feed = state.feed.clone();
    ws.on_upgrade(move |socket| stream_standings(socket, feed))
}

/// Sends the current snapshot once, then again every time a newer one is
/// published. Frames are `{"generation": .., "standings": ..}`.
async fn stream_standings(mut socket: WebSocket, feed: Arc<StandingsFeed>) {
    let mut updates = feed.subscribe();

    if let Err(e) = feed.ensure_loaded().await {
        tracing::error!("could not load standings for channel: {e}");
        return;
    }

    loop {
        let snapshot = updates.borrow_and_update().clone();
        let text = match serde_json::to_string(&snapshot) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("could not serialize standings: {e}");
                return;
            }
        };

        if socket.send(Message::Text(text)).await.is_err() {
            tracing::trace!("channel client went away");
            return;
        }

        if updates.changed().await.is_err() {
            return;
        }
    }
}

pub async fn gc_page(State(state): State<AppState>) -> StandardResponse {
    let snapshot = state.feed.ensure_loaded().await?;
    let standings = &snapshot.standings;

    success(
        Page::new("GC Standings")
            .live()
            .body(maud! {
                div id="gc" data-generation=(snapshot.generation) {
                    h1 { "General Championship" }
                    @for category in [Category::Men, Category::Women] {
                        GcTable
                            category=(category)
                            rows=(standings.bucket(category));
                    }
                }
            })
            .render(),
    )
}

pub async fn live_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], LIVE_JS)
}

pub struct GcTable<'a> {
    pub category: Category,
    pub rows: &'a [StandingRow],
}

impl Renderable for GcTable<'_> {
    fn render_to(
        &self,
        buffer: &mut hypertext::Buffer<hypertext::context::Node>,
    ) {
        maud!({
            h2 { (self.category.to_string()) }
            @if self.rows.is_empty() {
                p { "No teams yet." }
            } @else {
                table {
                    thead {
                        tr {
                            th scope="col" { "#" }
                            th scope="col" { "Team" }
                            th scope="col" { "Gold" }
                            th scope="col" { "Silver" }
                            th scope="col" { "Bronze" }
                            th scope="col" { "Points" }
                        }
                    }
                    tbody {
                        @for (i, row) in self.rows.iter().enumerate() {
                            tr {
                                th scope="row" { (i + 1) }
                                td { (row.name) }
                                td class="num" { (row.gold) }
                                td class="num" { (row.silver) }
                                td class="num" { (row.bronze) }
                                td class="num" { (row.points) }
                            }
                        }
                    }
                }
            }
        })
        .render_to(buffer);
    }
}
