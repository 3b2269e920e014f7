use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    live::StandingsFeed,
    msg::Msg,
    settings::Settings,
    source::DataSource,
};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<StandingsFeed>,
    pub tx: broadcast::Sender<Msg>,
}

impl AppState {
    /// Starts the GC feed's refresh loop, so this must be called from within
    /// a Tokio runtime.
    pub fn start(source: Arc<dyn DataSource>, settings: &Settings) -> Self {
        let (tx, rx) = broadcast::channel::<Msg>(settings.channel_capacity);
        let feed = Arc::new(StandingsFeed::new(
            source,
            settings.view,
            settings.join,
        ));

        tokio::spawn(feed.clone().run(rx));

        Self { feed, tx }
    }
}
