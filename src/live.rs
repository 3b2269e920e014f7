//! Keeps a GC table up to date as change notifications arrive.
//!
//! Every notification starts an independent re-fetch. Refreshes are numbered
//! when they start, and a finished refresh is only published if no later
//! one has been published already, so a slow response can never replace a
//! newer table.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use crate::{
    msg::{Msg, View},
    source::{DataSource, SourceError},
    standings::{JoinKey, Standings, calculate_with},
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Zero until the first refresh has been published.
    pub generation: u64,
    pub standings: Standings,
}

pub struct StandingsFeed {
    source: Arc<dyn DataSource>,
    view: View,
    join: JoinKey,
    issued: AtomicU64,
    tx: watch::Sender<Snapshot>,
}

impl StandingsFeed {
    pub fn new(source: Arc<dyn DataSource>, view: View, join: JoinKey) -> Self {
        let (tx, _) = watch::channel(Snapshot::default());
        Self {
            source,
            view,
            join,
            issued: AtomicU64::new(0),
            tx,
        }
    }

    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.source
    }

    pub fn current(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Fetches both collections and recomputes the table. Returns whether
    /// the result was published (it is not if a newer one already was).
    #[tracing::instrument(skip(self), fields(generation = tracing::field::Empty))]
    pub async fn refresh(&self) -> Result<bool, SourceError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", generation);

        let (teams, events) =
            tokio::try_join!(self.source.teams(), self.source.events())?;
        let standings = calculate_with(&events, &teams, self.join);

        let published = self.tx.send_if_modified(|current| {
            if generation > current.generation {
                *current = Snapshot {
                    generation,
                    standings,
                };
                true
            } else {
                false
            }
        });

        if published {
            tracing::debug!(
                "published table for {} teams and {} events",
                teams.len(),
                events.len()
            );
        } else {
            tracing::debug!("dropping stale refresh");
        }

        Ok(published)
    }

    /// Returns the current snapshot, loading it first if nothing has been
    /// published yet.
    pub async fn ensure_loaded(&self) -> Result<Snapshot, SourceError> {
        if self.tx.borrow().generation == 0 {
            self.refresh().await?;
        }
        Ok(self.current())
    }

    /// Loads the table once and then refreshes it on every notification this
    /// feed's view cares about, until the channel closes.
    pub async fn run(self: Arc<Self>, mut rx: broadcast::Receiver<Msg>) {
        self.spawn_refresh();

        loop {
            match rx.recv().await {
                Ok(msg) if self.view.refreshes_on(msg.resource) => {
                    tracing::trace!(resource = ?msg.resource, "refreshing");
                    self.spawn_refresh();
                }
                Ok(_) => (),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!("missed {missed} notifications");
                    self.spawn_refresh();
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        tracing::debug!("notification channel closed");
    }

    fn spawn_refresh(self: &Arc<Self>) {
        let feed = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = feed.refresh().await {
                tracing::error!("could not refresh standings: {e}");
            }
        });
    }
}
