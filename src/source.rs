//! Where the roster and event collections come from.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::{events::StandingsEvent, teams::Team};

pub const TEAMS_FILE: &str = "teams.json";
pub const STANDINGS_FILE: &str = "standings.json";

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed collection in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read access to the teams and standings-event collections.
pub trait DataSource: Send + Sync {
    fn teams(&self) -> BoxFuture<'_, Result<Vec<Team>, SourceError>>;

    fn events(&self) -> BoxFuture<'_, Result<Vec<StandingsEvent>, SourceError>>;
}

/// Serves the collections from `teams.json` and `standings.json` in a
/// directory, in the same shape the REST API returns them.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[tracing::instrument(skip(self))]
    async fn load<T: DeserializeOwned>(
        &self,
        file: &'static str,
    ) -> Result<Vec<T>, SourceError> {
        let path = self.dir.join(file);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} does not exist yet", path.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(SourceError::Io { path, source }),
        };

        let items = serde_json::from_str::<Vec<T>>(&text)
            .map_err(|source| SourceError::Malformed { path, source })?;
        tracing::trace!("loaded {} items", items.len());
        Ok(items)
    }
}

impl DataSource for JsonDirSource {
    fn teams(&self) -> BoxFuture<'_, Result<Vec<Team>, SourceError>> {
        Box::pin(self.load::<Team>(TEAMS_FILE))
    }

    fn events(&self) -> BoxFuture<'_, Result<Vec<StandingsEvent>, SourceError>> {
        Box::pin(self.load::<StandingsEvent>(STANDINGS_FILE))
    }
}

/// Keeps both collections in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    teams: RwLock<Vec<Team>>,
    events: RwLock<Vec<StandingsEvent>>,
}

impl MemorySource {
    pub fn new(teams: Vec<Team>, events: Vec<StandingsEvent>) -> Self {
        Self {
            teams: RwLock::new(teams),
            events: RwLock::new(events),
        }
    }

    pub async fn set_teams(&self, teams: Vec<Team>) {
        *self.teams.write().await = teams;
    }

    pub async fn set_events(&self, events: Vec<StandingsEvent>) {
        *self.events.write().await = events;
    }
}

impl DataSource for MemorySource {
    fn teams(&self) -> BoxFuture<'_, Result<Vec<Team>, SourceError>> {
        Box::pin(async move { Ok(self.teams.read().await.clone()) })
    }

    fn events(&self) -> BoxFuture<'_, Result<Vec<StandingsEvent>, SourceError>> {
        Box::pin(async move { Ok(self.events.read().await.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{events::EventType, teams::Category};

    #[tokio::test]
    async fn test_missing_files_are_empty() {
        let dir = temp_dir::TempDir::new().unwrap();
        let source = JsonDirSource::new(dir.path());

        assert!(source.teams().await.unwrap().is_empty());
        assert!(source.events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reads_collections() {
        let dir = temp_dir::TempDir::new().unwrap();
        std::fs::write(
            dir.child(TEAMS_FILE),
            r#"[{"id": "1", "name": "Gargi", "category": "Women", "members": []}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.child(STANDINGS_FILE),
            r#"[{"id": "9", "sport": "Chess", "type": "Team", "category": "Women",
                 "results": {"first": "Gargi"}}]"#,
        )
        .unwrap();

        let source = JsonDirSource::new(dir.path());
        let teams = source.teams().await.unwrap();
        assert_eq!(teams, vec![Team::new("1", "Gargi", Category::Women)]);

        let events = source.events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventType::Team);
        assert_eq!(events[0].results.first.as_deref(), Some("Gargi"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = temp_dir::TempDir::new().unwrap();
        std::fs::write(dir.child(TEAMS_FILE), "{ not json").unwrap();

        let source = JsonDirSource::new(dir.path());
        let err = source.teams().await.unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
        assert!(err.to_string().contains(TEAMS_FILE));
    }

    #[tokio::test]
    async fn test_memory_source_setters() {
        let source = MemorySource::default();
        assert!(source.teams().await.unwrap().is_empty());

        source
            .set_teams(vec![Team::new("1", "A", Category::Men)])
            .await;
        assert_eq!(source.teams().await.unwrap().len(), 1);
    }
}
