use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A message which is sent following a modification made to one of the
/// site's collections. Individual views use this to decide whether to
/// refresh.
///
/// On the wire this is `{"type": "standings"}`.
pub struct Msg {
    #[serde(rename = "type")]
    pub resource: Resource,
}

impl Msg {
    pub fn new(resource: Resource) -> Self {
        Self { resource }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Teams,
    Schedule,
    Results,
    Standings,
    Gallery,
    Contact,
    Streams,
}

/// A display surface fed by change notifications.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// The GC leaderboard.
    #[default]
    GcStandings,
    /// The GC leaderboard shown beside match results, which also has to
    /// redraw when results change.
    ResultsAndStandings,
}

impl View {
    pub fn refreshes_on(self, resource: Resource) -> bool {
        match self {
            View::GcStandings => {
                matches!(resource, Resource::Standings | Resource::Teams)
            }
            View::ResultsAndStandings => matches!(
                resource,
                Resource::Results | Resource::Standings | Resource::Teams
            ),
        }
    }
}
