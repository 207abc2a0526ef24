//! Entity records owned by the hosted backend.
//!
//! These are transient in-memory copies fetched per view; nothing here is
//! persisted locally. Records are flat: an id, descriptive fields, a
//! status, and the backend's creation timestamp.

mod competition;
mod content;
mod org;
mod people;

pub use competition::{
    Competition, CompetitionPatch, Game, GamePatch, GameStatus, NewCompetition, NewGame,
};
pub use content::{Event, EventPatch, NewEvent, NewNews, News, NewsPatch};
pub use org::{
    Club, ClubPatch, Federation, FederationPatch, NewClub, NewFederation,
    NewRegionalAssociation, NewTeam, RegionalAssociation, RegionalAssociationPatch, Team,
    TeamPatch,
};
pub use people::{
    Coach, CoachPatch, NewCoach, NewPlayer, NewReferee, Player, PlayerPatch, Referee,
    RefereePatch,
};

use serde::{Deserialize, Serialize};

/// Publication/activity state shared by the flat records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    Active,
    Inactive,
    Draft,
    Published,
    Archived,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
            RecordStatus::Draft => "draft",
            RecordStatus::Published => "published",
            RecordStatus::Archived => "archived",
        };
        write!(f, "{s}")
    }
}
