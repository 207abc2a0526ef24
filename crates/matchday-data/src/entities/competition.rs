//! Competitions and games.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordStatus;
use crate::schema::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub season: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCompetition {
    pub name: String,
    pub season: String,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompetitionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Competition {
    type Draft = NewCompetition;
    type Patch = CompetitionPatch;
    const TABLE: &'static str = "competitions";
}

/// Match lifecycle; separate from [`RecordStatus`] because a game's state
/// machine is its own thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Live,
    Played,
    Postponed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewGame {
    pub competition_id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub kickoff_at: DateTime<Utc>,
    pub status: GameStatus,
}

impl NewGame {
    pub fn new(
        competition_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        kickoff_at: DateTime<Utc>,
    ) -> Self {
        Self {
            competition_id,
            home_team_id,
            away_team_id,
            kickoff_at,
            status: GameStatus::Scheduled,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GamePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kickoff_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
}

impl GamePatch {
    /// Record a final score.
    pub fn result(home_score: u32, away_score: u32) -> Self {
        Self {
            home_score: Some(home_score),
            away_score: Some(away_score),
            status: Some(GameStatus::Played),
            ..Default::default()
        }
    }
}

impl EntityRecord for Game {
    type Draft = NewGame;
    type Patch = GamePatch;
    const TABLE: &'static str = "games";
    // Standings shown on competition pages derive from game results
    const DEPENDENTS: &'static [&'static str] = &["competitions"];
}
