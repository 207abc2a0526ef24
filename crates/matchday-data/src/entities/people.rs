//! People: players, coaches, referees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordStatus;
use crate::schema::EntityRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub club_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub position: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub club_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub position: Option<String>,
    pub status: RecordStatus,
}

impl NewPlayer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            club_id: None,
            team_id: None,
            position: None,
            status: RecordStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Player {
    type Draft = NewPlayer;
    type Patch = PlayerPatch;
    const TABLE: &'static str = "players";
    // Roster counts on team pages derive from player assignment
    const DEPENDENTS: &'static [&'static str] = &["teams"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coach {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub club_id: Option<Uuid>,
    pub license: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCoach {
    pub first_name: String,
    pub last_name: String,
    pub club_id: Option<Uuid>,
    pub license: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CoachPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Coach {
    type Draft = NewCoach;
    type Patch = CoachPatch;
    const TABLE: &'static str = "coaches";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReferee {
    pub first_name: String,
    pub last_name: String,
    pub grade: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefereePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Referee {
    type Draft = NewReferee;
    type Patch = RefereePatch;
    const TABLE: &'static str = "referees";
}
