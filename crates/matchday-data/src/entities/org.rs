//! Organizational entities: federation, regional associations, clubs, teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matchday_common::validation::{NonEmptyStringValidator, Validatable, ValidationError, Validator};

use super::RecordStatus;
use crate::schema::EntityRecord;

/// The national federation itself. A single-row table in practice, but it
/// goes through the same gateway as everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Federation {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFederation {
    pub name: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FederationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Federation {
    type Draft = NewFederation;
    type Patch = FederationPatch;
    const TABLE: &'static str = "federations";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionalAssociation {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub federation_id: Option<Uuid>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRegionalAssociation {
    pub name: String,
    pub region: String,
    pub federation_id: Option<Uuid>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionalAssociationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federation_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for RegionalAssociation {
    type Draft = NewRegionalAssociation;
    type Patch = RegionalAssociationPatch;
    const TABLE: &'static str = "regional_associations";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub founded_year: Option<i32>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClub {
    pub name: String,
    pub city: String,
    pub founded_year: Option<i32>,
    pub status: RecordStatus,
}

impl NewClub {
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
            founded_year: None,
            status: RecordStatus::Active,
        }
    }
}

impl Validatable for NewClub {
    fn validate(&self) -> Result<(), ValidationError> {
        NonEmptyStringValidator::new("name").validate(&self.name)?;
        NonEmptyStringValidator::new("city").validate(&self.city)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClubPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Club {
    type Draft = NewClub;
    type Patch = ClubPatch;
    const TABLE: &'static str = "clubs";
}

/// A club's squad in a given category (seniors, U19, ...). Roster counts
/// shown on team pages are derived from player assignment, which is why
/// player mutations invalidate this table's cached reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub club_id: Option<Uuid>,
    pub category: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTeam {
    pub name: String,
    pub club_id: Option<Uuid>,
    pub category: Option<String>,
    pub status: RecordStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Team {
    type Draft = NewTeam;
    type Patch = TeamPatch;
    const TABLE: &'static str = "teams";
}
