//! Editorial content: news articles and calendar events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matchday_common::validation::{
    MaxLengthValidator, NonEmptyStringValidator, Validatable, ValidationError, Validator,
};

use super::RecordStatus;
use crate::schema::EntityRecord;

const MAX_TITLE_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNews {
    pub title: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub status: RecordStatus,
}

impl NewNews {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            cover_image_url: None,
            status: RecordStatus::Draft,
        }
    }
}

impl Validatable for NewNews {
    fn validate(&self) -> Result<(), ValidationError> {
        NonEmptyStringValidator::new("title").validate(&self.title)?;
        MaxLengthValidator::new("title", MAX_TITLE_CHARS).validate(&self.title)?;
        NonEmptyStringValidator::new("content").validate(&self.content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for News {
    type Draft = NewNews;
    type Patch = NewsPatch;
    const TABLE: &'static str = "news";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub status: RecordStatus,
}

impl NewEvent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        starts_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            venue: None,
            starts_at,
            status: RecordStatus::Draft,
        }
    }
}

impl Validatable for NewEvent {
    fn validate(&self) -> Result<(), ValidationError> {
        NonEmptyStringValidator::new("title").validate(&self.title)?;
        MaxLengthValidator::new("title", MAX_TITLE_CHARS).validate(&self.title)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
}

impl EntityRecord for Event {
    type Draft = NewEvent;
    type Patch = EventPatch;
    const TABLE: &'static str = "events";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_draft_validation() {
        assert!(NewNews::new("Cup final set", "The final will be played...").is_valid());
        assert!(!NewNews::new("", "body").is_valid());
        assert!(!NewNews::new("title", " ").is_valid());
        assert!(!NewNews::new("x".repeat(MAX_TITLE_CHARS + 1), "body").is_valid());
    }

    #[test]
    fn news_draft_starts_as_draft() {
        let draft = NewNews::new("A", "B");
        assert_eq!(draft.status, RecordStatus::Draft);
    }

    #[test]
    fn event_patch_serializes_only_set_fields() {
        let patch = EventPatch {
            venue: Some("National Stadium".into()),
            status: Some(RecordStatus::Published),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"venue": "National Stadium", "status": "published"})
        );
    }
}
