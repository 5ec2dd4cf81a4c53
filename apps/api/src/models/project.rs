use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    Docx,
    Pptx,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Docx => "docx",
            DocType::Pptx => "pptx",
        }
    }
}

/// Lifecycle: draft → generating → ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Generating,
    Ready,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Generating => "generating",
            ProjectStatus::Ready => "ready",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "generating" => Ok(ProjectStatus::Generating),
            "ready" => Ok(ProjectStatus::Ready),
            other => Err(format!("unknown project status '{other}'")),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackChoice {
    Like,
    Dislike,
}

impl FeedbackChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackChoice::Like => "like",
            FeedbackChoice::Dislike => "dislike",
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    #[serde(skip_serializing)]
    pub owner_id: i64,
    pub title: String,
    pub topic: String,
    pub doc_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectRow {
    pub fn status(&self) -> Option<ProjectStatus> {
        self.status.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SectionRow {
    pub id: i64,
    #[serde(skip_serializing)]
    pub project_id: i64,
    pub title: String,
    pub position: i32,
    pub content: String,
    pub feedback: Option<String>,
    pub last_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable audit entry. Exactly one of the prompt/response pair, `comment`
/// or `feedback` is populated, depending on the event that produced it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RevisionRow {
    pub id: i64,
    pub section_id: i64,
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub comment: Option<String>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSection {
    pub title: String,
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewProject {
    pub owner_id: i64,
    pub title: String,
    pub topic: String,
    pub doc_type: DocType,
    pub sections: Vec<NewSection>,
}

/// A single-field mutation of a section, always paired with the revision
/// that records it.
#[derive(Debug, Clone)]
pub enum SectionChange {
    Content { prompt: String, response: String },
    Feedback(FeedbackChoice),
    Comment(String),
}

/// Project plus its sections ordered by position.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub sections: Vec<SectionRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&DocType::Pptx).unwrap(), "\"pptx\"");
        assert_eq!(
            serde_json::from_str::<FeedbackChoice>("\"dislike\"").unwrap(),
            FeedbackChoice::Dislike
        );
        assert!(serde_json::from_str::<FeedbackChoice>("\"meh\"").is_err());
    }

    #[test]
    fn test_status_round_trips_through_column_text() {
        for status in [
            ProjectStatus::Draft,
            ProjectStatus::Generating,
            ProjectStatus::Ready,
        ] {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
        assert!("archived".parse::<ProjectStatus>().is_err());
    }
}
