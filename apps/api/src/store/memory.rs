//! In-memory `Store` used by handler and orchestration tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::project::{
    NewProject, ProjectRow, ProjectStatus, RevisionRow, SectionChange, SectionRow,
};
use crate::models::user::{NewUser, UserRow};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: Vec<UserRow>,
    projects: Vec<ProjectRow>,
    sections: Vec<SectionRow>,
    revisions: Vec<RevisionRow>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn sections_of(&self, project_id: i64) -> Vec<SectionRow> {
        let mut sections: Vec<SectionRow> = self
            .sections
            .iter()
            .filter(|s| s.project_id == project_id)
            .cloned()
            .collect();
        sections.sort_by_key(|s| (s.position, s.id));
        sections
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn revision_count(&self) -> usize {
        self.tables.lock().await.revisions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow, AppError> {
        let mut tables = self.tables.lock().await;
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }
        let row = UserRow {
            id: tables.next_id(),
            email: user.email,
            full_name: user.full_name,
            hashed_password: user.hashed_password,
            created_at: Utc::now(),
        };
        tables.users.push(row.clone());
        Ok(row)
    }

    async fn list_projects(&self, owner_id: i64) -> Result<Vec<ProjectRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .projects
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn create_project(
        &self,
        project: NewProject,
    ) -> Result<(ProjectRow, Vec<SectionRow>), AppError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let row = ProjectRow {
            id: tables.next_id(),
            owner_id: project.owner_id,
            title: project.title,
            topic: project.topic,
            doc_type: project.doc_type.as_str().to_string(),
            status: ProjectStatus::Draft.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.projects.push(row.clone());
        for section in project.sections {
            let id = tables.next_id();
            tables.sections.push(SectionRow {
                id,
                project_id: row.id,
                title: section.title,
                position: section.position,
                content: String::new(),
                feedback: None,
                last_comment: None,
                created_at: now,
                updated_at: now,
            });
        }
        let sections = tables.sections_of(row.id);
        Ok((row, sections))
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<ProjectRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.projects.iter().find(|p| p.id == project_id).cloned())
    }

    async fn project_sections(&self, project_id: i64) -> Result<Vec<SectionRow>, AppError> {
        Ok(self.tables.lock().await.sections_of(project_id))
    }

    async fn set_project_status(
        &self,
        project_id: i64,
        status: ProjectStatus,
    ) -> Result<ProjectRow, AppError> {
        let mut tables = self.tables.lock().await;
        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
        project.status = status.as_str().to_string();
        project.updated_at = Utc::now();
        Ok(project.clone())
    }

    async fn find_section(&self, section_id: i64) -> Result<Option<SectionRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.sections.iter().find(|s| s.id == section_id).cloned())
    }

    async fn apply_section_change(
        &self,
        section_id: i64,
        change: SectionChange,
    ) -> Result<SectionRow, AppError> {
        let mut tables = self.tables.lock().await;
        let revision_id = tables.next_id();
        let now = Utc::now();
        let section = tables
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

        let mut revision = RevisionRow {
            id: revision_id,
            section_id,
            prompt: None,
            response: None,
            comment: None,
            feedback: None,
            created_at: now,
        };
        match change {
            SectionChange::Content { prompt, response } => {
                section.content = response.clone();
                revision.prompt = Some(prompt);
                revision.response = Some(response);
            }
            SectionChange::Feedback(choice) => {
                section.feedback = Some(choice.as_str().to_string());
                revision.feedback = Some(choice.as_str().to_string());
            }
            SectionChange::Comment(text) => {
                section.last_comment = Some(text.clone());
                revision.comment = Some(text);
            }
        }
        section.updated_at = now;
        let updated = section.clone();
        tables.revisions.push(revision);
        Ok(updated)
    }

    async fn section_revisions(&self, section_id: i64) -> Result<Vec<RevisionRow>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .revisions
            .iter()
            .filter(|r| r.section_id == section_id)
            .cloned()
            .collect())
    }
}
