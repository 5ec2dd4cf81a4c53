//! Persistence boundary.
//!
//! `AppState` carries an `Arc<dyn Store>`: `PgStore` in production, an
//! in-memory store under test. Ownership checks live one layer up; the
//! store only answers "does this row exist".

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::project::{
    NewProject, ProjectRow, ProjectStatus, RevisionRow, SectionChange, SectionRow,
};
use crate::models::user::{NewUser, UserRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[async_trait]
pub trait Store: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError>;

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError>;

    /// Fails with `AppError::Conflict` when the email is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<UserRow, AppError>;

    /// Projects owned by `owner_id`, oldest first.
    async fn list_projects(&self, owner_id: i64) -> Result<Vec<ProjectRow>, AppError>;

    /// Inserts the project and its initial sections atomically.
    async fn create_project(
        &self,
        project: NewProject,
    ) -> Result<(ProjectRow, Vec<SectionRow>), AppError>;

    async fn find_project(&self, project_id: i64) -> Result<Option<ProjectRow>, AppError>;

    /// Sections ordered by position, ties broken by insertion order (id).
    async fn project_sections(&self, project_id: i64) -> Result<Vec<SectionRow>, AppError>;

    async fn set_project_status(
        &self,
        project_id: i64,
        status: ProjectStatus,
    ) -> Result<ProjectRow, AppError>;

    async fn find_section(&self, section_id: i64) -> Result<Option<SectionRow>, AppError>;

    /// Applies `change` to the section and appends the matching revision in
    /// one unit. Returns the updated section.
    async fn apply_section_change(
        &self,
        section_id: i64,
        change: SectionChange,
    ) -> Result<SectionRow, AppError>;

    /// Revision history, oldest first.
    async fn section_revisions(&self, section_id: i64) -> Result<Vec<RevisionRow>, AppError>;
}
