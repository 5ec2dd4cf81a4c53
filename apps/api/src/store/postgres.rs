use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::errors::AppError;
use crate::models::project::{
    NewProject, ProjectRow, ProjectStatus, RevisionRow, SectionChange, SectionRow,
};
use crate::models::user::{NewUser, UserRow};
use crate::store::Store;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, AppError> {
        Ok(
            sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn find_user(&self, user_id: i64) -> Result<Option<UserRow>, AppError> {
        Ok(sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_user(&self, user: NewUser) -> Result<UserRow, AppError> {
        let inserted = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, full_name, hashed_password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.hashed_password)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => Ok(row),
            // The unique index on LOWER(email) catches a concurrent duplicate.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AppError::Conflict("Email already registered".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_projects(&self, owner_id: i64) -> Result<Vec<ProjectRow>, AppError> {
        Ok(sqlx::query_as::<_, ProjectRow>(
            "SELECT * FROM projects WHERE owner_id = $1 ORDER BY created_at, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_project(
        &self,
        project: NewProject,
    ) -> Result<(ProjectRow, Vec<SectionRow>), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProjectRow>(
            r#"
            INSERT INTO projects (owner_id, title, topic, doc_type, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(project.owner_id)
        .bind(&project.title)
        .bind(&project.topic)
        .bind(project.doc_type.as_str())
        .bind(ProjectStatus::Draft.as_str())
        .fetch_one(&mut *tx)
        .await?;

        for section in &project.sections {
            sqlx::query(
                "INSERT INTO document_sections (project_id, title, position) VALUES ($1, $2, $3)",
            )
            .bind(row.id)
            .bind(&section.title)
            .bind(section.position)
            .execute(&mut *tx)
            .await?;
        }

        let sections = sqlx::query_as::<_, SectionRow>(
            "SELECT * FROM document_sections WHERE project_id = $1 ORDER BY position, id",
        )
        .bind(row.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Created project {} with {} sections for user {}",
            row.id,
            sections.len(),
            row.owner_id
        );

        Ok((row, sections))
    }

    async fn find_project(&self, project_id: i64) -> Result<Option<ProjectRow>, AppError> {
        Ok(
            sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
                .bind(project_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn project_sections(&self, project_id: i64) -> Result<Vec<SectionRow>, AppError> {
        Ok(sqlx::query_as::<_, SectionRow>(
            "SELECT * FROM document_sections WHERE project_id = $1 ORDER BY position, id",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn set_project_status(
        &self,
        project_id: i64,
        status: ProjectStatus,
    ) -> Result<ProjectRow, AppError> {
        sqlx::query_as::<_, ProjectRow>(
            "UPDATE projects SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
    }

    async fn find_section(&self, section_id: i64) -> Result<Option<SectionRow>, AppError> {
        Ok(
            sqlx::query_as::<_, SectionRow>("SELECT * FROM document_sections WHERE id = $1")
                .bind(section_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn apply_section_change(
        &self,
        section_id: i64,
        change: SectionChange,
    ) -> Result<SectionRow, AppError> {
        let mut tx = self.pool.begin().await?;

        let (update_sql, value, prompt, response, comment, feedback) = match &change {
            SectionChange::Content { prompt, response } => (
                "UPDATE document_sections SET content = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
                response.as_str(),
                Some(prompt.as_str()),
                Some(response.as_str()),
                None,
                None,
            ),
            SectionChange::Feedback(choice) => (
                "UPDATE document_sections SET feedback = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
                choice.as_str(),
                None,
                None,
                None,
                Some(choice.as_str()),
            ),
            SectionChange::Comment(text) => (
                "UPDATE document_sections SET last_comment = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
                text.as_str(),
                None,
                None,
                Some(text.as_str()),
                None,
            ),
        };

        let section = sqlx::query_as::<_, SectionRow>(update_sql)
            .bind(value)
            .bind(section_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

        // Append-only: revisions are inserted, never updated.
        sqlx::query(
            r#"
            INSERT INTO revisions (section_id, prompt, response, comment, feedback)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(section_id)
        .bind(prompt)
        .bind(response)
        .bind(comment)
        .bind(feedback)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(section)
    }

    async fn section_revisions(&self, section_id: i64) -> Result<Vec<RevisionRow>, AppError> {
        Ok(sqlx::query_as::<_, RevisionRow>(
            "SELECT * FROM revisions WHERE section_id = $1 ORDER BY created_at, id",
        )
        .bind(section_id)
        .fetch_all(&self.pool)
        .await?)
    }
}
