//! Project orchestration over the store and the content service.
//!
//! Flow for generation: load (owned) → require sections → status=generating →
//! fill sections (with a revision each) → status=ready → reload detail.

use tracing::{info, warn};

use crate::content::ContentService;
use crate::errors::AppError;
use crate::models::project::{
    DocType, NewProject, NewSection, ProjectDetail, ProjectRow, ProjectStatus, SectionChange,
};
use crate::store::Store;

pub const INITIAL_GENERATION_PROMPT: &str = "initial generation";
pub const REGENERATION_PROMPT: &str = "regeneration";

/// Validated input for a new project.
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub topic: String,
    pub doc_type: DocType,
    pub sections: Vec<NewSection>,
}

/// Loads a project, treating "owned by someone else" the same as missing.
pub async fn load_owned_project(
    store: &dyn Store,
    owner_id: i64,
    project_id: i64,
) -> Result<ProjectRow, AppError> {
    store
        .find_project(project_id)
        .await?
        .filter(|project| project.owner_id == owner_id)
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))
}

pub async fn project_detail(
    store: &dyn Store,
    project: ProjectRow,
) -> Result<ProjectDetail, AppError> {
    let sections = store.project_sections(project.id).await?;
    Ok(ProjectDetail { project, sections })
}

pub async fn create_project(
    store: &dyn Store,
    owner_id: i64,
    input: CreateProject,
) -> Result<ProjectDetail, AppError> {
    let title = input.title.trim();
    let topic = input.topic.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if topic.is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let (project, sections) = store
        .create_project(NewProject {
            owner_id,
            title: title.to_string(),
            topic: topic.to_string(),
            doc_type: input.doc_type,
            sections: input.sections,
        })
        .await?;

    Ok(ProjectDetail { project, sections })
}

/// Fills every empty section (or every section when `regenerate` is set)
/// and records a revision per updated section.
///
/// A store failure part-way through is returned as-is and leaves the
/// project in `generating`; no rollback is attempted.
pub async fn generate_project(
    store: &dyn Store,
    content: &ContentService,
    owner_id: i64,
    project_id: i64,
    regenerate: bool,
) -> Result<ProjectDetail, AppError> {
    let project = load_owned_project(store, owner_id, project_id).await?;

    let sections = store.project_sections(project.id).await?;
    if sections.is_empty() {
        return Err(AppError::Validation("Project has no sections".to_string()));
    }

    store
        .set_project_status(project.id, ProjectStatus::Generating)
        .await?;
    info!("Project {} is generating ({} sections)", project.id, sections.len());

    let prompt = if regenerate {
        REGENERATION_PROMPT
    } else {
        INITIAL_GENERATION_PROMPT
    };

    let mut updated = 0usize;
    let mut degraded = 0usize;
    for section in sections
        .iter()
        .filter(|section| regenerate || section.content.is_empty())
    {
        let generated = content.generate_section(&project.topic, &section.title).await;
        if generated.is_fallback() {
            degraded += 1;
        }
        store
            .apply_section_change(
                section.id,
                SectionChange::Content {
                    prompt: prompt.to_string(),
                    response: generated.into_inner(),
                },
            )
            .await?;
        updated += 1;
    }

    if degraded > 0 && content.has_backend() {
        warn!(
            "Project {}: {degraded} of {updated} sections used fallback content",
            project.id
        );
    }

    let project = store
        .set_project_status(project.id, ProjectStatus::Ready)
        .await?;
    info!("Project {} is ready ({updated} sections updated)", project.id);

    project_detail(store, project).await
}
