use crate::content::ContentService;
use crate::errors::AppError;
use crate::models::project::{FeedbackChoice, ProjectRow, RevisionRow, SectionChange, SectionRow};
use crate::projects::service::load_owned_project;
use crate::store::Store;

pub const MAX_REFINE_PROMPT_LEN: usize = 1000;
pub const MIN_COMMENT_LEN: usize = 2;

/// Loads a section whose project belongs to `owner_id`. Missing and
/// foreign sections are indistinguishable to the caller.
pub async fn load_owned_section(
    store: &dyn Store,
    owner_id: i64,
    section_id: i64,
) -> Result<(SectionRow, ProjectRow), AppError> {
    let not_found = || AppError::NotFound("Section not found".to_string());

    let section = store.find_section(section_id).await?.ok_or_else(not_found)?;
    let project = load_owned_project(store, owner_id, section.project_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => not_found(),
            other => other,
        })?;
    Ok((section, project))
}

pub async fn refine_section(
    store: &dyn Store,
    content: &ContentService,
    owner_id: i64,
    section_id: i64,
    instruction: &str,
) -> Result<SectionRow, AppError> {
    let instruction = instruction.trim();
    let len = instruction.chars().count();
    if len == 0 || len > MAX_REFINE_PROMPT_LEN {
        return Err(AppError::Validation(format!(
            "prompt must be between 1 and {MAX_REFINE_PROMPT_LEN} characters"
        )));
    }

    let (section, project) = load_owned_section(store, owner_id, section_id).await?;
    let refined = content
        .refine_section(&project.topic, &section.title, &section.content, instruction)
        .await
        .into_inner();

    store
        .apply_section_change(
            section.id,
            SectionChange::Content {
                prompt: instruction.to_string(),
                response: refined,
            },
        )
        .await
}

pub async fn set_feedback(
    store: &dyn Store,
    owner_id: i64,
    section_id: i64,
    value: FeedbackChoice,
) -> Result<SectionRow, AppError> {
    let (section, _) = load_owned_section(store, owner_id, section_id).await?;
    store
        .apply_section_change(section.id, SectionChange::Feedback(value))
        .await
}

pub async fn add_comment(
    store: &dyn Store,
    owner_id: i64,
    section_id: i64,
    comment: &str,
) -> Result<SectionRow, AppError> {
    if comment.trim().chars().count() < MIN_COMMENT_LEN {
        return Err(AppError::Validation(format!(
            "comment must be at least {MIN_COMMENT_LEN} characters"
        )));
    }

    let (section, _) = load_owned_section(store, owner_id, section_id).await?;
    store
        .apply_section_change(section.id, SectionChange::Comment(comment.to_string()))
        .await
}

pub async fn revisions(
    store: &dyn Store,
    owner_id: i64,
    section_id: i64,
) -> Result<Vec<RevisionRow>, AppError> {
    let (section, _) = load_owned_section(store, owner_id, section_id).await?;
    store.section_revisions(section.id).await
}
