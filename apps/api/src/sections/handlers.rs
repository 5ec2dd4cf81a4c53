use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::project::{FeedbackChoice, RevisionRow, SectionRow};
use crate::sections::service;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub value: FeedbackChoice,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

/// POST /sections/:id/refine
pub async fn handle_refine(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(section_id): Path<i64>,
    ApiJson(req): ApiJson<RefineRequest>,
) -> Result<Json<SectionRow>, AppError> {
    let section = service::refine_section(
        state.store.as_ref(),
        &state.content,
        user.id,
        section_id,
        &req.prompt,
    )
    .await?;
    Ok(Json(section))
}

/// POST /sections/:id/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(section_id): Path<i64>,
    ApiJson(req): ApiJson<FeedbackRequest>,
) -> Result<Json<SectionRow>, AppError> {
    let section =
        service::set_feedback(state.store.as_ref(), user.id, section_id, req.value).await?;
    Ok(Json(section))
}

/// POST /sections/:id/comment
pub async fn handle_comment(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(section_id): Path<i64>,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<Json<SectionRow>, AppError> {
    let section =
        service::add_comment(state.store.as_ref(), user.id, section_id, &req.comment).await?;
    Ok(Json(section))
}

/// GET /sections/:id/revisions
pub async fn handle_revisions(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(section_id): Path<i64>,
) -> Result<Json<Vec<RevisionRow>>, AppError> {
    Ok(Json(
        service::revisions(state.store.as_ref(), user.id, section_id).await?,
    ))
}
