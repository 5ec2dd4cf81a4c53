use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::project::{DocType, NewSection, ProjectDetail, ProjectRow};
use crate::projects::service::{self, CreateProject};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub topic: String,
    pub doc_type: DocType,
    pub sections: Vec<NewSection>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub regenerate: bool,
}

/// GET /projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(state.store.list_projects(user.id).await?))
}

/// POST /projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectDetail>), AppError> {
    let detail = service::create_project(
        state.store.as_ref(),
        user.id,
        CreateProject {
            title: req.title,
            topic: req.topic,
            doc_type: req.doc_type,
            sections: req.sections,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectDetail>, AppError> {
    let store = state.store.as_ref();
    let project = service::load_owned_project(store, user.id, project_id).await?;
    Ok(Json(service::project_detail(store, project).await?))
}

/// POST /projects/:id/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
    ApiJson(req): ApiJson<GenerateRequest>,
) -> Result<Json<ProjectDetail>, AppError> {
    let detail = service::generate_project(
        state.store.as_ref(),
        &state.content,
        user.id,
        project_id,
        req.regenerate,
    )
    .await?;

    Ok(Json(detail))
}
