use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::IntoResponse,
    Extension,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::export::export_project;
use crate::extract::ApiQuery;
use crate::models::project::DocType;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: DocType,
}

/// GET /export/:project_id?format=docx|pptx
pub async fn handle_export(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(project_id): Path<i64>,
    ApiQuery(query): ApiQuery<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let file = export_project(state.store.as_ref(), user.id, project_id, query.format).await?;

    let disposition = HeaderValue::from_str(&file.content_disposition())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Content-Disposition: {e}")))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.media_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}
