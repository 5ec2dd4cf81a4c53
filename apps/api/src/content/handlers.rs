use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::project::DocType;
use crate::state::AppState;

const MIN_ITEMS: usize = 3;
const MAX_ITEMS: usize = 15;

fn default_item_count() -> usize {
    5
}

#[derive(Debug, Deserialize)]
pub struct OutlineRequest {
    pub topic: String,
    pub doc_type: DocType,
    #[serde(default = "default_item_count")]
    pub item_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutlineResponse {
    pub titles: Vec<String>,
}

/// POST /templates/outline
pub async fn handle_outline(
    State(state): State<AppState>,
    Extension(CurrentUser(_user)): Extension<CurrentUser>,
    ApiJson(req): ApiJson<OutlineRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    let topic = req.topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    if !(MIN_ITEMS..=MAX_ITEMS).contains(&req.item_count) {
        return Err(AppError::Validation(format!(
            "item_count must be between {MIN_ITEMS} and {MAX_ITEMS}"
        )));
    }

    let titles = state
        .content
        .generate_outline(topic, req.doc_type, req.item_count)
        .await
        .into_inner();

    Ok(Json(OutlineResponse { titles }))
}
