//! Export: assembles a project and its ordered sections into an Office
//! document (docx or pptx) held entirely in memory.

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::errors::AppError;
use crate::models::project::DocType;
use crate::projects::service::load_owned_project;
use crate::store::Store;

pub mod docx;
pub mod handlers;
pub mod package;
pub mod pptx;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Bytes,
}

/// Loads an owned project and renders it in `format`.
/// Missing or foreign projects are not found; a project without sections
/// has nothing to export.
pub async fn export_project(
    store: &dyn Store,
    owner_id: i64,
    project_id: i64,
    format: DocType,
) -> Result<ExportedFile, AppError> {
    let project = load_owned_project(store, owner_id, project_id).await?;
    let sections = store.project_sections(project.id).await?;
    if sections.is_empty() {
        return Err(AppError::Validation("No content to export".to_string()));
    }

    let (bytes, media_type) = match format {
        DocType::Docx => (docx::build_docx(&project, &sections)?, docx::MEDIA_TYPE),
        DocType::Pptx => (pptx::build_pptx(&project, &sections)?, pptx::MEDIA_TYPE),
    };

    info!(
        "Exported project {} as {} ({} bytes)",
        project.id,
        format.as_str(),
        bytes.len()
    );

    Ok(ExportedFile {
        filename: format!("{}.{}", safe_file_stem(&project.title), format.as_str()),
        media_type,
        bytes: Bytes::from(bytes),
    })
}

/// The project title without quotes, slashes, backslashes or control
/// characters. Non-ASCII text is kept.
fn safe_file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .filter(|c| !matches!(c, '"' | '\\' | '/') && !c.is_control())
        .collect();
    if stem.trim().is_empty() {
        "document".to_string()
    } else {
        stem
    }
}

impl ExportedFile {
    /// `attachment` with a quoted ASCII `filename` for old clients and an
    /// RFC 5987 `filename*` carrying the exact UTF-8 name.
    pub fn content_disposition(&self) -> String {
        let ascii: String = self
            .filename
            .chars()
            .map(|c| if c.is_ascii() { c } else { '_' })
            .collect();
        format!(
            "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
            urlencoding::encode(&self.filename)
        )
    }
}
