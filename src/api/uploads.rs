use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;

use super::validation::parse_directory;
use super::{ApiError, ApiResponse, AppState};
use crate::entities::resources::Directory;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
    pub file_path: String,
    pub file_size: String,
    pub mime_type: String,
    pub directory: Directory,
}

/// Random file name that keeps the original extension.
fn storage_name(original: &str) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 16] = rng.random();

    let mut name = bytes.iter().fold(String::with_capacity(36), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    });

    if let Some(ext) = Path::new(original).extension().and_then(|e| e.to_str()) {
        name.push('.');
        name.push_str(ext);
    }

    name
}

/// POST /upload
/// Accepts a multipart form with a `file` part and an optional `directory`
/// part, stores the file under the public directory and returns its
/// metadata. Recording the file as a resource is a separate call.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedFile>>, ApiError> {
    let public_dir = PathBuf::from(&state.config().read().await.storage.public_dir);

    let mut directory = Directory::Upload;
    let mut upload: Option<(String, Option<String>, axum::body::Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart payload: {e}")))?
    {
        let field_name = field.name().map(ToString::to_string);

        match field_name.as_deref() {
            Some("directory") => {
                let value = field.text().await.map_err(|e| {
                    ApiError::validation(format!("Invalid multipart payload: {e}"))
                })?;
                directory = parse_directory(&value)?;
            }
            Some("file") => {
                let original_name = field
                    .file_name()
                    .map_or_else(|| "file".to_string(), ToString::to_string);
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::validation(format!("Invalid multipart payload: {e}"))
                })?;
                upload = Some((original_name, content_type, bytes));
            }
            _ => {}
        }
    }

    let Some((original_name, content_type, bytes)) = upload else {
        return Err(ApiError::validation("No file provided"));
    };

    let file_name = storage_name(&original_name);
    let file_path = match directory {
        Directory::Root => file_name.clone(),
        Directory::Upload => format!("upload/{file_name}"),
    };

    let destination = public_dir.join(&file_path);
    if let Some(parent) = destination.parent() {
        if let Err(err) = fs::create_dir_all(parent).await {
            tracing::error!("Failed to create upload directory: {}", err);
            return Err(ApiError::FileOperationError(
                "Failed to upload file".to_string(),
            ));
        }
    }
    if let Err(err) = fs::write(&destination, &bytes).await {
        tracing::error!("Failed to write uploaded file {}: {}", file_path, err);
        return Err(ApiError::FileOperationError(
            "Failed to upload file".to_string(),
        ));
    }

    let mime_type = content_type.unwrap_or_else(|| {
        mime_guess::from_path(&original_name)
            .first_or_octet_stream()
            .to_string()
    });

    tracing::info!("Uploaded {} ({} bytes)", file_path, bytes.len());

    Ok(Json(ApiResponse::success(UploadedFile {
        file_name,
        file_path,
        file_size: bytes.len().to_string(),
        mime_type,
        directory,
    })))
}
