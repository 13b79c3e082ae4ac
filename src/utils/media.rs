use std::path::{Path, PathBuf};

use actix_web::web;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::types::error::AppError;
use crate::utils::file_path::{extension_of, upload_path};
use crate::utils::token::new_id;

/// Longest extension kept on a stored file, not counting the dot.
pub const MAX_EXTENSION_LENGTH: usize = 16;

/// The extension is copied into the stored file name, so it must be short and
/// plain ASCII alphanumerics.
pub fn validate_filename(filename: &str) -> Result<(), AppError> {
    let ext = extension_of(filename).trim_start_matches('.');
    if ext.len() > MAX_EXTENSION_LENGTH || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(AppError::validation(
            "image",
            format!("File extension must be at most {MAX_EXTENSION_LENGTH} letters or digits."),
        ));
    }
    Ok(())
}

pub fn decode_upload(content_base64: &str) -> Result<Vec<u8>, AppError> {
    let bytes = STANDARD
        .decode(content_base64.trim())
        .map_err(|_| AppError::validation("image", "Upload a valid image. The content is not valid base64."))?;
    if bytes.is_empty() {
        return Err(AppError::validation("image", "The submitted file is empty."));
    }
    Ok(bytes)
}

/// Writes `bytes` under `media_root` at a freshly generated upload path and
/// returns that path relative to the root.
pub async fn store_upload(
    media_root: &Path,
    namespace: &str,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<PathBuf, AppError> {
    validate_filename(filename)?;
    let relative = upload_path(namespace, filename, new_id);
    let absolute = media_root.join(&relative);

    web::block(move || -> std::io::Result<()> {
        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&absolute, bytes)
    })
    .await
    .map_err(|e| AppError::Internal(format!("upload worker failed: {e}")))?
    .map_err(|e| AppError::Internal(format!("could not store upload: {e}")))?;

    Ok(relative)
}

/// Best effort cleanup when the record that would own an upload is not saved.
pub async fn discard_upload(media_root: &Path, relative: &Path) {
    let absolute = media_root.join(relative);
    let error = match web::block(move || std::fs::remove_file(absolute)).await {
        Ok(Ok(())) => return,
        Ok(Err(e)) => e.to_string(),
        Err(e) => e.to_string(),
    };
    tracing::warn!(%error, path = %relative.display(), "could not discard orphaned upload");
}
