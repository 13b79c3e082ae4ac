//! Storage paths for uploaded files.

use std::path::{Path, PathBuf};

use uuid::Uuid;

pub const UPLOAD_ROOT: &str = "uploads";

/// Extension of `filename` including the leading dot, or `""` if it has none.
/// A leading dot alone (`.bashrc`) is a hidden file, not an extension.
pub fn extension_of(filename: &str) -> &str {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[idx..],
        _ => "",
    }
}

/// `uploads/<namespace>/<id><ext>`, with the id drawn from `next_id`.
pub fn upload_path<F>(namespace: &str, filename: &str, next_id: F) -> PathBuf
where
    F: FnOnce() -> Uuid,
{
    let name = format!("{}{}", next_id(), extension_of(filename));
    Path::new(UPLOAD_ROOT).join(namespace).join(name)
}
