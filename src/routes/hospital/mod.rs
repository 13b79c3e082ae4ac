pub mod create;
pub mod list;

use crate::types::error::AppError;

pub const MAX_NAME_LENGTH: usize = 255;

pub(crate) fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("name", "This field may not be blank."));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(
            "name",
            format!("Ensure this field has no more than {MAX_NAME_LENGTH} characters."),
        ));
    }
    Ok(name.to_string())
}
