//! Input checks shared by the services. All of them run before any read or
//! write, so a rejected call never leaves partial state behind.

use super::error::{ServiceError, ServiceResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_URL_LENGTH: usize = 2048;

/// The acting user must be identified.
pub fn require_caller(user_id: &str) -> ServiceResult<()> {
    if user_id.trim().is_empty() {
        return Err(ServiceError::validation("User id is required"));
    }
    Ok(())
}

/// A required, bounded, non-blank name.
pub fn require_name(field: &str, value: &str) -> ServiceResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ServiceError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// A required identifier or key.
pub fn require_key(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn check_description(value: &str) -> ServiceResult<()> {
    if value.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ServiceError::validation(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}

pub fn check_url(value: Option<&str>) -> ServiceResult<()> {
    match value {
        Some(url) if url.len() > MAX_URL_LENGTH => Err(ServiceError::validation(format!(
            "URL must be at most {} characters",
            MAX_URL_LENGTH
        ))),
        _ => Ok(()),
    }
}

pub fn require_quantity(quantity: u32) -> ServiceResult<()> {
    if quantity < 1 {
        return Err(ServiceError::validation("Quantity must be at least 1"));
    }
    Ok(())
}
