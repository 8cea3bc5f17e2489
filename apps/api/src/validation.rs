//! Request field checks shared by every service.
//!
//! All failures are `AppError::InvalidInput` and happen before any provider
//! call or store write.

use crate::errors::AppError;

/// Upper bound of the mood and energy scales (inclusive).
pub const SCALE_MAX: i64 = 10;

/// Checks a 0–10 mood/energy rating and narrows it for storage.
pub fn validate_scale(field: &str, value: i64) -> Result<u8, AppError> {
    if !(0..=SCALE_MAX).contains(&value) {
        return Err(AppError::InvalidInput(format!(
            "{field} must be between 0 and {SCALE_MAX}, got {value}"
        )));
    }
    Ok(value as u8)
}

/// User ids become part of colon-delimited store keys, so they may not be
/// blank or contain `:`.
pub fn validate_user_id(user_id: &str) -> Result<&str, AppError> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::InvalidInput("userId cannot be empty".to_string()));
    }
    if user_id.contains(':') {
        return Err(AppError::InvalidInput(
            "userId cannot contain ':'".to_string(),
        ));
    }
    Ok(user_id)
}

pub fn require_non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

pub fn validate_available_hours(hours: f64) -> Result<f64, AppError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "availableHours must be greater than 0, got {hours}"
        )));
    }
    Ok(hours)
}

pub fn validate_completed_tasks(count: i64) -> Result<u32, AppError> {
    u32::try_from(count).map_err(|_| {
        AppError::InvalidInput(format!(
            "completedTasks must be a non-negative integer, got {count}"
        ))
    })
}
