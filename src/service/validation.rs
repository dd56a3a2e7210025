//! Field-level request validation. Payload types implement `Validate`; the
//! `ValidJson` extractor runs it before a handler sees the payload.

use crate::error::AppError;
use crate::models::Patch;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|_| unreachable!()));

pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Length in characters, inclusive bounds.
pub fn length(col: &str, value: &str, min: usize, max: usize) -> Result<(), AppError> {
    let n = value.chars().count();
    if n < min {
        return Err(AppError::Validation(format!(
            "{} must be at least {} characters",
            col, min
        )));
    }
    if n > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, max
        )));
    }
    Ok(())
}

pub fn max_length(col: &str, value: Option<&str>, max: usize) -> Result<(), AppError> {
    match value {
        Some(v) => length(col, v, 0, max),
        None => Ok(()),
    }
}

pub fn range<T: PartialOrd + Display>(col: &str, value: T, min: T, max: T) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::Validation(format!("{} must be at least {}", col, min)));
    }
    if value > max {
        return Err(AppError::Validation(format!("{} must be at most {}", col, max)));
    }
    Ok(())
}

pub fn pattern(col: &str, value: &str, re: &Regex) -> Result<(), AppError> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{} does not match required pattern", col)))
    }
}

pub fn email(col: &str, value: Option<&str>) -> Result<(), AppError> {
    match value {
        Some(v) if !EMAIL.is_match(v) => Err(AppError::Validation(format!("{} must be a valid email", col))),
        _ => Ok(()),
    }
}

/// Explicit null on a column that cannot be null.
pub fn not_null<T>(col: &str, value: &Patch<T>) -> Result<(), AppError> {
    if value.is_null() {
        return Err(AppError::Validation(format!("{} cannot be null", col)));
    }
    Ok(())
}
