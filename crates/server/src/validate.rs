//! Input checks shared by all entity routers.
//!
//! These guard the data itself, not request syntax: malformed query strings
//! and JSON bodies are rejected by the axum extractors before a handler runs.

use chrono::NaiveDate;
use watchlog_core::error::ApiError;

/// Default page size when the caller does not pass `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Pagination contract: `offset >= 0`, `limit >= 1` when supplied.
pub fn check_page(offset: i64, limit: i64) -> Result<(), ApiError> {
    if offset < 0 {
        return Err(ApiError::Validation(format!(
            "offset must be >= 0, got {offset}"
        )));
    }
    if limit < 1 {
        return Err(ApiError::Validation(format!(
            "limit must be >= 1, got {limit}"
        )));
    }
    Ok(())
}

/// Dates travel as ISO-8601 `YYYY-MM-DD` strings and are stored verbatim.
pub fn check_date(field: &str, value: &str) -> Result<(), ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ApiError::Validation(format!("{field} is not a valid date ({value}): {e}")))?;
    Ok(())
}

pub fn check_opt_date(field: &str, value: Option<&str>) -> Result<(), ApiError> {
    match value {
        Some(v) => check_date(field, v),
        None => Ok(()),
    }
}

/// A resume point is a positive second count; absence means watched fully.
pub fn check_resume(resume: Option<i64>) -> Result<(), ApiError> {
    match resume {
        Some(r) if r < 1 => Err(ApiError::Validation(format!(
            "resume must be a positive number of seconds, got {r}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds() {
        assert!(check_page(0, 1).is_ok());
        assert!(check_page(10, 100).is_ok());
        assert!(check_page(-1, 100).is_err());
        assert!(check_page(0, 0).is_err());
    }

    #[test]
    fn date_format() {
        assert!(check_date("release_date", "2016-11-11").is_ok());
        assert!(check_date("release_date", "11/11/2016").is_err());
        assert!(check_date("release_date", "2016-13-40").is_err());
        assert!(check_opt_date("release_date", None).is_ok());
    }

    #[test]
    fn resume_must_be_positive_when_present() {
        assert!(check_resume(None).is_ok());
        assert!(check_resume(Some(1)).is_ok());
        assert!(check_resume(Some(4523)).is_ok());
        assert!(check_resume(Some(0)).is_err());
        assert!(check_resume(Some(-30)).is_err());
    }
}
