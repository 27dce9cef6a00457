use super::ApiError;
use crate::entities::resources::Directory;

pub const MAX_PAGE_SIZE: u64 = 100;

pub fn validate_pagination(page: u64, page_size: u64) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::validation(format!(
            "Invalid page: {}. Page must be a positive integer",
            page
        )));
    }

    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "Invalid page size: {}. Page size must be between 1 and {}",
            page_size, MAX_PAGE_SIZE
        )));
    }

    Ok(())
}

/// Maps the user status filter onto the `is_active` column; "all" means
/// no filter.
pub fn parse_status_filter(status: &str) -> Result<Option<bool>, ApiError> {
    match status {
        "all" => Ok(None),
        "active" => Ok(Some(true)),
        "inactive" => Ok(Some(false)),
        other => Err(ApiError::validation(format!(
            "Invalid status: {}. Status must be one of all, active, inactive",
            other
        ))),
    }
}

pub fn parse_directory(value: &str) -> Result<Directory, ApiError> {
    match value {
        "root" => Ok(Directory::Root),
        "upload" => Ok(Directory::Upload),
        _ => Err(ApiError::validation("Invalid directory")),
    }
}

/// Like [`parse_directory`] but accepts "all" as "no filter".
pub fn parse_directory_filter(value: &str) -> Result<Option<Directory>, ApiError> {
    if value == "all" {
        return Ok(None);
    }

    parse_directory(value).map(Some)
}

/// Slugs are non-empty lowercase ASCII letters, digits, and hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Shallow email shape check: one `@`, non-empty local part, and a domain
/// with an interior dot.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
