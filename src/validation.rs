/// Input checks performed by the forms before calling the store
use thiserror::Error;

use crate::memo_data::FolderItem;
use crate::url_utils::is_valid_url;

/// Field-level validation failure; the message is shown next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL")]
    EmptyUrl,
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Please enter a folder name")]
    EmptyFolderName,
    #[error("A folder with this name already exists")]
    DuplicateFolderName,
}

/// Trim the entered URL, add `https://` when no http(s) scheme is present,
/// and check that the result parses.
pub fn prepare_memo_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let lower = trimmed.to_ascii_lowercase();
    let url = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    if is_valid_url(&url) {
        Ok(url)
    } else {
        Err(ValidationError::InvalidUrl)
    }
}

/// Trim a folder name and reject empty or case-insensitively duplicate names.
pub fn prepare_folder_name(input: &str, folders: &[FolderItem]) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyFolderName);
    }

    let lower = name.to_lowercase();
    if folders.iter().any(|folder| folder.name.to_lowercase() == lower) {
        return Err(ValidationError::DuplicateFolderName);
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_memo_url_adds_scheme() {
        assert_eq!(
            prepare_memo_url("  x.com/foo/status/123 "),
            Ok("https://x.com/foo/status/123".to_string())
        );
        assert_eq!(
            prepare_memo_url("HTTP://example.com"),
            Ok("HTTP://example.com".to_string())
        );
    }

    #[test]
    fn test_prepare_memo_url_errors() {
        assert_eq!(prepare_memo_url("   "), Err(ValidationError::EmptyUrl));
        assert_eq!(prepare_memo_url("not a url"), Err(ValidationError::InvalidUrl));
        assert_eq!(ValidationError::InvalidUrl.to_string(), "Please enter a valid URL");
    }

    #[test]
    fn test_prepare_folder_name() {
        let folders = vec![FolderItem::new("Work".to_string())];

        assert_eq!(prepare_folder_name(" Fun ", &folders), Ok("Fun".to_string()));
        assert_eq!(prepare_folder_name("", &folders), Err(ValidationError::EmptyFolderName));
        assert_eq!(
            prepare_folder_name("  wORK", &folders),
            Err(ValidationError::DuplicateFolderName)
        );
    }
}
