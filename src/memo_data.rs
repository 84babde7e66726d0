/// Data structures for saved links and folders
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::url_utils::classify;

/// Provider a memo's URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoType {
    Twitter,
    Instagram,
    Youtube,
    Other,
}

impl MemoType {
    pub const ALL: [MemoType; 4] = [
        MemoType::Twitter,
        MemoType::Instagram,
        MemoType::Youtube,
        MemoType::Other,
    ];

    /// Lowercase name, as stored
    pub fn as_str(self) -> &'static str {
        match self {
            MemoType::Twitter => "twitter",
            MemoType::Instagram => "instagram",
            MemoType::Youtube => "youtube",
            MemoType::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MemoType::Twitter => "Twitter",
            MemoType::Instagram => "Instagram",
            MemoType::Youtube => "YouTube",
            MemoType::Other => "Other",
        }
    }
}

impl fmt::Display for MemoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A saved link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoItem {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub memo_type: MemoType,
    pub folder_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl MemoItem {
    /// Create a memo for `url`; the type is classified here and never again.
    pub fn new(url: String, folder_id: Option<String>) -> MemoItem {
        MemoItem {
            id: Uuid::new_v4().to_string(),
            memo_type: classify(&url),
            url,
            folder_id,
            created_at: Utc::now(),
            title: None,
            image_url: None,
        }
    }
}

/// A user-defined group of memos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl FolderItem {
    pub fn new(name: String) -> FolderItem {
        FolderItem {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// Which folder the memo list is narrowed to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolderFilter {
    #[default]
    All,
    Uncategorized,
    Folder(String),
}

impl FolderFilter {
    pub fn matches(&self, memo: &MemoItem) -> bool {
        match self {
            FolderFilter::All => true,
            FolderFilter::Uncategorized => memo.folder_id.is_none(),
            FolderFilter::Folder(id) => memo.folder_id.as_deref() == Some(id.as_str()),
        }
    }

    /// The concrete folder id, if one is selected
    pub fn folder_id(&self) -> Option<&str> {
        match self {
            FolderFilter::Folder(id) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_creation_classifies_once() {
        let memo = MemoItem::new("https://x.com/rustlang/status/123".to_string(), None);

        assert_eq!(memo.memo_type, MemoType::Twitter);
        assert_eq!(memo.folder_id, None);
        assert_eq!(memo.title, None);
        assert_eq!(memo.image_url, None);
        assert!(!memo.id.is_empty());
    }

    #[test]
    fn test_memo_ids_are_unique() {
        let a = MemoItem::new("https://example.com".to_string(), None);
        let b = MemoItem::new("https://example.com".to_string(), None);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialized_field_names() {
        let memo = MemoItem::new(
            "https://youtu.be/abc".to_string(),
            Some("f1".to_string()),
        );

        let value = serde_json::to_value(&memo).unwrap();

        assert_eq!(value["type"], "youtube");
        assert_eq!(value["folderId"], "f1");
        assert!(value["createdAt"].is_string());
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_deserialize_stored_record() {
        let json = r#"{
            "id": "m1",
            "url": "https://www.instagram.com/p/xyz/",
            "type": "instagram",
            "folderId": null,
            "createdAt": "2024-10-28T10:30:00.000Z"
        }"#;

        let memo: MemoItem = serde_json::from_str(json).unwrap();

        assert_eq!(memo.memo_type, MemoType::Instagram);
        assert_eq!(memo.folder_id, None);
        assert_eq!(memo.created_at.to_rfc3339(), "2024-10-28T10:30:00+00:00");
    }

    #[test]
    fn test_folder_filter_matches() {
        let mut memo = MemoItem::new("https://example.com".to_string(), None);

        assert!(FolderFilter::All.matches(&memo));
        assert!(FolderFilter::Uncategorized.matches(&memo));
        assert!(!FolderFilter::Folder("f1".to_string()).matches(&memo));

        memo.folder_id = Some("f1".to_string());

        assert!(!FolderFilter::Uncategorized.matches(&memo));
        assert!(FolderFilter::Folder("f1".to_string()).matches(&memo));
    }
}
