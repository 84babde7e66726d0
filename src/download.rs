/// Media download stub
///
/// No media is fetched. A placeholder image URL is fabricated so the saved
/// images view has something to show.
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

use crate::constants::PLACEHOLDER_IMAGE_HOST;
use crate::memo_data::{MemoItem, MemoType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("No downloadable content available.")]
    Unsupported,
}

/// Placeholder image URL for `memo`, stamped with `now`
pub fn placeholder_image_url(memo: &MemoItem, now: DateTime<Utc>) -> Result<String, DownloadError> {
    let (size, label) = match memo.memo_type {
        MemoType::Twitter => ("800x600", "Twitter"),
        MemoType::Instagram => ("800x800", "Instagram"),
        MemoType::Youtube | MemoType::Other => return Err(DownloadError::Unsupported),
    };

    Ok(format!(
        "{}/{}?text={}+Image+{}",
        PLACEHOLDER_IMAGE_HOST,
        size,
        label,
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_placeholder_for_twitter_and_instagram() {
        let now = Utc.with_ymd_and_hms(2024, 10, 28, 10, 30, 0).unwrap();
        let tweet = MemoItem::new("https://x.com/a/status/1".to_string(), None);
        let post = MemoItem::new("https://www.instagram.com/p/b/".to_string(), None);

        assert_eq!(
            placeholder_image_url(&tweet, now),
            Ok("https://via.placeholder.com/800x600?text=Twitter+Image+2024-10-28T10:30:00.000Z".to_string())
        );
        assert_eq!(
            placeholder_image_url(&post, now),
            Ok("https://via.placeholder.com/800x800?text=Instagram+Image+2024-10-28T10:30:00.000Z".to_string())
        );
    }

    #[test]
    fn test_other_types_unsupported() {
        let video = MemoItem::new("https://youtu.be/abc".to_string(), None);
        let page = MemoItem::new("https://example.com".to_string(), None);

        assert_eq!(placeholder_image_url(&video, Utc::now()), Err(DownloadError::Unsupported));
        assert_eq!(placeholder_image_url(&page, Utc::now()), Err(DownloadError::Unsupported));
    }
}
