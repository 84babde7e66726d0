/// URL classification and provider-specific normalization
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::constants::YOUTUBE_EMBED_BASE;
use crate::memo_data::MemoType;

/// Substrings identifying each provider, checked in order (first match wins)
const PROVIDER_TABLE: &[(MemoType, &[&str])] = &[
    (MemoType::Twitter, &["twitter.com", "x.com"]),
    (MemoType::Instagram, &["instagram.com"]),
    (MemoType::Youtube, &["youtube.com", "youtu.be"]),
];

const TWITTER_IMAGE_HOST: &str = "pbs.twimg.com";

static X_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^((?:https?://)?(?:www\.|mobile\.)?)x\.com([/?#]|$)").expect("valid x.com pattern")
});

static IMAGE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.(jpg|jpeg|png|webp)(:[a-z]+)?$").expect("valid image suffix pattern")
});

static IMAGE_NAME_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([?&]name=)[A-Za-z0-9_]+").expect("valid name parameter pattern")
});

/// Determine the provider of a URL by substring containment.
///
/// Never fails: anything unrecognized is `Other`.
pub fn classify(url: &str) -> MemoType {
    PROVIDER_TABLE
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| url.contains(needle)))
        .map(|(memo_type, _)| *memo_type)
        .unwrap_or(MemoType::Other)
}

/// True iff `url` parses as an absolute URL. No network access.
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Canonicalize provider URL variants
///
/// - Twitter image CDN URLs are rewritten to request the original rendition
///   (`.jpg:small` → `.jpg:orig`, `name=small` → `name=orig`).
/// - An `x.com` host becomes `twitter.com`.
/// - Everything else is returned unchanged.
///
/// Applying it twice gives the same result as applying it once.
pub fn normalize_provider_url(url: &str) -> String {
    if url.contains(TWITTER_IMAGE_HOST) {
        return original_image_url(url);
    }

    X_HOST.replace(url, "${1}twitter.com${2}").into_owned()
}

/// Rewrite a Twitter image CDN URL to its original, unscaled rendition
pub fn original_image_url(url: &str) -> String {
    if !url.contains(TWITTER_IMAGE_HOST) {
        return url.to_string();
    }

    let rewritten = IMAGE_SUFFIX.replace(url, ".${1}:orig");
    IMAGE_NAME_PARAM.replace_all(&rewritten, "${1}orig").into_owned()
}

/// Hostname for display, with a leading `www.` removed
///
/// Malformed input is returned as-is.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_string()))
        .map(|host| match host.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => host,
        })
        .unwrap_or_else(|| url.to_string())
}

/// Convert a YouTube watch URL into its embeddable player URL
///
/// Algorithm:
/// 1. Parse the URL; on failure return it unchanged
/// 2. `youtu.be/<id>` → id from the path
/// 3. `youtube.com/watch?v=<id>` → id from the `v` parameter
/// 4. `youtube.com/shorts/<id>` → id from the path
/// 5. No id found → return the input unchanged
pub fn embed_url_for(url: &str) -> String {
    youtube_video_id(url)
        .map(|id| format!("{}{}", YOUTUBE_EMBED_BASE, id))
        .unwrap_or_else(|| url.to_string())
}

fn youtube_video_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    let id = if host == "youtu.be" || host.ends_with(".youtu.be") {
        parsed.path_segments()?.next().map(|s| s.to_string())
    } else if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .or_else(|| {
                let mut segments = parsed.path_segments()?;
                match segments.next() {
                    Some("shorts") => segments.next().map(|s| s.to_string()),
                    _ => None,
                }
            })
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Extract the status id from a tweet URL
///
/// Takes the segment after `status`, falling back to the last path segment.
/// Query strings and fragments are ignored.
pub fn tweet_id(url: &str) -> String {
    let normalized = normalize_provider_url(url);

    let path = match Url::parse(&normalized) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => normalized
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    segments
        .iter()
        .position(|segment| *segment == "status")
        .and_then(|index| segments.get(index + 1))
        .or_else(|| segments.last())
        .map(|segment| segment.to_string())
        .unwrap_or_default()
}
