/// Fixed configuration values

/// localStorage key holding the serialized memo collection
pub const MEMOS_KEY: &str = "memos";

/// localStorage key holding the serialized folder collection
pub const FOLDERS_KEY: &str = "folders";

pub const TWITTER_WIDGETS_URL: &str = "https://platform.twitter.com/widgets.js";
pub const INSTAGRAM_EMBED_URL: &str = "https://www.instagram.com/embed.js";

/// Prefix of an embeddable YouTube player URL; the video id is appended.
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// How long a card shows its loading placeholder after mount, in milliseconds.
pub const EMBED_GRACE_MS: u32 = 2000;

/// Host used by the download stub to fabricate image URLs.
pub const PLACEHOLDER_IMAGE_HOST: &str = "https://via.placeholder.com";

/// Version of the Instagram blockquote markup understood by embed.js
pub const INSTAGRAM_EMBED_VERSION: &str = "14";
