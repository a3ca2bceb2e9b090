//! Application constants

use std::time::Duration;

/// Timeout for downloading a source image before re-upload
pub const IMAGE_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for WordPress media uploads and post creation
pub const WORDPRESS_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Post status sent to WordPress when the caller doesn't pick one
pub const DEFAULT_POST_STATUS: &str = "publish";

/// Default page size for paginated list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for paginated list endpoints
pub const MAX_PAGE_SIZE: i64 = 100;
