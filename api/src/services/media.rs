//! Image re-hosting: download a source image and upload it to WordPress
//!
//! Every failure here is soft. A missing image degrades the post, it never
//! fails the publish.

use chrono::Utc;

use super::wordpress::{UploadedImage, WordPressClient};
use crate::domain::settings::WordPressCredentials;

fn get_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/avif" => "avif",
        "image/svg+xml" => "svg",
        _ => "jpg",
    }
}

/// Extensions WordPress accepts for image uploads by default
const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "avif", "svg"];

fn has_image_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty() && IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known))
        }
        None => false,
    }
}

/// Pick the filename WordPress will store the image under.
///
/// Uses the last URL path segment when it ends in an image extension,
/// otherwise synthesizes `image-<millis>.<ext>` from the content type.
pub fn derive_filename(image_url: &str, content_type: &str, now_millis: i64) -> String {
    let from_path = url::Url::parse(image_url).ok().and_then(|url| {
        url.path_segments()?
            .next_back()
            .filter(|name| has_image_extension(name))
            .map(str::to_owned)
    });

    from_path.unwrap_or_else(|| format!("image-{}.{}", now_millis, get_extension(content_type)))
}

/// Re-host one image. Returns `None` on any failure.
pub async fn upload_image(
    wordpress: &WordPressClient,
    site: &WordPressCredentials,
    image_url: &str,
) -> Option<UploadedImage> {
    let image = match wordpress.download_image(image_url).await {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(image_url, error = %e, "Failed to download image, skipping");
            return None;
        }
    };

    let filename = derive_filename(image_url, &image.content_type, Utc::now().timestamp_millis());

    match wordpress.upload_media(site, image, &filename).await {
        Ok(uploaded) => {
            tracing::info!(image_url, media_id = uploaded.media_id, "Uploaded image to WordPress");
            Some(uploaded)
        }
        Err(e) => {
            tracing::warn!(image_url, %filename, error = %e, "Failed to upload image, skipping");
            None
        }
    }
}

/// Re-host images one at a time, keeping the successes in input order
pub async fn upload_images(
    wordpress: &WordPressClient,
    site: &WordPressCredentials,
    image_urls: &[String],
) -> Vec<UploadedImage> {
    let mut uploaded = Vec::with_capacity(image_urls.len());

    for image_url in image_urls {
        if let Some(image) = upload_image(wordpress, site, image_url).await {
            uploaded.push(image);
        }
    }

    if uploaded.len() < image_urls.len() {
        tracing::warn!(
            requested = image_urls.len(),
            uploaded = uploaded.len(),
            "Some images could not be uploaded"
        );
    }

    uploaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_filename_from_url_path() {
        assert_eq!(
            derive_filename("https://pbs.twimg.com/media/abc.jpg?name=large", "image/jpeg", 1),
            "abc.jpg"
        );
    }

    #[test]
    fn test_filename_synthesized_without_extension() {
        assert_eq!(
            derive_filename("https://pbs.twimg.com/media/abc?format=png", "image/png", 1700000000000),
            "image-1700000000000.png"
        );
        assert_eq!(
            derive_filename("https://example.com/", "application/octet-stream", 5),
            "image-5.jpg"
        );
        assert_eq!(derive_filename("not a url", "image/gif", 5), "image-5.gif");
        assert_eq!(derive_filename("https://example.com/.hidden", "image/webp", 5), "image-5.webp");
    }

    #[test]
    fn test_filename_synthesized_for_non_image_extension() {
        assert_eq!(
            derive_filename("https://cdn.example/render.php?id=3", "image/png", 5),
            "image-5.png"
        );
        assert_eq!(
            derive_filename("https://pbs.twimg.com/media/abc.jpg:large", "image/jpeg", 5),
            "image-5.jpg"
        );
        assert_eq!(derive_filename("https://cdn.example/v1.2", "image/webp", 5), "image-5.webp");
    }

    #[test]
    fn test_filename_extension_match_ignores_case() {
        assert_eq!(derive_filename("https://cdn.example/Photo.JPEG", "image/jpeg", 5), "Photo.JPEG");
    }

    #[tokio::test]
    async fn test_upload_images_skips_failures_and_keeps_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/src/one.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(b"one".to_vec()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/src/two.png"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/src/three.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(b"three".to_vec()),
            )
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/media"))
            .and(body_string_contains("one.png"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1, "source_url": "https://wp/one.png"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/media"))
            .and(body_string_contains("three.png"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3, "link": "https://wp/three"
            })))
            .mount(&server)
            .await;

        let site = WordPressCredentials {
            url: server.uri(),
            username: "u".into(),
            password: "p".into(),
        };
        let urls = ["one", "two", "three"].map(|n| format!("{}/src/{}.png", server.uri(), n));

        let uploaded = upload_images(&WordPressClient::new(), &site, &urls).await;

        assert_eq!(
            uploaded,
            vec![
                UploadedImage { media_id: 1, url: "https://wp/one.png".into() },
                UploadedImage { media_id: 3, url: "https://wp/three".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_upload_rejected_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/src/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"a".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/wp-json/wp/v2/media"))
            .respond_with(ResponseTemplate::new(413))
            .mount(&server)
            .await;

        let site = WordPressCredentials {
            url: server.uri(),
            username: "u".into(),
            password: "p".into(),
        };
        let result = upload_image(&WordPressClient::new(), &site, &format!("{}/src/a.jpg", server.uri())).await;

        assert!(result.is_none());
    }
}
