//! Product image download.
//!
//! Each request writes to its own uniquely named file under the configured
//! image directory, so concurrent scrapes never race on a shared path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use url::Url;
use uuid::Uuid;

use crate::error::{AppError, Result};

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build HTTP client")
});

/// Derive the local file extension from the image URL's path. Only the
/// formats the service expects are kept; anything else falls back to .jpg.
fn local_extension(image_url: &str) -> &'static str {
    let path = match Url::parse(image_url) {
        Ok(url) => url.path().to_string(),
        Err(_) => return ".jpg",
    };

    match path.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" => ".jpg",
        Some(ext) if ext == "jpeg" => ".jpeg",
        Some(ext) if ext == "png" => ".png",
        _ => ".jpg",
    }
}

/// Fetch the image with a single GET and write the full body to a fresh
/// per-request file. No retries; any failure aborts the request.
pub async fn download_image(image_url: &str, image_dir: &Path) -> Result<PathBuf> {
    let filename = image_dir.join(format!("image-{}{}", Uuid::new_v4(), local_extension(image_url)));

    let bytes = CLIENT.get(image_url).send().await?.bytes().await?;
    tokio::fs::write(&filename, &bytes)
        .await
        .map_err(|e| AppError::ImageFetch(format!("Cannot write {}: {}", filename.display(), e)))?;

    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::local_extension;

    #[test]
    fn known_extensions_are_kept() {
        assert_eq!(local_extension("https://img.example.com/a/photo.png"), ".png");
        assert_eq!(local_extension("https://img.example.com/a/photo.jpeg"), ".jpeg");
        assert_eq!(local_extension("https://img.example.com/a/photo.jpg"), ".jpg");
    }

    #[test]
    fn unknown_extensions_fall_back_to_jpg() {
        assert_eq!(local_extension("https://img.example.com/a/photo.webp"), ".jpg");
        assert_eq!(local_extension("https://img.example.com/a/photo"), ".jpg");
    }

    #[test]
    fn extension_check_ignores_case_and_query() {
        assert_eq!(local_extension("https://img.example.com/a/PHOTO.PNG"), ".png");
        assert_eq!(local_extension("https://img.example.com/a/photo.png?w=800"), ".png");
    }

    #[test]
    fn unparseable_urls_fall_back_to_jpg() {
        assert_eq!(local_extension("not a url"), ".jpg");
    }
}
