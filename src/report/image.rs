//! Image selected for a report

use crate::error::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use std::path::Path;

/// A photo picked by the user, held in memory until uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl SelectedImage {
    /// Wrap in-memory image data; the mime type must be `image/*`
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            return Err(Error::UnsupportedFile(format!(
                "{file_name} is {mime_type}, expected an image"
            )));
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Read an image from disk, inferring its mime type from the extension
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::UnsupportedFile(path.display().to_string()))?;

        let mime_type = mime_guess::from_path(path)
            .iter()
            .find(|mime| mime.type_() == "image")
            .map(|mime| mime.essence_str().to_string())
            .ok_or_else(|| {
                Error::UnsupportedFile(format!("{file_name} is not a recognized image type"))
            })?;

        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, mime_type, bytes)
    }

    /// Original file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Mime type sent with the upload
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in whole kilobytes, rounded
    pub const fn size_kb(&self) -> usize {
        (self.bytes.len() + 512) / 1024
    }

    /// Local preview as a `data:` URL
    pub fn preview(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, BASE64.encode(&self.bytes))
    }

    /// `name (N KB)` line shown under the picker
    pub fn summary(&self) -> String {
        format!("{} ({} KB)", self.file_name, self.size_kb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_path_infers_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Photo.JPG");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0xFF, 0xD8, 0xFF])
            .unwrap();

        let image = SelectedImage::from_path(&path).await.unwrap();
        assert_eq!(image.file_name(), "Photo.JPG");
        assert_eq!(image.mime_type(), "image/jpeg");
        assert_eq!(image.bytes(), &[0xFF, 0xD8, 0xFF]);
    }

    #[tokio::test]
    async fn test_from_path_other_image_formats() {
        let dir = TempDir::new().unwrap();
        for (name, mime) in [
            ("leak.png", "image/png"),
            ("stairs.webp", "image/webp"),
            ("sign.gif", "image/gif"),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, [0u8; 4]).unwrap();

            let image = SelectedImage::from_path(&path).await.unwrap();
            assert_eq!(image.mime_type(), mime);
        }
    }

    #[tokio::test]
    async fn test_from_path_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.nope");
        std::fs::write(&path, [0u8; 4]).unwrap();

        let err = SelectedImage::from_path(&path).await.unwrap_err();
        assert!(err.to_string().contains("scan.nope is not a recognized image type"));
    }

    #[tokio::test]
    async fn test_from_path_rejects_non_images() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = SelectedImage::from_path(&path).await.unwrap_err();
        assert!(matches!(err, Error::UnsupportedFile(_)));
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = SelectedImage::from_path(&dir.path().join("gone.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_new_rejects_non_image_mime() {
        assert!(SelectedImage::new("a.pdf", "application/pdf", vec![]).is_err());
    }

    #[test]
    fn test_preview_and_summary() {
        let image = SelectedImage::new("chair.png", "image/png", vec![0u8; 2048]).unwrap();
        assert!(image.preview().starts_with("data:image/png;base64,AAAA"));
        assert_eq!(image.summary(), "chair.png (2 KB)");

        let tiny = SelectedImage::new("dot.png", "image/png", b"hi".to_vec()).unwrap();
        assert_eq!(tiny.preview(), "data:image/png;base64,aGk=");
        assert_eq!(tiny.size_kb(), 0);
    }
}
