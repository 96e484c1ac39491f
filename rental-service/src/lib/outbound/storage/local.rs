use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use uuid::Uuid;

use crate::domain::rental::errors::RentalError;
use crate::domain::rental::models::PictureUpload;
use crate::domain::rental::ports::PictureStorage;

/// Stores pictures as files in a local directory served under a public URL.
pub struct LocalPictureStorage {
    directory: PathBuf,
    public_url: String,
}

impl LocalPictureStorage {
    /// # Arguments
    /// * `directory` - Target directory, created on first write if missing
    /// * `public_url` - URL prefix the directory is served under
    pub fn new(directory: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        let mut public_url = public_url.into();
        if !public_url.ends_with('/') {
            public_url.push('/');
        }

        Self {
            directory: directory.into(),
            public_url,
        }
    }
}

#[async_trait]
impl PictureStorage for LocalPictureStorage {
    async fn store(&self, picture: PictureUpload) -> Result<String, RentalError> {
        picture.validate()?;

        let file_name = format!(
            "{}{}",
            Uuid::new_v4(),
            picture.extension().unwrap_or_default()
        );

        fs::create_dir_all(&self.directory).await.map_err(|e| {
            tracing::error!(directory = %self.directory.display(), error = %e, "Failed to create upload directory");
            RentalError::Storage(e.to_string())
        })?;

        let path = self.directory.join(&file_name);
        fs::write(&path, &picture.bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write picture");
            RentalError::Storage(e.to_string())
        })?;

        tracing::info!(
            file_name = %file_name,
            size_bytes = picture.bytes.len(),
            "Picture stored"
        );

        Ok(format!("{}{}", self.public_url, file_name))
    }

    async fn delete(&self, url: &str) -> Result<(), RentalError> {
        let file_name = url
            .strip_prefix(self.public_url.as_str())
            .filter(|name| {
                !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.')
            })
            .ok_or_else(|| RentalError::Storage(format!("Not a stored picture: {}", url)))?;

        let path = self.directory.join(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(file_name = %file_name, "Picture deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to delete picture");
                Err(RentalError::Storage(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rental::errors::PictureError;

    fn png(bytes: &[u8]) -> PictureUpload {
        PictureUpload {
            file_name: Some("living-room.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: bytes.to_vec(),
        }
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_url() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(
            directory.path().join("uploads"),
            "http://localhost:3001/uploads",
        );

        let url = storage.store(png(b"\x89PNG")).await.expect("Failed to store");

        let file_name = url
            .strip_prefix("http://localhost:3001/uploads/")
            .expect("Unexpected URL prefix");
        assert!(file_name.ends_with(".png"));

        let written = std::fs::read(directory.path().join("uploads").join(file_name)).unwrap();
        assert_eq!(written, b"\x89PNG");
    }

    #[tokio::test]
    async fn test_store_generates_unique_names() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        let first = storage.store(png(b"one")).await.unwrap();
        let second = storage.store(png(b"two")).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_store_rejects_non_image() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        let upload = PictureUpload {
            file_name: Some("script.sh".to_string()),
            content_type: Some("text/x-shellscript".to_string()),
            bytes: b"rm -rf /".to_vec(),
        };

        let result = storage.store(upload).await;
        assert!(matches!(
            result,
            Err(RentalError::InvalidPicture(PictureError::UnsupportedContentType(_)))
        ));
        assert_eq!(std::fs::read_dir(directory.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_delete_removes_stored_file() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        let url = storage.store(png(b"\x89PNG")).await.unwrap();
        assert_eq!(std::fs::read_dir(directory.path()).unwrap().count(), 1);

        storage.delete(&url).await.expect("Failed to delete");
        assert_eq!(std::fs::read_dir(directory.path()).unwrap().count(), 0);

        // Already gone
        assert!(storage.delete(&url).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_refuses_foreign_urls() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        for url in [
            "http://elsewhere.example/uploads/a.png",
            "http://localhost:3001/uploads/../secrets.toml",
            "http://localhost:3001/uploads/nested/a.png",
            "http://localhost:3001/uploads/",
        ] {
            assert!(
                matches!(storage.delete(url).await, Err(RentalError::Storage(_))),
                "{} was accepted",
                url
            );
        }
    }

    #[tokio::test]
    async fn test_store_drops_overlong_extension() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        let upload = PictureUpload {
            file_name: Some(format!("x.{}", "a".repeat(300))),
            content_type: Some("image/png".to_string()),
            bytes: b"\x89PNG".to_vec(),
        };

        let url = storage.store(upload).await.unwrap();
        assert!(url.len() <= 255);
    }

    #[tokio::test]
    async fn test_store_rejects_empty_file() {
        let directory = tempfile::tempdir().unwrap();
        let storage = LocalPictureStorage::new(directory.path(), "http://localhost:3001/uploads/");

        let result = storage.store(png(b"")).await;
        assert!(matches!(
            result,
            Err(RentalError::InvalidPicture(PictureError::Empty))
        ));
    }
}
