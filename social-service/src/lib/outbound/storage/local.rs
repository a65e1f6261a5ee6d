use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::models::PictureUpload;
use crate::domain::user::ports::PictureStorage;
use crate::user::errors::UserError;

/// Writes pictures to a directory on the local filesystem.
pub struct LocalPictureStorage {
    dir: PathBuf,
}

impl LocalPictureStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn generate_file_name(upload: &PictureUpload) -> String {
        let stem = Uuid::new_v4().simple().to_string();
        match upload.extension() {
            Some(extension) => format!("{}.{}", stem, extension),
            None => stem,
        }
    }
}

#[async_trait]
impl PictureStorage for LocalPictureStorage {
    async fn store(&self, upload: &PictureUpload) -> Result<String, UserError> {
        let file_name = Self::generate_file_name(upload);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;
        tokio::fs::write(self.dir.join(&file_name), &upload.bytes)
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))?;

        tracing::debug!(
            file_name = %file_name,
            size = upload.bytes.len(),
            "Picture written"
        );

        Ok(file_name)
    }

    async fn remove(&self, file_name: &str) -> Result<(), UserError> {
        tokio::fs::remove_file(self.dir.join(file_name))
            .await
            .map_err(|e| UserError::StorageError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_under_generated_name() {
        let dir = std::env::temp_dir().join(format!("social-pictures-{}", Uuid::new_v4()));
        let storage = LocalPictureStorage::new(dir.clone());

        let upload = PictureUpload {
            original_name: Some("../../etc/passwd.png".to_string()),
            bytes: b"png-bytes".to_vec(),
        };

        let first = storage.store(&upload).await.unwrap();
        let second = storage.store(&upload).await.unwrap();

        assert_ne!(first, second);
        assert!(first.ends_with(".png"));
        assert!(!first.contains('/'));
        assert_eq!(tokio::fs::read(dir.join(&first)).await.unwrap(), b"png-bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_without_extension() {
        let dir = std::env::temp_dir().join(format!("social-pictures-{}", Uuid::new_v4()));
        let storage = LocalPictureStorage::new(dir.clone());

        let upload = PictureUpload {
            original_name: None,
            bytes: vec![0u8; 4],
        };

        let name = storage.store(&upload).await.unwrap();
        assert_eq!(name.len(), 32);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_picture() {
        let dir = std::env::temp_dir().join(format!("social-pictures-{}", Uuid::new_v4()));
        let storage = LocalPictureStorage::new(dir.clone());

        let upload = PictureUpload {
            original_name: Some("me.png".to_string()),
            bytes: b"png-bytes".to_vec(),
        };
        let name = storage.store(&upload).await.unwrap();

        storage.remove(&name).await.unwrap();

        assert!(!dir.join(&name).exists());
        assert!(matches!(
            storage.remove(&name).await,
            Err(UserError::StorageError(_))
        ));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
