//! Profile Picture Use Case
//!
//! Validates an upload, stores it under a fresh key and points the account
//! at the new object. The previous object (if any) is removed afterwards on
//! a best-effort basis.

use std::sync::Arc;

use platform::object_store::StorageError;
use uuid::Uuid;

use crate::application::config::AccountConfig;
use crate::domain::repository::{AccountRepository, ObjectStorage};
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AccountError, AccountResult};

const MAX_EXTENSION_LENGTH: usize = 8;

pub struct UploadPictureInput {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: Option<String>,
}

pub struct UploadProfilePictureUseCase<R, S>
where
    R: AccountRepository,
    S: ObjectStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    config: Arc<AccountConfig>,
}

impl<R, S> UploadProfilePictureUseCase<R, S>
where
    R: AccountRepository,
    S: ObjectStorage,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>, config: Arc<AccountConfig>) -> Self {
        Self {
            repo,
            storage,
            config,
        }
    }

    /// Returns the public URL of the stored picture
    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: UploadPictureInput,
    ) -> AccountResult<String> {
        let picture = &self.config.picture;

        if !picture.is_allowed(&input.content_type) {
            return Err(AccountError::UnsupportedMediaType(input.content_type));
        }
        if input.bytes.len() > picture.max_bytes {
            return Err(AccountError::PayloadTooLarge {
                max_bytes: picture.max_bytes,
            });
        }

        let account = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::AccountNotFound)?;

        self.ensure_bucket(&picture.bucket).await?;

        let extension = file_extension(input.filename.as_deref(), &input.content_type);
        let key = format!(
            "{}/{}.{}",
            picture.key_prefix.trim_end_matches('/'),
            Uuid::new_v4(),
            extension
        );
        let size = input.bytes.len();

        self.storage
            .put_object(&picture.bucket, &key, input.bytes, &input.content_type)
            .await
            .map_err(AccountError::from_storage)?;

        tracing::info!(
            account_id = %account_id,
            bucket = %picture.bucket,
            key = %key,
            size,
            "Profile picture stored"
        );

        let stale_key = account
            .profile_picture_url
            .as_deref()
            .and_then(|url| self.storage.object_key(&picture.bucket, url));
        if let Some(stale_key) = stale_key {
            if let Err(e) = self.storage.remove_object(&picture.bucket, &stale_key).await {
                tracing::warn!(
                    account_id = %account_id,
                    key = %stale_key,
                    error = %e,
                    "Previous profile picture not removed"
                );
            }
        }

        let url = self.storage.object_url(&picture.bucket, &key);
        let persisted = match self.repo.set_profile_picture_url(account_id, &url).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AccountError::AccountNotFound),
            Err(e) => Err(e),
        };
        if let Err(e) = persisted {
            tracing::error!(
                account_id = %account_id,
                bucket = %picture.bucket,
                key = %key,
                error = %e,
                "Profile picture stored but account not updated; object orphaned"
            );
            return Err(e);
        }

        Ok(url)
    }

    async fn ensure_bucket(&self, bucket: &str) -> AccountResult<()> {
        if self
            .storage
            .bucket_exists(bucket)
            .await
            .map_err(AccountError::from_storage)?
        {
            return Ok(());
        }

        match self.storage.create_bucket(bucket).await {
            Ok(()) => Ok(()),
            Err(StorageError::BucketAlreadyExists(_)) => {
                tracing::debug!(bucket = %bucket, "Bucket created concurrently");
                Ok(())
            }
            Err(e) => Err(AccountError::from_storage(e)),
        }
    }
}

/// Extension from the filename when usable, otherwise from the content type
fn file_extension(filename: Option<&str>, content_type: &str) -> String {
    let from_name = filename
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LENGTH
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });

    from_name.unwrap_or_else(|| {
        match content_type.to_ascii_lowercase().as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            _ => "bin",
        }
        .to_string()
    })
}
