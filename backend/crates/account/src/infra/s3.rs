//! S3 Object Storage Adapter

use platform::object_store::{S3Client, StorageError};

use crate::domain::repository::ObjectStorage;

/// `ObjectStorage` over the platform S3 client
#[derive(Clone)]
pub struct S3ObjectStorage {
    client: S3Client,
}

impl S3ObjectStorage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

impl ObjectStorage for S3ObjectStorage {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StorageError> {
        self.client.bucket_exists(bucket).await
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.client.create_bucket(bucket).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client.put_object(bucket, key, body, content_type).await
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), StorageError> {
        self.client.remove_object(bucket, key).await
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        self.client.object_url(bucket, key)
    }

    fn object_key(&self, bucket: &str, url: &str) -> Option<String> {
        self.client.object_key(bucket, url)
    }
}
