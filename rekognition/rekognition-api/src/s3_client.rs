use anyhow::{anyhow, Context};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::{config::Region, error::DisplayErrorContext, Client};
use shared_api::{ObjectFetcher, ObjectLocation};
use tracing::debug;

/// S3 client to read stored images directly.
/// The face comparison does not go through it, Rekognition reads the bucket on its own.
pub struct S3StorageClient {
    client: Client,
}

impl S3StorageClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        S3StorageClient {
            client: Client::new(sdk_config),
        }
    }

    pub fn region(&self) -> Option<&Region> {
        self.client.config().region()
    }
}

#[async_trait]
impl ObjectFetcher for S3StorageClient {
    async fn fetch(&self, location: &ObjectLocation) -> anyhow::Result<Vec<u8>> {
        debug!("fetching object: {}", location);

        let output = self
            .client
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(e)))
            .with_context(|| format!("failed to get object {}", location))?;

        let bytes = output
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read the body of {}", location))?
            .into_bytes();

        debug!("fetched {} bytes from {}", bytes.len(), location);
        Ok(bytes.to_vec())
    }
}
