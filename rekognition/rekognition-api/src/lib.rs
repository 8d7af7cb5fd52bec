mod rekognition_client;
mod s3_client;
pub mod sdk_config;

use aws_config::SdkConfig;
use rekognition_contracts::AwsConfig;
use shared_api::{FaceComparisonService, ServiceError};
use tracing::debug;

pub use rekognition_client::RekognitionClient;
pub use s3_client::S3StorageClient;

pub type RekognitionService = FaceComparisonService<RekognitionClient, S3StorageClient>;

/// Resolve the AWS configuration and build the service on top of it
pub async fn connect(config: &AwsConfig) -> Result<RekognitionService, ServiceError> {
    let sdk_config = sdk_config::resolve_sdk_config(config)
        .await
        .map_err(ServiceError::Configuration)?;
    debug!("AWS configuration resolved, region: {:?}", sdk_config.region());
    Ok(from_sdk_config(&sdk_config))
}

/// Build both clients from an already resolved configuration
pub fn from_sdk_config(sdk_config: &SdkConfig) -> RekognitionService {
    FaceComparisonService::new(
        RekognitionClient::new(sdk_config),
        S3StorageClient::new(sdk_config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::{BehaviorVersion, Region};
    use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};

    #[tokio::test]
    async fn test_from_sdk_config_builds_both_clients() {
        let sdk_config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .credentials_provider(SharedCredentialsProvider::new(Credentials::new(
                "AKIDEXAMPLE",
                "secret",
                None,
                None,
                "test",
            )))
            .build();

        let service = from_sdk_config(&sdk_config);
        let expected = Some(Region::new("ap-northeast-1"));
        assert_eq!(service.comparer().region().cloned(), expected);
        assert_eq!(service.storage().region().cloned(), expected);
    }
}
