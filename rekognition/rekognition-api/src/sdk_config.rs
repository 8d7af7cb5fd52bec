use anyhow::{anyhow, bail, Context};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use rekognition_contracts::AwsConfig;
use tracing::debug;

/// Load the configuration from the default provider chain, apply the overrides and verify it is usable
pub async fn resolve_sdk_config(config: &AwsConfig) -> anyhow::Result<SdkConfig> {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(ref region) = config.aws_region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(ref profile) = config.aws_profile {
        loader = loader.profile_name(profile);
    }
    if let Some(ref endpoint_url) = config.aws_endpoint_url {
        debug!("using custom endpoint: {}", endpoint_url);
        loader = loader.endpoint_url(endpoint_url);
    }

    let sdk_config = loader.load().await;
    verify_sdk_config(&sdk_config).await?;
    Ok(sdk_config)
}

/// The SDK resolves credentials lazily on the first request, force it here so a broken setup fails on startup
pub async fn verify_sdk_config(sdk_config: &SdkConfig) -> anyhow::Result<()> {
    if sdk_config.region().is_none() {
        bail!("no AWS region found, set AWS_REGION or pass --aws-region");
    }

    let provider = sdk_config
        .credentials_provider()
        .ok_or_else(|| anyhow!("no AWS credentials provider configured"))?;
    let credentials = provider
        .provide_credentials()
        .await
        .context("no AWS credentials could be resolved")?;

    debug!(
        "credentials resolved, access key id: {}...",
        credentials.access_key_id().chars().take(4).collect::<String>()
    );
    Ok(())
}
