/// Optional overrides on top of the AWS SDK default provider chain.
/// Anything left unset is discovered the usual way (env, shared config files, instance metadata).
#[derive(Debug, clap::Parser, Clone, Default)]
pub struct AwsConfig {
    #[clap(long, env = "AWS_REGION", help = "AWS region hosting Rekognition and the bucket")]
    pub aws_region: Option<String>,

    #[clap(long, env = "AWS_PROFILE", help = "Named profile from the shared AWS config")]
    pub aws_profile: Option<String>,

    /// Custom endpoint, e.g. a LocalStack instance
    #[clap(long, env = "AWS_ENDPOINT_URL", help = "Override the AWS service endpoint")]
    pub aws_endpoint_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_overrides_are_optional() {
        assert!(AwsConfig::try_parse_from(["aws"]).is_ok());
    }

    #[test]
    fn test_overrides_from_flags() {
        let config = AwsConfig::try_parse_from([
            "aws",
            "--aws-region",
            "ap-northeast-1",
            "--aws-endpoint-url",
            "http://localhost:4566",
        ])
        .unwrap();
        assert_eq!(config.aws_region.as_deref(), Some("ap-northeast-1"));
        assert_eq!(
            config.aws_endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
    }
}
