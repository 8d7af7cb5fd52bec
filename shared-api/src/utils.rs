use std::env;

use tracing::{debug, warn};

/// The environment variable naming the bucket that holds the images
pub const BUCKET_ENV: &str = "S3_BUCKET";

/// Read the bucket name from the given environment variable.
/// An unset or non unicode variable resolves to an empty name, the remote side reports the failure.
pub fn bucket_from_env(var: &str) -> String {
    match env::var(var) {
        Ok(bucket) if !bucket.is_empty() => {
            debug!("using bucket {} from ${}", bucket, var);
            bucket
        }
        Ok(_) => {
            warn!("${} is empty, the comparison will most likely be rejected", var);
            String::new()
        }
        Err(e) => {
            warn!("${} is not usable: {}, the comparison will most likely be rejected", var, e);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_from_env_with_value() {
        env::set_var("UTILS_TEST_BUCKET_SET", "faces-bucket");
        assert_eq!(bucket_from_env("UTILS_TEST_BUCKET_SET"), "faces-bucket");
    }

    #[test]
    fn test_bucket_from_env_with_empty_value() {
        env::set_var("UTILS_TEST_BUCKET_EMPTY", "");
        assert_eq!(bucket_from_env("UTILS_TEST_BUCKET_EMPTY"), "");
    }

    #[test]
    fn test_bucket_from_env_when_unset() {
        env::remove_var("UTILS_TEST_BUCKET_UNSET");
        assert_eq!(bucket_from_env("UTILS_TEST_BUCKET_UNSET"), "");
    }
}
