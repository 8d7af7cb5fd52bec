use tracing::{debug, error, info};

use crate::utils::{self, BUCKET_ENV};
use crate::{FaceComparer, FaceComparisonRequest, ObjectFetcher, ServiceError};

/// FaceComparisonService wraps the remote comparison client and the storage client.
/// The storage client is not used by the comparison itself, the remote side reads the images directly.
pub struct FaceComparisonService<C, S> {
    comparer: C,
    storage: S,
    bucket_env: String,
}

impl<C, S> FaceComparisonService<C, S>
where
    C: FaceComparer,
    S: ObjectFetcher,
{
    pub fn new(comparer: C, storage: S) -> Self {
        FaceComparisonService {
            comparer,
            storage,
            bucket_env: BUCKET_ENV.to_string(),
        }
    }

    /// Read the bucket name from another environment variable than `S3_BUCKET`
    pub fn with_bucket_env(mut self, var: impl Into<String>) -> Self {
        self.bucket_env = var.into();
        self
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Compare the faces of two images stored in the bucket, return true when at least one face matched.
    /// The bucket variable is read on every call, so a change after construction is picked up.
    pub async fn compare_faces(
        &self,
        source_key: &str,
        target_key: &str,
    ) -> Result<bool, ServiceError> {
        let bucket = utils::bucket_from_env(&self.bucket_env);
        let request = FaceComparisonRequest::new(&bucket, source_key, target_key);

        debug!(
            "comparing {} with {}, similarity threshold: {}",
            request.source, request.target, request.similarity_threshold
        );

        match self.comparer.compare(&request).await {
            Ok(outcome) => {
                info!(
                    source = %request.source,
                    target = %request.target,
                    "comparison finished: {}",
                    outcome
                );
                Ok(outcome.is_match())
            }
            Err(e) => {
                error!(
                    "failed to compare {} with {}: {:#}",
                    request.source, request.target, e
                );
                Err(ServiceError::Comparison(e))
            }
        }
    }
}
