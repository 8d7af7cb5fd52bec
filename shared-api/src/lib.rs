use async_trait::async_trait;
use clap::builder::NonEmptyStringValueParser;
use rekognition_contracts::AwsConfig;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod service;
pub mod utils;

pub use service::FaceComparisonService;

/// Minimum similarity (percent) the remote API requires before it reports a face pair as a match
pub const SIMILARITY_THRESHOLD: f32 = 80.0;

/// FaceComparer trait
/// Compares the faces found in two stored images, the images are fetched by the remote side
#[async_trait]
pub trait FaceComparer: Send + Sync {
    async fn compare(&self, request: &FaceComparisonRequest)
        -> anyhow::Result<FaceComparisonOutcome>;
}

/// ObjectFetcher trait
/// Reads the raw content of a stored object
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    async fn fetch(&self, location: &ObjectLocation) -> anyhow::Result<Vec<u8>>;
}

/// Errors surfaced by the face comparison service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unable to load the SDK configuration: {0:#}")]
    Configuration(#[source] anyhow::Error),

    #[error("face comparison failed: {0:#}")]
    Comparison(#[source] anyhow::Error),
}

/// A stored object addressed by bucket and key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        ObjectLocation {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl Display for ObjectLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// One comparison of a source image against a target image, both living in the same bucket
#[derive(Debug, Clone, PartialEq)]
pub struct FaceComparisonRequest {
    pub source: ObjectLocation,
    pub target: ObjectLocation,
    pub similarity_threshold: f32,
}

impl FaceComparisonRequest {
    pub fn new(bucket: &str, source_key: &str, target_key: &str) -> Self {
        FaceComparisonRequest {
            source: ObjectLocation::new(bucket, source_key),
            target: ObjectLocation::new(bucket, target_key),
            similarity_threshold: SIMILARITY_THRESHOLD,
        }
    }
}

/// A face in the target image that passed the similarity threshold
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceMatch {
    pub similarity: Option<f32>,

    /// How sure the remote side is that the box holds a face
    pub confidence: Option<f32>,
}

/// FaceComparisonOutcome struct to hold the response of the remote comparison
#[derive(Debug, Clone, Default)]
pub struct FaceComparisonOutcome {
    /// The faces in the target image that matched the source face
    pub matches: Vec<FaceMatch>,

    /// The number of faces in the target image that did not match
    pub unmatched_faces: usize,
}

impl FaceComparisonOutcome {
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn best_similarity(&self) -> Option<f32> {
        self.matches
            .iter()
            .filter_map(|m| m.similarity)
            .reduce(f32::max)
    }
}

impl Display for FaceComparisonOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Matched: {}, Unmatched: {}",
            self.matches.len(),
            self.unmatched_faces
        )?;
        if let Some(similarity) = self.best_similarity() {
            write!(f, ", best similarity: {:.1}", similarity)?;
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser, Clone)]
#[clap(
    name = "face-compare",
    version,
    about = "Compare the faces of two images stored in the S3 bucket named by $S3_BUCKET"
)]
pub struct Configuration {
    /// Object key of the source image
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub source_image: String,

    /// Object key of the target image
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    pub target_image: String,

    #[clap(flatten)]
    pub aws: AwsConfig,
}
