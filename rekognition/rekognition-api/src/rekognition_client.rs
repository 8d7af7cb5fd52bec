use anyhow::anyhow;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_rekognition::{
    config::Region,
    error::DisplayErrorContext,
    operation::compare_faces::CompareFacesOutput,
    types::{Image, S3Object},
    Client,
};
use shared_api::{
    FaceComparer, FaceComparisonOutcome, FaceComparisonRequest, FaceMatch, ObjectLocation,
};
use tracing::debug;

/// Rekognition client supports handling communication with the Rekognition CompareFaces API.
pub struct RekognitionClient {
    client: Client,
}

impl RekognitionClient {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        RekognitionClient {
            client: Client::new(sdk_config),
        }
    }

    pub fn region(&self) -> Option<&Region> {
        self.client.config().region()
    }
}

#[async_trait]
impl FaceComparer for RekognitionClient {
    async fn compare(
        &self,
        request: &FaceComparisonRequest,
    ) -> anyhow::Result<FaceComparisonOutcome> {
        debug!(
            "sending CompareFaces, source: {}, target: {}",
            request.source, request.target
        );

        let output = self
            .client
            .compare_faces()
            .source_image(s3_image(&request.source))
            .target_image(s3_image(&request.target))
            .similarity_threshold(request.similarity_threshold)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(e)))?;

        Ok(outcome_from_output(&output))
    }
}

/// Reference a stored image, the service reads it from the bucket itself
fn s3_image(location: &ObjectLocation) -> Image {
    Image::builder()
        .s3_object(
            S3Object::builder()
                .bucket(&location.bucket)
                .name(&location.key)
                .build(),
        )
        .build()
}

fn outcome_from_output(output: &CompareFacesOutput) -> FaceComparisonOutcome {
    let matches = output
        .face_matches()
        .iter()
        .map(|m| FaceMatch {
            similarity: m.similarity(),
            confidence: m.face().and_then(|face| face.confidence()),
        })
        .collect();

    FaceComparisonOutcome {
        matches,
        unmatched_faces: output.unmatched_faces().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_rekognition::types::{CompareFacesMatch, ComparedFace};

    #[test]
    fn test_s3_image_references_bucket_and_key() {
        let image = s3_image(&ObjectLocation::new("faces", "test/source.jpg"));
        let s3_object = image.s3_object().unwrap();
        assert_eq!(s3_object.bucket(), Some("faces"));
        assert_eq!(s3_object.name(), Some("test/source.jpg"));
        assert!(image.bytes().is_none());
    }

    #[test]
    fn test_outcome_with_one_match() {
        let output = CompareFacesOutput::builder()
            .face_matches(
                CompareFacesMatch::builder()
                    .similarity(90.0)
                    .face(ComparedFace::builder().confidence(99.5).build())
                    .build(),
            )
            .build();

        let outcome = outcome_from_output(&output);
        assert!(outcome.is_match());
        assert_eq!(
            outcome.matches,
            vec![FaceMatch {
                similarity: Some(90.0),
                confidence: Some(99.5),
            }]
        );
        assert_eq!(outcome.unmatched_faces, 0);
    }

    #[test]
    fn test_outcome_with_only_unmatched_faces() {
        let output = CompareFacesOutput::builder()
            .unmatched_faces(ComparedFace::builder().confidence(98.0).build())
            .unmatched_faces(ComparedFace::builder().confidence(97.0).build())
            .build();

        let outcome = outcome_from_output(&output);
        assert!(!outcome.is_match());
        assert_eq!(outcome.unmatched_faces, 2);
    }

    #[test]
    fn test_outcome_from_empty_response() {
        let outcome = outcome_from_output(&CompareFacesOutput::builder().build());
        assert!(!outcome.is_match());
        assert_eq!(outcome.unmatched_faces, 0);
    }
}
