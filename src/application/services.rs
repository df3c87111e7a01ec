use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::{
    application::{
        dto::{AnalyzeResponse, ReconcileRequest},
        ports::{DetectorPort, ImageNormalizerPort, UploadedImage},
    },
    domain::{
        annotation::AnnotationRescaler,
        errors::{DomainError, DomainResult},
        geometry::BoundingBox,
        model::ModelId,
        overlap::suppress_overlapping,
    },
};

/// Screening use cases: detection on an uploaded X-ray ("adm") and
/// reconciliation of detections against reference annotations ("ddm").
#[derive(Clone)]
pub struct ScreeningService {
    normalizer: Arc<dyn ImageNormalizerPort>,
    detector: Arc<dyn DetectorPort>,
    rescaler: AnnotationRescaler,
    overlap_threshold: f64,
}

impl ScreeningService {
    pub fn new(
        normalizer: Arc<dyn ImageNormalizerPort>,
        detector: Arc<dyn DetectorPort>,
        rescaler: AnnotationRescaler,
        overlap_threshold: f64,
    ) -> Self {
        Self {
            normalizer,
            detector,
            rescaler,
            overlap_threshold,
        }
    }

    pub fn model(&self) -> &ModelId {
        self.detector.model()
    }

    /// Normalizes the upload and runs the detector on it.
    /// Either the full report is produced or an error; never a partial result.
    pub async fn analyze(&self, upload: UploadedImage) -> DomainResult<AnalyzeResponse> {
        if upload.bytes.is_empty() {
            return Err(DomainError::MissingInput("image file required".into()));
        }

        let started = Instant::now();
        let file_name = upload.file_name.clone();
        let normalized = self.normalizer.normalize(upload).await?;
        let predictions = self.detector.detect(normalized.image).await?;

        info!(
            file = %file_name,
            predictions = predictions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalyzeResponse {
            converted_image: normalized.data_url,
            predictions,
        })
    }

    /// Removes predictions that overlap any rescaled reference annotation.
    pub fn reconcile(&self, request: ReconcileRequest) -> DomainResult<Vec<BoundingBox>> {
        if request.predictions.is_empty() {
            return Ok(Vec::new());
        }

        let threshold = request.iou_threshold.unwrap_or(self.overlap_threshold);
        if request.metadata.is_none() && !request.annotations.is_empty() {
            debug!("reconcile request without metadata; assuming unit image dimensions");
        }
        let references = self.rescaler.rescale(request.metadata, &request.annotations)?;
        let kept = suppress_overlapping(&request.predictions, &references, threshold);

        info!(
            predictions = request.predictions.len(),
            references = references.len(),
            kept = kept.len(),
            threshold,
            "reconciliation complete"
        );
        Ok(kept)
    }
}
