use serde::{Deserialize, Serialize};

use crate::domain::{
    annotation::{AnnotationRecord, ImageMetadata},
    geometry::BoundingBox,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub converted_image: String,
    pub predictions: Vec<BoundingBox>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileRequest {
    #[serde(default)]
    pub predictions: Vec<BoundingBox>,
    #[serde(default)]
    pub annotations: Vec<AnnotationRecord>,
    #[serde(default)]
    pub metadata: Option<ImageMetadata>,
    /// Overrides the server-wide overlap threshold for this request.
    #[serde(default)]
    pub iou_threshold: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub filtered_predictions: Vec<BoundingBox>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}
