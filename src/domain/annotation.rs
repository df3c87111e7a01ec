use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};
use super::geometry::BoundingBox;

/// Human-drawn box, expressed as fractions of the original image size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Dimensions of the image the annotations were drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub original_width: f64,
    pub original_height: f64,
}

impl Default for ImageMetadata {
    // Callers are expected to send metadata; unit dimensions keep absent
    // metadata from failing, at the cost of coordinates scaled by the raw target size.
    fn default() -> Self {
        Self { original_width: 1.0, original_height: 1.0 }
    }
}

/// Projects annotations into the `target_size` x `target_size` space used by the detector.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationRescaler {
    target_size: f64,
}

impl AnnotationRescaler {
    pub fn new(target_size: u32) -> Self {
        Self { target_size: f64::from(target_size) }
    }

    pub fn rescale(
        &self,
        metadata: Option<ImageMetadata>,
        annotations: &[AnnotationRecord],
    ) -> DomainResult<Vec<BoundingBox>> {
        let meta = metadata.unwrap_or_default();
        if !(meta.original_width > 0.0 && meta.original_height > 0.0) {
            return Err(DomainError::InvalidInput(format!(
                "metadata dimensions must be positive, got {}x{}",
                meta.original_width, meta.original_height
            )));
        }

        let scale_x = self.target_size / meta.original_width;
        let scale_y = self.target_size / meta.original_height;

        Ok(annotations
            .iter()
            .map(|ann| {
                let x_min = ann.x * meta.original_width * scale_x;
                let y_min = ann.y * meta.original_height * scale_y;
                BoundingBox {
                    x_min,
                    y_min,
                    x_max: x_min + ann.width * meta.original_width * scale_x,
                    y_max: y_min + ann.height * meta.original_height * scale_y,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ann(x: f64, y: f64, width: f64, height: f64) -> AnnotationRecord {
        AnnotationRecord { x, y, width, height }
    }

    #[test]
    fn rescales_fractions_into_target_space() {
        let meta = ImageMetadata { original_width: 100.0, original_height: 100.0 };
        let boxes = AnnotationRescaler::new(1024)
            .rescale(Some(meta), &[ann(0.1, 0.1, 0.2, 0.2)])
            .unwrap();

        assert_eq!(boxes.len(), 1);
        assert_relative_eq!(boxes[0].x_min, 102.4, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].y_min, 102.4, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].x_max, 307.2, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].y_max, 307.2, epsilon = 1e-9);
    }

    #[test]
    fn non_square_originals_scale_independently() {
        let meta = ImageMetadata { original_width: 2000.0, original_height: 500.0 };
        let boxes = AnnotationRescaler::new(1024)
            .rescale(Some(meta), &[ann(0.5, 0.25, 0.25, 0.5)])
            .unwrap();
        assert_relative_eq!(boxes[0].x_min, 512.0, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].y_min, 256.0, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].x_max, 768.0, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].y_max, 768.0, epsilon = 1e-9);
    }

    #[test]
    fn preserves_annotation_order() {
        let meta = ImageMetadata { original_width: 10.0, original_height: 10.0 };
        let boxes = AnnotationRescaler::new(100)
            .rescale(Some(meta), &[ann(0.5, 0.0, 0.1, 0.1), ann(0.0, 0.5, 0.1, 0.1)])
            .unwrap();
        assert_relative_eq!(boxes[0].x_min, 50.0, epsilon = 1e-9);
        assert_relative_eq!(boxes[1].y_min, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_annotations_give_empty_reference_set() {
        let boxes = AnnotationRescaler::new(1024).rescale(None, &[]).unwrap();
        assert!(boxes.is_empty());
    }

    // Suspect behaviour kept on purpose: absent metadata falls back to unit
    // dimensions, so the result is only right for fractional annotations.
    #[test]
    fn missing_metadata_falls_back_to_unit_dimensions() {
        let boxes = AnnotationRescaler::new(1024)
            .rescale(None, &[ann(0.1, 0.1, 0.2, 0.2)])
            .unwrap();
        assert_relative_eq!(boxes[0].x_min, 102.4, epsilon = 1e-9);
        assert_relative_eq!(boxes[0].x_max, 307.2, epsilon = 1e-9);

        let pixel_offsets = AnnotationRescaler::new(1024)
            .rescale(None, &[ann(10.0, 10.0, 5.0, 5.0)])
            .unwrap();
        assert_relative_eq!(pixel_offsets[0].x_min, 10240.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let meta = ImageMetadata { original_width: 0.0, original_height: 100.0 };
        let err = AnnotationRescaler::new(1024)
            .rescale(Some(meta), &[ann(0.1, 0.1, 0.2, 0.2)])
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn metadata_uses_camel_case_on_the_wire() {
        let meta: ImageMetadata =
            serde_json::from_str(r#"{"originalWidth": 2048, "originalHeight": 1536}"#).unwrap();
        assert_eq!(meta.original_width, 2048.0);
        assert_eq!(meta.original_height, 1536.0);
    }
}
