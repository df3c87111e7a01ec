pub mod model_catalog;
pub mod nms;
pub mod yolo_engine;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::RgbImage;
use tracing::{debug, info};

use crate::application::ports::DetectorPort;
use crate::domain::{
    errors::{DomainError, DomainResult},
    geometry::BoundingBox,
    model::{ModelId, YoloParams},
};
use yolo_engine::OnnxYoloEngine;

/// Detector backed by an ONNX YOLO export, loaded once at startup.
pub struct OnnxDetector {
    model: ModelId,
    params: YoloParams,
    // ONNX Runtime sessions need exclusive access per run.
    engine: Arc<Mutex<OnnxYoloEngine>>,
}

impl OnnxDetector {
    pub fn load(model: ModelId, params: YoloParams, intra_threads: usize) -> anyhow::Result<Self> {
        let engine = OnnxYoloEngine::load(&model.onnx_path, intra_threads)?;
        info!(model = %model.name, path = %model.onnx_path, input_size = params.input_size, "YOLO model loaded");
        Ok(Self {
            model,
            params,
            engine: Arc::new(Mutex::new(engine)),
        })
    }
}

#[async_trait]
impl DetectorPort for OnnxDetector {
    fn model(&self) -> &ModelId {
        &self.model
    }

    async fn detect(&self, image: RgbImage) -> DomainResult<Vec<BoundingBox>> {
        let engine = self.engine.clone();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let started = std::time::Instant::now();
            let candidates = {
                let mut engine = engine
                    .lock()
                    .map_err(|_| DomainError::Inference("detector lock poisoned".into()))?;
                engine
                    .infer(&image, &params)
                    .map_err(|e| DomainError::Inference(e.to_string()))?
            };
            let raw = candidates.len();
            let kept = nms::non_max_suppression(
                candidates,
                params.iou_threshold,
                params.agnostic_nms,
                params.max_detections,
            );

            let edge = f64::from(image.width().max(image.height()));
            debug!(
                raw,
                kept = kept.len(),
                infer_ms = started.elapsed().as_secs_f32() * 1000.0,
                "detector pass"
            );
            Ok(kept.into_iter().map(|d| d.bbox.clamp_to(edge)).collect())
        })
        .await
        .map_err(|e| DomainError::Internal(format!("detector task failed: {e}")))?
    }
}
