use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelId {
    pub name: String,       // logical name, file stem of the model
    pub onnx_path: String,  // filesystem path
}

impl ModelId {
    pub fn from_path(path: &str) -> Self {
        let name = std::path::Path::new(path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        Self { name, onnx_path: path.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoloParams {
    pub input_size: u32,        // model input edge, 640 typical
    pub conf_threshold: f32,    // 0..1
    pub iou_threshold: f32,     // 0 drops any candidate overlapping a kept one
    pub max_detections: usize,
    pub agnostic_nms: bool,     // suppress across classes
}

impl Default for YoloParams {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.0,
            max_detections: 300,
            agnostic_nms: false,
        }
    }
}
