use clap::Parser;

use crate::domain::model::YoloParams;

/// Chest X-ray screening service.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "RADAR_BIND", default_value = "0.0.0.0:5000")]
    pub bind: String,

    /// YOLO detector exported to ONNX
    #[arg(long, env = "RADAR_MODEL", value_name = "FILE")]
    pub model: String,

    /// Edge of the square space uploads are resized to; all boxes live in it
    #[arg(long, env = "RADAR_TARGET_SIZE", default_value_t = 1024)]
    pub target_size: u32,

    /// Model input edge
    #[arg(long, env = "RADAR_INPUT_SIZE", default_value_t = 640)]
    pub input_size: u32,

    /// Detector confidence threshold (0.0 - 1.0)
    #[arg(long, env = "RADAR_CONFIDENCE", default_value_t = 0.25, value_name = "THRESHOLD")]
    pub confidence: f32,

    /// Detector NMS IoU threshold; 0 drops every candidate overlapping a stronger one
    #[arg(long, env = "RADAR_NMS_IOU", default_value_t = 0.0, value_name = "THRESHOLD")]
    pub nms_iou: f32,

    #[arg(long, env = "RADAR_MAX_DETECTIONS", default_value_t = 300)]
    pub max_detections: usize,

    /// Suppress overlapping candidates across classes
    #[arg(long, env = "RADAR_AGNOSTIC_NMS")]
    pub agnostic_nms: bool,

    /// Default IoU above which a prediction is discarded against an annotation
    #[arg(long, env = "RADAR_OVERLAP_IOU", default_value_t = 0.0, value_name = "THRESHOLD")]
    pub overlap_iou: f64,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "RADAR_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,

    /// Largest accepted request body, in MiB
    #[arg(long, env = "RADAR_MAX_UPLOAD_MB", default_value_t = 64)]
    pub max_upload_mb: usize,

    /// Directory with the web frontend, served for unknown paths
    #[arg(long, env = "RADAR_STATIC_DIR", value_name = "DIR")]
    pub static_dir: Option<String>,
}

impl Args {
    pub fn yolo_params(&self) -> YoloParams {
        YoloParams {
            input_size: self.input_size,
            conf_threshold: self.confidence,
            iou_threshold: self.nms_iou,
            max_detections: self.max_detections,
            agnostic_nms: self.agnostic_nms,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_backend() {
        let args = Args::try_parse_from(["radar", "--model", "models/thoracic.onnx"]).unwrap();
        assert_eq!(args.bind, "0.0.0.0:5000");
        assert_eq!(args.target_size, 1024);
        assert_eq!(args.overlap_iou, 0.0);

        let params = args.yolo_params();
        assert_eq!(params.iou_threshold, 0.0);
        assert_eq!(params.input_size, 640);
        assert!(!params.agnostic_nms);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "radar",
            "--model",
            "m.onnx",
            "--overlap-iou",
            "0.3",
            "--agnostic-nms",
            "--max-upload-mb",
            "2",
        ])
        .unwrap();
        assert_eq!(args.overlap_iou, 0.3);
        assert!(args.yolo_params().agnostic_nms);
        assert_eq!(args.max_upload_bytes(), 2 * 1024 * 1024);
    }
}
