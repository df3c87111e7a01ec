use anyhow::{anyhow, Result};
use image::{imageops::FilterType, RgbImage};
use ndarray::{s, Array4, ArrayView2, ArrayViewD, Axis, Ix2, IxDyn};
use ort::session::Session;
use ort::value::Value;
use std::fs;

use crate::domain::detection::Detection;
use crate::domain::geometry::BoundingBox;
use crate::domain::model::YoloParams;

pub struct OnnxYoloEngine {
    session: Session,
}

impl OnnxYoloEngine {
    pub fn load(path: &str, intra_threads: usize) -> Result<Self> {
        let builder = Session::builder()?.with_intra_threads(intra_threads)?;
        let model_bytes = fs::read(path)?;
        let session = builder.commit_from_memory(&model_bytes)?;
        Ok(Self { session })
    }

    /// Raw candidates above the confidence threshold, in pixel coordinates of `rgb`.
    /// No suppression is applied here.
    pub fn infer(&mut self, rgb: &RgbImage, params: &YoloParams) -> Result<Vec<Detection>> {
        let imgsz = params.input_size as usize;
        let input = preprocess(rgb, params.input_size);

        let input_shape = vec![1, 3, imgsz as i64, imgsz as i64];
        let input_tensor = Value::from_array((input_shape, input.into_raw_vec_and_offset().0))?;

        let outputs = self.session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        let dims: Vec<usize> = shape_out.iter().map(|&x| x as usize).collect();
        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)?;
        let view = array_view
            .index_axis(Axis(0), 0)
            .into_dimensionality::<Ix2>()
            .map_err(|e| anyhow!("unexpected YOLO output shape {dims:?}: {e}"))?;

        let sx = rgb.width() as f32 / imgsz as f32;
        let sy = rgb.height() as f32 / imgsz as f32;
        Ok(decode_output(view, sx, sy, params.conf_threshold))
    }
}

/// NCHW float tensor with values in `[0, 1]`.
pub fn preprocess(rgb: &RgbImage, input_size: u32) -> Array4<f32> {
    let imgsz = input_size as usize;
    let resized = image::imageops::resize(rgb, input_size, input_size, FilterType::Triangle);

    let mut input = Array4::<f32>::zeros((1, 3, imgsz, imgsz));
    for (x, y, pixel) in resized.enumerate_pixels() {
        input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
        input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
        input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
    }
    input
}

/// Decodes a `[4 + classes, candidates]` YOLO head (the transposed layout is
/// accepted too). Boxes are centre/size in model space, scaled by `sx`/`sy`.
pub fn decode_output(view: ArrayView2<f32>, sx: f32, sy: f32, conf_threshold: f32) -> Vec<Detection> {
    let view = if view.shape()[0] > view.shape()[1] { view.reversed_axes() } else { view };
    if view.shape()[0] <= 4 {
        return Vec::new();
    }

    let num_candidates = view.shape()[1];
    let mut detections = Vec::new();

    for i in 0..num_candidates {
        let scores = view.slice(s![4.., i]);
        let Some((class_id, &max_score)) = scores
            .indexed_iter()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
        else {
            continue;
        };

        if max_score > conf_threshold {
            let cx = view[[0, i]];
            let cy = view[[1, i]];
            let w = view[[2, i]];
            let h = view[[3, i]];

            detections.push(Detection {
                bbox: BoundingBox::new(
                    f64::from((cx - w / 2.0) * sx),
                    f64::from((cy - h / 2.0) * sy),
                    f64::from((cx + w / 2.0) * sx),
                    f64::from((cy + h / 2.0) * sy),
                ),
                score: max_score,
                class_id,
            });
        }
    }
    detections
}
