use crate::domain::detection::Detection;

/// Greedy non-maximum suppression over score-sorted candidates.
///
/// A candidate is dropped when its IoU with an already kept candidate exceeds
/// `iou_threshold`; only candidates of the same class compete unless
/// `agnostic` is set. At most `max_detections` survive.
pub fn non_max_suppression(
    mut candidates: Vec<Detection>,
    iou_threshold: f32,
    agnostic: bool,
    max_detections: usize,
) -> Vec<Detection> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let threshold = f64::from(iou_threshold);
    let mut kept: Vec<Detection> = Vec::new();
    for candidate in candidates {
        if kept.len() >= max_detections {
            break;
        }
        let suppressed = kept.iter().any(|k| {
            (agnostic || k.class_id == candidate.class_id) && k.bbox.iou(&candidate.bbox) > threshold
        });
        if !suppressed {
            kept.push(candidate);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::BoundingBox;

    fn det(x: f64, score: f32, class_id: usize) -> Detection {
        Detection { bbox: BoundingBox::new(x, 0.0, x + 10.0, 10.0), score, class_id }
    }

    #[test]
    fn zero_threshold_drops_any_overlap() {
        let kept = non_max_suppression(vec![det(0.0, 0.5, 0), det(9.0, 0.9, 0), det(30.0, 0.4, 0)], 0.0, false, 300);
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.4]);
    }

    #[test]
    fn threshold_allows_light_overlap() {
        let kept = non_max_suppression(vec![det(0.0, 0.9, 0), det(9.0, 0.8, 0)], 0.45, false, 300);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn classes_do_not_compete_unless_agnostic() {
        let candidates = vec![det(0.0, 0.9, 0), det(0.0, 0.8, 3)];
        assert_eq!(non_max_suppression(candidates.clone(), 0.0, false, 300).len(), 2);
        assert_eq!(non_max_suppression(candidates, 0.0, true, 300).len(), 1);
    }

    #[test]
    fn caps_output() {
        let candidates = (0..10).map(|i| det(f64::from(i) * 20.0, 0.5, 0)).collect();
        assert_eq!(non_max_suppression(candidates, 0.0, false, 4).len(), 4);
    }
}
