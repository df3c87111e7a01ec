use super::geometry::BoundingBox;

/// Drops predictions that overlap any reference box by more than `threshold`.
///
/// A threshold of 0 removes every prediction with nonzero overlap. Order of
/// the surviving predictions is preserved.
pub fn suppress_overlapping(
    predictions: &[BoundingBox],
    references: &[BoundingBox],
    threshold: f64,
) -> Vec<BoundingBox> {
    predictions
        .iter()
        .filter(|pred| !references.iter().any(|reference| pred.iou(reference) > threshold))
        .copied()
        .collect()
}
