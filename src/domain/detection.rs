use super::geometry::BoundingBox;

/// Raw detector candidate. Score and class only live until post-processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub score: f32,
    pub class_id: usize,
}
