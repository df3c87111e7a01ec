//! Value-of-interest transforms applied to stored pixel values before display scaling.

/// A VOI transform as declared by a DICOM data set.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiTransform {
    Identity,
    /// Explicit lookup table: inputs below `first_mapped` use the first entry,
    /// inputs past the table use the last.
    Lut { first_mapped: f32, data: Vec<f32> },
}

impl VoiTransform {
    pub fn name(&self) -> &'static str {
        match self {
            VoiTransform::Identity => "identity",
            VoiTransform::Lut { .. } => "lut",
        }
    }

    pub fn apply(&self, values: &mut [f32]) {
        match self {
            VoiTransform::Identity => {}
            VoiTransform::Lut { first_mapped, data } => {
                let Some(last_index) = data.len().checked_sub(1) else {
                    return;
                };
                for v in values.iter_mut() {
                    let offset = (*v - first_mapped).clamp(0.0, last_index as f32);
                    *v = data[offset as usize];
                }
            }
        }
    }
}

/// Shifts values so the minimum is zero and stretches them to `[0, 255]`.
///
/// A constant input has nothing to stretch and comes out all zero.
pub fn rescale_to_u8(values: &[f32]) -> Vec<u8> {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().map(|v| v - min).fold(0.0_f32, f32::max);

    if max == 0.0 {
        return values.iter().map(|v| (v - min) as u8).collect();
    }
    values
        .iter()
        .map(|v| ((v - min) / max * 255.0) as u8)
        .collect()
}
