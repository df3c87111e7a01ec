use image::{imageops::FilterType, RgbImage};

use super::dicom;
use crate::domain::errors::{DomainError, DomainResult};

const DICOM_EXTENSIONS: [&str; 2] = [".dcm", ".dicom"];

/// DICOM by extension, or by the `DICM` magic after the 128-byte preamble.
pub fn is_dicom(file_name: &str, bytes: &[u8]) -> bool {
    let lower = file_name.to_ascii_lowercase();
    DICOM_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) || dicom::has_preamble_magic(bytes)
}

pub fn decode_upload(file_name: &str, bytes: &[u8]) -> DomainResult<RgbImage> {
    if is_dicom(file_name, bytes) {
        dicom::decode_dicom(bytes)
    } else {
        decode_raster(bytes)
    }
}

/// Any format the `image` crate recognises, converted to 8-bit RGB.
pub fn decode_raster(bytes: &[u8]) -> DomainResult<RgbImage> {
    let img = image::load_from_memory(bytes).map_err(|e| DomainError::Decode(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Stretches to `size` x `size`; aspect ratio is not preserved.
pub fn resize_square(img: &RgbImage, size: u32) -> RgbImage {
    if img.dimensions() == (size, size) {
        return img.clone();
    }
    image::imageops::resize(img, size, size, FilterType::Lanczos3)
}
