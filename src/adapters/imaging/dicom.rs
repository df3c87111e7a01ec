use dicom_dictionary_std::tags;
use dicom_object::{DefaultDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use image::{DynamicImage, GrayImage, RgbImage};
use tracing::debug;

use super::voi_lut::{rescale_to_u8, VoiTransform};
use crate::domain::errors::{DomainError, DomainResult};

const PREAMBLE_LEN: usize = 128;
const MAGIC: &[u8; 4] = b"DICM";

pub fn has_preamble_magic(bytes: &[u8]) -> bool {
    bytes.len() >= PREAMBLE_LEN + MAGIC.len() && &bytes[PREAMBLE_LEN..PREAMBLE_LEN + MAGIC.len()] == MAGIC
}

fn decode_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Decode(e.to_string())
}

/// Decodes the first frame of a DICOM file into an 8-bit RGB image.
///
/// Stored pixel values are used as-is (no Rescale Slope/Intercept), passed
/// through the VOI LUT Sequence when one is present, then stretched to the
/// full 8-bit range.
pub fn decode_dicom(bytes: &[u8]) -> DomainResult<RgbImage> {
    let body = if has_preamble_magic(bytes) { &bytes[PREAMBLE_LEN..] } else { bytes };
    let obj = dicom_object::from_reader(body).map_err(decode_err)?;

    let pixels = obj.decode_pixel_data().map_err(decode_err)?;
    let rows = pixels.rows();
    let columns = pixels.columns();
    let samples = u32::from(pixels.samples_per_pixel());
    let expected = frame_len(rows, columns, samples)?;

    let stored = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let mut values: Vec<f32> = pixels
        .to_vec_frame_with_options(0, &stored)
        .map_err(decode_err)?;
    if values.len() != expected {
        return Err(DomainError::Decode(format!(
            "pixel data holds {} samples, expected {expected}",
            values.len()
        )));
    }

    let voi = voi_transform(&obj);
    debug!(rows, columns, samples, frames = pixels.number_of_frames(), voi = voi.name(), "decoded DICOM pixel data");
    voi.apply(&mut values);
    let scaled = rescale_to_u8(&values);

    match samples {
        1 => GrayImage::from_raw(columns, rows, scaled)
            .map(|gray| DynamicImage::ImageLuma8(gray).to_rgb8())
            .ok_or_else(|| DomainError::Decode("pixel buffer does not match dimensions".into())),
        3 => RgbImage::from_raw(columns, rows, scaled)
            .ok_or_else(|| DomainError::Decode("pixel buffer does not match dimensions".into())),
        n => Err(DomainError::Decode(format!("unsupported samples per pixel: {n}"))),
    }
}

/// Samples in one frame; header values are untrusted, so overflow and empty frames are decode errors.
fn frame_len(rows: u32, columns: u32, samples: u32) -> DomainResult<usize> {
    (rows as usize)
        .checked_mul(columns as usize)
        .and_then(|n| n.checked_mul(samples as usize))
        .filter(|&n| n > 0)
        .ok_or_else(|| DomainError::Decode(format!("invalid frame size {columns}x{rows}x{samples}")))
}

/// The first VOI LUT Sequence item, if any. Window Center/Width is not applied.
fn voi_transform(obj: &DefaultDicomObject) -> VoiTransform {
    obj.element(tags::VOILUT_SEQUENCE)
        .ok()
        .and_then(|seq| seq.items())
        .and_then(|items| items.first())
        .and_then(lut_from_item)
        .unwrap_or(VoiTransform::Identity)
}

fn lut_from_item(item: &InMemDicomObject) -> Option<VoiTransform> {
    let descriptor: Vec<i32> = item.element(tags::LUT_DESCRIPTOR).ok()?.to_multi_int().ok()?;
    let data: Vec<i32> = item.element(tags::LUT_DATA).ok()?.to_multi_int().ok()?;
    let first_mapped = *descriptor.get(1)?;
    if data.is_empty() {
        return None;
    }
    Some(VoiTransform::Lut {
        first_mapped: first_mapped as f32,
        data: data.into_iter().map(|v| v as f32).collect(),
    })
}
