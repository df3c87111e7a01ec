pub mod decode;
pub mod dicom;
pub mod preview;
pub mod voi_lut;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{ImageNormalizerPort, NormalizedImage, UploadedImage};
use crate::domain::errors::{DomainError, DomainResult};

/// Decodes uploads into square RGB images of `target_size` pixels.
pub struct ImageNormalizer {
    target_size: u32,
}

impl ImageNormalizer {
    pub fn new(target_size: u32) -> Self {
        Self { target_size }
    }

    pub fn normalize_blocking(&self, upload: &UploadedImage) -> DomainResult<NormalizedImage> {
        let decoded = decode::decode_upload(&upload.file_name, &upload.bytes)?;
        debug!(
            file = %upload.file_name,
            width = decoded.width(),
            height = decoded.height(),
            "decoded upload"
        );
        let image = decode::resize_square(&decoded, self.target_size);
        let data_url = preview::to_data_url(&image)?;
        Ok(NormalizedImage { image, data_url })
    }
}

#[async_trait]
impl ImageNormalizerPort for ImageNormalizer {
    async fn normalize(&self, upload: UploadedImage) -> DomainResult<NormalizedImage> {
        let normalizer = ImageNormalizer::new(self.target_size);
        tokio::task::spawn_blocking(move || normalizer.normalize_blocking(&upload))
            .await
            .map_err(|e| DomainError::Internal(format!("decoder task failed: {e}")))?
    }
}
