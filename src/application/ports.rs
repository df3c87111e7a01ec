use async_trait::async_trait;
use image::RgbImage;

use crate::domain::{errors::DomainResult, geometry::BoundingBox, model::ModelId};

/// Upload as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Square RGB image in the target space plus its PNG data URL preview.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub image: RgbImage,
    pub data_url: String,
}

#[async_trait]
pub trait ImageNormalizerPort: Send + Sync {
    async fn normalize(&self, upload: UploadedImage) -> DomainResult<NormalizedImage>;
}

/// Pretrained detector. Implementations are loaded once and only read afterwards.
#[async_trait]
pub trait DetectorPort: Send + Sync {
    fn model(&self) -> &ModelId;
    /// Boxes in pixel coordinates of `image`. Scores and classes are not returned.
    async fn detect(&self, image: RgbImage) -> DomainResult<Vec<BoundingBox>>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()>;
}
