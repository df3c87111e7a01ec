use std::io::Cursor;

use base64::{prelude::BASE64_STANDARD, Engine};
use image::{ImageFormat, RgbImage};

use crate::domain::errors::{DomainError, DomainResult};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// PNG-encodes `img` as a `data:` URL for embedding in JSON responses.
pub fn to_data_url(img: &RgbImage) -> DomainResult<String> {
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| DomainError::Internal(format!("png encoding failed: {e}")))?;
    Ok(format!("{DATA_URL_PREFIX}{}", BASE64_STANDARD.encode(png)))
}
