use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Required request input is absent or unparseable (no image field, bad JSON body).
    #[error("{0}")]
    MissingInput(String),
    /// Uploaded bytes could not be decoded as DICOM or as a raster image.
    #[error("could not decode image: {0}")]
    Decode(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Server-side fault unrelated to the request contents.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingInput(_) | DomainError::Decode(_) | DomainError::InvalidInput(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_problems_are_client_errors() {
        assert!(DomainError::MissingInput("image file required".into()).is_client_error());
        assert!(DomainError::Decode("truncated".into()).is_client_error());
        assert!(DomainError::InvalidInput("zero width".into()).is_client_error());
    }

    #[test]
    fn worker_and_encoder_faults_are_not() {
        assert!(!DomainError::Internal("decoder task failed".into()).is_client_error());
        assert!(!DomainError::Inference("session".into()).is_client_error());
    }
}
