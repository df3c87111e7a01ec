use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::adapters::http::{error::ApiError, state::HttpState};
use crate::application::dto::{AnalyzeResponse, HealthResponse, ReconcileRequest, ReconcileResponse};
use crate::application::ports::UploadedImage;
use crate::domain::errors::DomainError;

const IMAGE_FIELD: &str = "image";

fn image_required() -> DomainError {
    DomainError::MissingInput("image file required".into())
}

/// `POST /adm`: multipart upload with an `image` file field.
pub async fn analyze(
    State(st): State<HttpState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut multipart = multipart.map_err(|_| image_required())?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::MissingInput(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| DomainError::MissingInput(format!("could not read image field: {e}")))?;
        upload = Some(UploadedImage { file_name, bytes: bytes.to_vec() });
        break;
    }

    let upload = upload.ok_or_else(image_required)?;
    Ok(Json(st.screening.analyze(upload).await?))
}

/// `POST /ddm`: JSON body, parsed whatever the declared content type.
pub async fn reconcile(
    State(st): State<HttpState>,
    body: Bytes,
) -> Result<Json<ReconcileResponse>, ApiError> {
    let request: ReconcileRequest = serde_json::from_slice(&body)
        .map_err(|e| DomainError::MissingInput(format!("invalid JSON body: {e}")))?;
    let filtered_predictions = st.screening.reconcile(request)?;
    Ok(Json(ReconcileResponse { filtered_predictions }))
}

pub async fn health(State(st): State<HttpState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        model: st.screening.model().name.clone(),
    })
}
