use std::sync::Arc;

use clap::Parser;
use tower_http::services::ServeDir;
use tracing_subscriber::EnvFilter;

use radar::adapters::{
    http::{router, state::HttpState},
    imaging::ImageNormalizer,
    onnx::{model_catalog::OnnxModelCatalog, OnnxDetector},
};
use radar::application::{ports::ModelCatalogPort, services::ScreeningService};
use radar::config::Args;
use radar::domain::{annotation::AnnotationRescaler, model::ModelId};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging (RUST_LOG, info by default)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // 2. Model, validated and loaded once; read-only from here on
    let model = ModelId::from_path(&args.model);
    OnnxModelCatalog::new().validate_model(&model).await?;
    let detector = Arc::new(OnnxDetector::load(model, args.yolo_params(), args.intra_threads)?);

    // 3. Use cases
    let screening = Arc::new(ScreeningService::new(
        Arc::new(ImageNormalizer::new(args.target_size)),
        detector,
        AnnotationRescaler::new(args.target_size),
        args.overlap_iou,
    ));

    // 4. Router, with the frontend as fallback when configured
    let mut app = router(HttpState { screening }, args.max_upload_bytes());
    if let Some(dir) = &args.static_dir {
        tracing::info!(dir = %dir, "serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    tracing::info!(addr = %args.bind, target_size = args.target_size, "radar listening");
    axum::serve(listener, app).await?;

    Ok(())
}
