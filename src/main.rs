mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::export::{routes as export_routes, ExportService};
use crate::features::gps::{routes as gps_routes, GpsService};
use crate::features::maintenance::{routes as maintenance_routes, ResetService};
use crate::features::sentiments::{routes as sentiments_routes, SentimentService};
use crate::features::vlogs::{routes as vlogs_routes, VlogService};
use crate::modules::storage::{BlobStore, GridFsBlobStore, MongoRecordStore, RecordStore};
use axum::{middleware::from_fn, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing MONGODB_URI / DB_NAME is fatal
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // One client for the whole process; its pool is shared by both stores
    tracing::info!(
        "Connecting to MongoDB at {} (database: {})",
        config.database.redacted_uri(),
        config.database.name
    );
    let (client, db) = database::connect(&config.database).await?;
    tracing::info!("MongoDB connection established");

    let record_store: Arc<dyn RecordStore> = Arc::new(MongoRecordStore::new(db.clone()));
    let blob_store: Arc<dyn BlobStore> =
        Arc::new(GridFsBlobStore::new(&db, &config.database.gridfs_bucket));
    tracing::info!(
        "Stores initialized (GridFS bucket: {})",
        config.database.gridfs_bucket
    );

    let sentiment_service = Arc::new(SentimentService::new(Arc::clone(&record_store)));
    let gps_service = Arc::new(GpsService::new(Arc::clone(&record_store)));
    let vlog_service = Arc::new(VlogService::new(
        Arc::clone(&record_store),
        Arc::clone(&blob_store),
        config.app.max_vlog_size,
    ));
    let export_service = Arc::new(ExportService::new(
        Arc::clone(&sentiment_service),
        Arc::clone(&gps_service),
        Arc::clone(&vlog_service),
    ));
    let reset_service = Arc::new(ResetService::new(
        Arc::clone(&record_store),
        Arc::clone(&blob_store),
    ));
    tracing::info!(
        "Services initialized (max vlog size: {} bytes)",
        config.app.max_vlog_size
    );

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    let system_routes = Router::new()
        .route("/", get(api_index))
        .route("/health", get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(system_routes)
        .merge(sentiments_routes::routes(sentiment_service))
        .merge(gps_routes::routes(gps_service))
        .merge(vlogs_routes::routes(vlog_service))
        .merge(export_routes::routes(export_service))
        .merge(maintenance_routes::routes(reset_service))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Export dashboard available at http://{}/export", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing MongoDB client");
    client.shutdown().await;

    Ok(())
}

/// JSON index of the public endpoints
async fn api_index() -> Json<Value> {
    Json(json!({
        "name": "EmoGo Backend",
        "status": "running",
        "endpoints": {
            "sentiments": "POST /sentiments",
            "gps": "POST /gps",
            "vlogs": "POST /vlogs",
            "vlog_download": "GET /vlogs/{id}",
            "export_dashboard": "GET /export",
            "export_sentiments": "GET /export/sentiments",
            "export_sentiments_csv": "GET /export/sentiments/csv",
            "export_sentiments_preview": "GET /export/sentiments/preview",
            "export_gps": "GET /export/gps",
            "export_gps_csv": "GET /export/gps/csv",
            "export_gps_preview": "GET /export/gps/preview",
            "export_vlogs": "GET /export/vlogs",
            "download_all_vlogs": "GET /export/vlogs/download-all",
            "download_selected_vlogs": "GET /export/vlogs/download-multiple?ids=<id>,<id>",
            "export_all": "GET /export/all",
            "export_all_download": "GET /export/all/download",
            "clear_all_data": "POST /clear_all_data?confirm=true",
            "docs": "GET /swagger-ui/"
        }
    }))
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
