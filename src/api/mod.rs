//! HTTP surface for the note service.
//!
//! Function-style routes (`/setNote`, `/getNote`, `/deleteNote`, `/listNotes`)
//! take a JSON object body. REST-style routes under `/notes` take the address
//! from the path.

pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::service::NoteService;

pub use error::{ApiError, ApiResult};

/// Build the application router around `service`.
pub fn router(service: NoteService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/setNote", post(handlers::set_note))
        .route("/getNote", post(handlers::get_note))
        .route("/deleteNote", post(handlers::delete_note))
        .route(
            "/listNotes",
            get(handlers::list_notes).post(handlers::list_notes),
        )
        .route("/notes", get(handlers::list_notes))
        .route(
            "/notes/{addr}",
            get(handlers::get_note_by_path)
                .put(handlers::put_note_by_path)
                .delete(handlers::delete_note_by_path),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(service)
}

/// Serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, service: NoteService) -> Result<()> {
    let app = router(service);

    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
