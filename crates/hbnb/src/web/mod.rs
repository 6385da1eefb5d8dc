//! The HBNB web front end.
//!
//! A handful of plain-text routes and one templated page. Paths declared
//! without a trailing slash also answer with one where the classic app did
//! (`/`, `/hbnb`, `/python/`, `/number/{n}`, `/number_template/{n}`).

pub mod routes;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;

/// Build the application router.
pub fn router() -> Router {
    Router::new()
        .route("/", get(routes::hello))
        .route("/hbnb", get(routes::hbnb))
        .route("/hbnb/", get(routes::hbnb))
        .route("/c/{text}", get(routes::c_text))
        .route("/python", get(routes::python_default))
        .route("/python/", get(routes::python_default))
        .route("/python/{text}", get(routes::python_text))
        .route("/number/{n}", get(routes::number))
        .route("/number/{n}/", get(routes::number))
        .route("/number_template/{n}", get(routes::number_template))
        .route("/number_template/{n}/", get(routes::number_template))
        .layer(TraceLayer::new_for_http())
}

/// Serve the router on `addr` until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving HBNB on http://{}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}
