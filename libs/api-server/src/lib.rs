use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio_util::sync::CancellationToken;

use scan_api::TableStore;
use scan_engine::{Invocation, ScanHandler};

struct AppState<S> {
    handler: Arc<ScanHandler<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

/// Router exposing the scan handler: `GET /` and `GET /items`.
pub fn router<S>(handler: Arc<ScanHandler<S>>) -> Router
where
    S: TableStore + 'static,
{
    Router::new()
        .route("/", get(handle_scan::<S>))
        .route("/items", get(handle_scan::<S>))
        .with_state(AppState { handler })
}

/// Local HTTP front-end for the scan handler.
pub async fn run<S>(
    port: u16,
    handler: Arc<ScanHandler<S>>,
    shutdown: CancellationToken,
) -> Result<(), String>
where
    S: TableStore + 'static,
{
    let app = router(handler);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| format!("bind api :{port}: {e}"))?;
    tracing::info!(port, "http api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| format!("axum serve: {e}"))?;

    Ok(())
}

// --- REST: GET / ---

async fn handle_scan<S>(State(state): State<AppState<S>>) -> Response
where
    S: TableStore + 'static,
{
    match state.handler.handle(&Invocation::default()).await {
        Ok(envelope) => match envelope.into_http::<axum::body::Body>() {
            Ok(response) => response,
            Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response(),
        },
        Err(e) => {
            tracing::error!(error = %e, "scan failed");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use scan_api::{RawRecord, TaggedValue};
    use scan_engine::ScanOptions;
    use storage_memory::MemoryTable;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn get_root_returns_all_items() {
        let rows: Vec<RawRecord> = (0..3)
            .map(|i| [("id", TaggedValue::number(i))].into_iter().collect())
            .collect();
        let handler = Arc::new(ScanHandler::new(
            MemoryTable::with_rows("movies", 2, rows),
            ScanOptions::default(),
        ));

        let response = router(handler)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!([{"id": 0}, {"id": 1}, {"id": 2}]));
    }
}
