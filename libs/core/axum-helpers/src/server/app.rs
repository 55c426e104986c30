use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::http::StatusCode;
use axum::{Json, Router, middleware, routing::get};
use core_config::server::ServerConfig;
use std::future::{Future, IntoFuture};
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Path the generated OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Wraps application routes with the OpenAPI document and common middleware.
///
/// Sets up:
/// - `GET /api-docs/openapi.json` serving `T::openapi()`
/// - JSON 404 fallback
/// - `408 Request Timeout` for requests running longer than `request_timeout`
/// - Request tracing, security headers and response compression
///
/// Routes keep the paths they were registered with; nothing is nested.
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(/* your paths */))]
/// struct ApiDoc;
///
/// let api_routes = Router::new()
///     .route("/example", get(handler))
///     .with_state(my_state);
///
/// let router = create_router::<ApiDoc>(api_routes, config.server.request_timeout());
/// ```
pub fn create_router<T>(apis: Router, request_timeout: Duration) -> Router
where
    T: OpenApi + 'static,
{
    let doc = T::openapi();

    Router::new()
        .route(
            OPENAPI_PATH,
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
        .merge(apis)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new())
}

/// Serve `router` until `coordinator` signals shutdown.
///
/// Once shutdown begins the listener stops accepting connections and
/// in-flight requests get `grace_period` to finish. Requests still running
/// after that are abandoned and this function returns.
pub async fn serve_with_shutdown(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    grace_period: Duration,
) -> io::Result<()> {
    let graceful = coordinator.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.wait().await })
        .into_future();

    let deadline = async move {
        coordinator.wait().await;
        tokio::time::sleep(grace_period).await;
    };

    tokio::select! {
        result = server => {
            result.inspect_err(|e| {
                tracing::error!("Server encountered an error: {:?}", e);
            })?;
            info!("Server stopped, all in-flight requests completed");
        }
        _ = deadline => {
            warn!(
                "Grace period of {:?} elapsed, abandoning in-flight requests",
                grace_period
            );
        }
    }

    Ok(())
}

/// Serve until `coordinator` signals shutdown, then run `cleanup`.
///
/// The in-flight grace period and `cleanup` are each bounded by
/// `shutdown_timeout`. A cleanup still running at that point is dropped.
pub async fn run_until_shutdown<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let result = serve_with_shutdown(listener, router, coordinator, shutdown_timeout).await;

    info!("Running cleanup tasks");
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    result
}

/// Production server: binds, serves until SIGINT/SIGTERM, then runs `cleanup`.
///
/// The grace period for in-flight requests and the cleanup deadline both come
/// from [`ServerConfig::shutdown_timeout`]. `cleanup` runs after the server has
/// stopped, whether or not every request finished.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config.server, cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::new();
    let signal_handle = coordinator.clone();
    tokio::spawn(async move { signal_handle.wait_for_signal().await });

    run_until_shutdown(
        listener,
        router,
        coordinator,
        server_config.shutdown_timeout(),
        cleanup,
    )
    .await
}
