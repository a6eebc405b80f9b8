use std::time::Duration;

use axum::{http::header, routing::get, Router};
use color_eyre::{eyre::Context, Help};
use tower_http::{
    catch_panic::CatchPanicLayer, request_id::MakeRequestUuid, timeout::TimeoutLayer,
    trace::TraceLayer, ServiceBuilderExt,
};
use tracing::debug;

use middleware::{server_information::StaticServerInformation, trace::SpanMaker};
use redirect::RedirectState;

use crate::{environment::HttpEnvironment, pages, redirect::SAFE_URLS};

pub mod api;
pub mod error;
pub mod middleware;
pub mod redirect;

pub fn app(http: &HttpEnvironment) -> Router {
    let api_router = Router::new()
        .route("/healthy", get(api::healthy))
        .fallback(api::not_found);

    Router::new()
        .route("/", get(pages::index))
        .route("/home", get(pages::home))
        .route("/about", get(pages::about))
        .route("/redirect", get(redirect::redirect))
        .nest("/api", api_router)
        .fallback(error::not_found)
        .layer(
            tower::ServiceBuilder::new()
                // Hide sensitive headers
                .sensitive_headers([header::AUTHORIZATION, header::COOKIE])
                // Give a unique identifier to every request
                .set_x_request_id(MakeRequestUuid)
                .propagate_x_request_id()
                // Trace requests and responses
                .layer(TraceLayer::new_for_http().make_span_with(SpanMaker))
                // Timeout if request or response hangs
                .layer(TimeoutLayer::new(Duration::from_secs(10)))
                // Compress responses
                .map_response_body(axum::body::boxed)
                .compression()
                // Identify the server on every response
                .layer(axum::middleware::from_fn(StaticServerInformation::middleware))
                // Redirect requests that are not to the configured host
                .layer(axum::middleware::from_fn_with_state(
                    http.host.clone(),
                    middleware::redirect_to_domain,
                ))
                // Catch panics in handlers
                .layer(CatchPanicLayer::custom(error::internal_server_error_panic)),
        )
        .with_state(RedirectState {
            base_origin: http.base_origin.clone(),
            allow_list: SAFE_URLS,
        })
}

pub async fn serve(http: HttpEnvironment) -> color_eyre::Result<()> {
    let app = app(&http);

    debug!(bind = %http.bind, "started http server");
    axum::Server::try_bind(&http.bind)
        .wrap_err("failed to bind to given address")
        .with_note(|| format!("is another process already listening on {}?", http.bind))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("http server exited with an error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => debug!("received ctrl-c, shutting down"),
        Err(error) => tracing::error!(%error, "failed to listen for ctrl-c"),
    }
}
