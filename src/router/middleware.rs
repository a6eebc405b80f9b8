use axum::{
    body::{Body, BoxBody},
    extract::{Host, State},
    http::{
        uri::{Authority, Parts, Scheme},
        Request, Response, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Redirect},
};
use tracing::{trace, trace_span};

use crate::pages::InternalServerError;

pub mod request_metadata;
pub mod server_information;
pub mod trace;

/// Permanently redirect requests for any host other than the configured one.
///
/// Does nothing when no host is configured or the request carries no host.
pub async fn redirect_to_domain(
    State(expected_host): State<Option<Authority>>,
    host: Option<Host>,
    req: Request<Body>,
    next: Next<Body>,
) -> Response<BoxBody> {
    let (expected_host, Host(host)) = match (expected_host, host) {
        (Some(expected_host), Some(host)) if host.0 != expected_host.as_str() => {
            (expected_host, host)
        }
        _ => return next.run(req).await,
    };

    trace_span!("redirect_to_domain", %expected_host, %host).in_scope(|| {
        let mut parts = Parts::default();
        // Inherit path and query from request
        parts.path_and_query = req.uri().path_and_query().cloned();

        parts.authority = Some(expected_host);
        parts.scheme = Some(if cfg!(debug_assertions) {
            Scheme::HTTP
        } else {
            Scheme::HTTPS
        });

        trace!("URI authority did not match configured HOST");

        match Uri::from_parts(parts) {
            Ok(uri) => Redirect::permanent(&uri.to_string()).into_response(),
            Err(error) => InternalServerError::from(error).into_response(),
        }
    })
}
