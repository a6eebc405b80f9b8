use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request};
use tower_http::request_id::RequestId;

use super::server_information::{StaticServerInformation, SERVER_INFO};

#[derive(Debug)]
pub struct RequestMetadata {
    /// The request ID, absent when the request id layer did not run
    pub request_id: Option<String>,
    /// Static build-time server information
    pub server: StaticServerInformation,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequestMetadata
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .map(str::to_string);

        Ok(RequestMetadata {
            request_id,
            server: SERVER_INFO,
        })
    }
}
