use std::any::Any;

use axum::{
    extract::OriginalUri,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::pages;

pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    pages::not_found(uri.path())
}

pub fn internal_server_error_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        Some(s.as_str())
    } else {
        panic.downcast_ref::<&str>().copied()
    };

    match message {
        Some(panic) => error!(%panic, "service panicked"),
        None => error!("service panicked but panic info was not a &str or String"),
    }

    pages::panic_error(message).into_response()
}
