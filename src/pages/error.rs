use std::{
    backtrace::{Backtrace, BacktraceStatus},
    panic::Location,
};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dioxus::prelude::*;
use tracing_error::SpanTrace;

use super::Page;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub fn not_found(path: &str) -> Response {
    self::error(
        StatusCode::NOT_FOUND,
        rsx! {
            div {
                code { path }
                " not found"
            }
        },
    )
    .into_response()
}

/// Any error a handler does not recover from.
///
/// Captures where it was raised so debug builds can show it on the error page.
pub struct InternalServerError {
    inner_error: Option<BoxError>,
    span_trace: SpanTrace,
    backtrace: Backtrace,
    caller: &'static Location<'static>,
}

impl InternalServerError {
    fn inner_error(&self) -> String {
        match &self.inner_error {
            Some(error) => error.to_string(),
            None => String::from("None"),
        }
    }

    #[inline(always)]
    fn throw(self) -> Self {
        tracing::error!(caller = %self.caller, error = %self.inner_error(), "encountered an error serving a request");

        self
    }
}

impl<E> From<E> for InternalServerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(value: E) -> Self {
        Self {
            inner_error: Some(Box::new(value)),
            span_trace: SpanTrace::capture(),
            backtrace: Backtrace::capture(),
            caller: Location::caller(),
        }
        .throw()
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let message = self.inner_error();
        let caller = self.caller;
        let span_trace = self.span_trace.to_string();

        self::error(
            StatusCode::INTERNAL_SERVER_ERROR,
            if cfg!(debug_assertions) {
                rsx! {
                    h3 { "Error" }
                    pre { code { "{message}" } }

                    h3 { "Source" }
                    pre { code { "{caller}" } }

                    h3 { "Span Trace" }
                    pre { code { "{span_trace}" } }

                    h3 { "Backtrace" }
                    backtrace(self.backtrace)
                }
            } else {
                rsx! {""}
            },
        )
        .into_response()
    }
}

pub fn backtrace<'a>(backtrace: Backtrace) -> LazyNodes<'a, 'a> {
    rsx! {
        pre {
            code {
                match backtrace.status() {
                    BacktraceStatus::Captured => rsx!{
                        "{backtrace}"
                    },
                    BacktraceStatus::Unsupported => rsx! {
                        "capturing backtraces is unsupported"
                    },
                    BacktraceStatus::Disabled => rsx! {
                        "capturing of backtraces is disabled, enable with RUST_BACKTRACE=1"
                    },
                    _ => rsx! {
                        "backtrace is in an unknown state: {backtrace.status():?}"
                    }
                }
            }
        }
    }
}

pub fn panic_error(message: Option<&str>) -> Response {
    self::error(
        StatusCode::INTERNAL_SERVER_ERROR,
        if cfg!(debug_assertions) {
            rsx! {
                div { "The application panicked." }
                div {
                    if let Some(message) = message {
                        rsx! { "Message: {message}" }
                    } else {
                        rsx! { "Unknown panic message" }
                    }
                }
            }
        } else {
            rsx! {""}
        },
    )
    .into_response()
}

fn error<'a>(status: StatusCode, body: LazyNodes<'a, 'a>) -> (StatusCode, Page<'a>) {
    let status_code = status.as_u16();
    let status_reason = status.canonical_reason().unwrap_or("Unknown Error");

    (
        status,
        Page {
            title: rsx! { "{status_code} ({status_reason})" },
            content: rsx! {
                header {
                    class: "error_message",
                    "{status_code} | {status_reason}"
                }
                main {
                    body
                },
                nav {
                    a { href: "/", "return home" }
                },
            },
        },
    )
}
