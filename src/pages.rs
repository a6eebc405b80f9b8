use axum::{
    http,
    response::{IntoResponse, Response},
};
use dioxus::prelude::*;

mod error;
mod home;

pub use {
    error::{not_found, panic_error, InternalServerError},
    home::{about, home, index},
};

pub struct Page<'e> {
    pub title: LazyNodes<'e, 'e>,
    pub content: LazyNodes<'e, 'e>,
}

impl<'e> Page<'e> {
    fn wrap(self) -> LazyNodes<'e, 'e> {
        rsx! {
            head {
                meta { charset: "utf-8"}
                meta {
                    http_equiv: "X-UA-Compatible",
                    content: "IE=edge"
                }
                meta {
                    name: "viewport",
                    content: "width=device-width, initial-scale=1.0"
                }

                title { self.title, " - Redirect Demo" }
            }
            body {
                self.content
            }
        }
    }
}

impl<'e> IntoResponse for Page<'e> {
    fn into_response(self) -> Response {
        let headers = [(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("text/html; charset=UTF-8"),
        )];

        let page = dioxus_ssr::render_lazy(self.wrap());

        let html = format!("<!DOCTYPE html><html lang=\"en\">{}</html>", page);

        (headers, html).into_response()
    }
}
