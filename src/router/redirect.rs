use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    pages::InternalServerError,
    redirect::{AllowList, RedirectQuery, RedirectTarget},
};

#[derive(Debug, Clone)]
pub struct RedirectState {
    pub base_origin: Url,
    pub allow_list: AllowList,
}

#[tracing::instrument(skip_all)]
pub async fn redirect(
    State(state): State<RedirectState>,
    Query(query): Query<RedirectQuery>,
    headers: HeaderMap,
) -> Result<Found, InternalServerError> {
    let url = query.url.as_deref();
    let target = RedirectTarget::new(url, &state.base_origin, state.allow_list)?;

    if target.allowed {
        debug!(?url, location = %target.location, "redirecting to allow-listed target");
    } else {
        warn!(?url, location = %target.location, "redirecting outside the allow-list");
    }

    Ok(Found::new(target.location, &headers))
}

/// `302 Found` pointing at an absolute URL, with a short body for clients
/// that do not follow redirects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found {
    location: Url,
    format: FoundBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoundBody {
    Text,
    Html,
    /// Neither plain text nor HTML is acceptable to the client
    Empty,
}

impl Found {
    pub fn new(location: Url, request_headers: &HeaderMap) -> Self {
        Self {
            location,
            format: negotiate(request_headers),
        }
    }

    fn body(&self) -> (Option<&'static str>, String) {
        let location = self.location.as_str();

        match self.format {
            FoundBody::Text => (
                Some("text/plain; charset=utf-8"),
                format!("Found. Redirecting to {location}"),
            ),
            FoundBody::Html => (
                Some("text/html; charset=utf-8"),
                format!(
                    "<p>Found. Redirecting to <a href=\"{}\">{}</a></p>",
                    html_escape::encode_double_quoted_attribute(location),
                    html_escape::encode_text(location),
                ),
            ),
            FoundBody::Empty => (None, String::new()),
        }
    }
}

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        let location = match HeaderValue::try_from(self.location.as_str()) {
            Ok(location) => location,
            Err(error) => return InternalServerError::from(error).into_response(),
        };

        let (content_type, body) = self.body();

        let mut response = (
            StatusCode::FOUND,
            [
                (header::LOCATION, location),
                (header::VARY, HeaderValue::from_static("Accept")),
            ],
            body,
        )
            .into_response();

        match content_type {
            Some(content_type) => response
                .headers_mut()
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type)),
            None => response.headers_mut().remove(header::CONTENT_TYPE),
        };

        response
    }
}

/// Pick the body from the `Accept` header, preferring plain text on a tie.
///
/// A missing header accepts anything.
fn negotiate(headers: &HeaderMap) -> FoundBody {
    let ranges: Vec<MediaRange> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|accept| accept.to_str().ok())
        .flat_map(|accept| accept.split(','))
        .filter_map(MediaRange::parse)
        .collect();

    if ranges.is_empty() {
        return FoundBody::Text;
    }

    let text = quality(&ranges, "text", "plain");
    let html = quality(&ranges, "text", "html");

    if text <= 0.0 && html <= 0.0 {
        FoundBody::Empty
    } else if html > text {
        FoundBody::Html
    } else {
        FoundBody::Text
    }
}

/// Quality of the most specific range matching `kind/subtype`, 0 if none does
fn quality(ranges: &[MediaRange], kind: &str, subtype: &str) -> f32 {
    ranges
        .iter()
        .filter_map(|range| range.specificity(kind, subtype).map(|s| (s, range.quality)))
        .max_by(|(a, qa), (b, qb)| a.cmp(b).then(qa.total_cmp(qb)))
        .map_or(0.0, |(_, quality)| quality)
}

#[derive(Debug, Clone, PartialEq)]
struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
}

impl<'a> MediaRange<'a> {
    fn parse(range: &'a str) -> Option<Self> {
        let mut params = range.split(';');
        let (kind, subtype) = params.next()?.trim().split_once('/')?;

        let quality = params
            .filter_map(|param| param.trim().split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
            .and_then(|(_, value)| value.trim().parse::<f32>().ok())
            .map_or(1.0, |quality| quality.clamp(0.0, 1.0));

        Some(Self {
            kind: kind.trim(),
            subtype: subtype.trim(),
            quality,
        })
    }

    fn specificity(&self, kind: &str, subtype: &str) -> Option<u8> {
        match (self.kind, self.subtype) {
            ("*", "*") => Some(0),
            (k, "*") if k.eq_ignore_ascii_case(kind) => Some(1),
            (k, s) if k.eq_ignore_ascii_case(kind) && s.eq_ignore_ascii_case(subtype) => Some(2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn found(accept: Option<&'static str>) -> Found {
        let mut headers = HeaderMap::new();
        if let Some(accept) = accept {
            headers.insert(header::ACCEPT, HeaderValue::from_static(accept));
        }

        Found::new(Url::parse("https://example.com/home").unwrap(), &headers)
    }

    #[test]
    fn negotiates_body_from_accept() {
        assert_eq!(found(None).format, FoundBody::Text);
        assert_eq!(found(Some("*/*")).format, FoundBody::Text);
        assert_eq!(found(Some("text/*")).format, FoundBody::Text);
        assert_eq!(found(Some("text/html,application/xhtml+xml;q=0.9")).format, FoundBody::Html);
        assert_eq!(found(Some("text/plain;q=0.5, text/html")).format, FoundBody::Html);
        assert_eq!(found(Some("text/html;q=0")).format, FoundBody::Empty);
        assert_eq!(found(Some("text/html;q=0, */*;q=0.1")).format, FoundBody::Text);
        assert_eq!(found(Some("application/json")).format, FoundBody::Empty);
    }

    #[test]
    fn text_body() {
        let (content_type, body) = found(None).body();

        assert_eq!(content_type, Some("text/plain; charset=utf-8"));
        assert_eq!(body, "Found. Redirecting to https://example.com/home");
    }

    #[test]
    fn html_body() {
        let (content_type, body) = found(Some("text/html")).body();

        assert_eq!(content_type, Some("text/html; charset=utf-8"));
        assert_eq!(
            body,
            "<p>Found. Redirecting to <a href=\"https://example.com/home\">https://example.com/home</a></p>"
        );
    }

    #[test]
    fn html_body_escapes_the_target() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/html"));
        let location = Url::parse("javascript:\"><script>alert(1)</script>").unwrap();

        let (_, body) = Found::new(location, &headers).body();

        assert!(!body.contains("\"><script>"));
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[test]
    fn unacceptable_body_is_empty() {
        let response = found(Some("application/json")).into_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/home"
        );
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn response_headers() {
        let response = found(None).into_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/home"
        );
        assert_eq!(response.headers()[header::VARY], "Accept");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
