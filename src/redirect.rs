//! Redirect target resolution for the `/redirect` route.
//!
//! The allow-list is consulted and reported, but it never changes where the
//! browser is sent. That is the open redirect this demo exists to show.

use serde::Deserialize;
use url::{ParseError, Url};

/// The fixed set of paths the application considers safe to redirect to
pub const SAFE_URLS: AllowList = AllowList::new(&["/home", "/about"]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList(&'static [&'static str]);

impl AllowList {
    pub const fn new(entries: &'static [&'static str]) -> Self {
        Self(entries)
    }

    /// Exact, case sensitive membership of the raw query value
    pub fn contains(&self, candidate: &str) -> bool {
        self.0.contains(&candidate)
    }

    pub fn entries(&self) -> &'static [&'static str] {
        self.0
    }
}

/// The `url` query parameter.
///
/// A repeated key yields every value joined with `,`, the way a list is
/// stringified when handed to a URL constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct RedirectQuery {
    pub url: Option<String>,
}

impl From<Vec<(String, String)>> for RedirectQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "url")
            .map(|(_, value)| value)
            .collect();

        Self {
            url: (!values.is_empty()).then(|| values.join(",")),
        }
    }
}

/// Resolve `url` relative to `base` the way a browser would.
///
/// An absent value resolves to `base` itself.
pub fn resolve(url: Option<&str>, base: &Url) -> Result<Url, ParseError> {
    match url {
        Some(url) => base.join(url),
        None => Ok(base.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Absolute URL the client is sent to
    pub location: Url,
    /// Whether the raw value was on the allow-list
    pub allowed: bool,
}

impl RedirectTarget {
    #[allow(clippy::if_same_then_else)]
    pub fn new(url: Option<&str>, base: &Url, allow_list: AllowList) -> Result<Self, ParseError> {
        let allowed = url.map_or(false, |url| allow_list.contains(url));

        // Both branches resolve and redirect identically
        let location = if allowed {
            resolve(url, base)?
        } else {
            resolve(url, base)?
        };

        Ok(Self { location, allowed })
    }
}
