use std::{env, net::SocketAddr};

use axum::http::uri::Authority;
use color_eyre::{
    eyre::{eyre, Context},
    Help,
};
use tracing::{debug, trace};
use url::Url;

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_BASE_ORIGIN: &str = "https://example.com";

#[derive(Debug, Clone)]
pub struct HttpEnvironment {
    /// Address the server listens on
    pub bind: SocketAddr,
    /// Every redirect target is resolved against this URL
    pub base_origin: Url,
    /// Canonical host, requests to any other host are redirected to it
    pub host: Option<Authority>,
}

impl HttpEnvironment {
    /// Read the environment, loading a `.env` file first if one exists
    pub fn from_env() -> color_eyre::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(?path, "loaded .env file"),
            Err(error) if error.not_found() => trace!("no .env file found"),
            Err(error) => return Err(error).wrap_err("failed to load .env file"),
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> color_eyre::Result<Self> {
        let bind = var("BIND")
            .as_deref()
            .unwrap_or(DEFAULT_BIND)
            .parse::<SocketAddr>()
            .wrap_err("$BIND should be a valid socket address")
            .with_note(|| format!("defaults to {DEFAULT_BIND} when unset"))?;

        let base_origin =
            parse_base_origin(var("BASE_ORIGIN").as_deref().unwrap_or(DEFAULT_BASE_ORIGIN))?;

        let host = var("HOST")
            .map(|host| {
                host.parse::<Authority>()
                    .wrap_err("$HOST should be a valid URI authority")
                    .note("leave HOST unset to accept requests for any host")
            })
            .transpose()?;

        Ok(HttpEnvironment {
            bind,
            base_origin,
            host,
        })
    }
}

fn parse_base_origin(raw: &str) -> color_eyre::Result<Url> {
    let url = Url::parse(raw)
        .wrap_err_with(|| format!("$BASE_ORIGIN {raw:?} should be an absolute URL"))?;

    if url.cannot_be_a_base() {
        return Err(eyre!("$BASE_ORIGIN {raw:?} cannot be used as a base URL")
            .note("use a hierarchical URL such as https://example.com"));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn from_map(vars: &[(&str, &str)]) -> color_eyre::Result<HttpEnvironment> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        HttpEnvironment::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let http = from_map(&[]).unwrap();

        assert_eq!(http.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(http.base_origin.as_str(), "https://example.com/");
        assert!(http.host.is_none());
    }

    #[test]
    fn reads_configured_values() {
        let http = from_map(&[
            ("BIND", "127.0.0.1:8080"),
            ("BASE_ORIGIN", "http://shop.local:3000"),
            ("HOST", "demo.test:8080"),
        ])
        .unwrap();

        assert_eq!(http.bind, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(http.base_origin.as_str(), "http://shop.local:3000/");
        assert_eq!(http.host.unwrap().as_str(), "demo.test:8080");
    }

    #[test]
    fn rejects_invalid_bind() {
        assert!(from_map(&[("BIND", "localhost")]).is_err());
    }

    #[test]
    fn rejects_relative_base_origin() {
        assert!(from_map(&[("BASE_ORIGIN", "/relative")]).is_err());
    }

    #[test]
    fn rejects_base_origin_that_cannot_be_a_base() {
        assert!(from_map(&[("BASE_ORIGIN", "mailto:admin@example.com")]).is_err());
    }
}
