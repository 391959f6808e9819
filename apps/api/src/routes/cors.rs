//! Cross-origin policy, applied as one shared layer to every `/api` route.

use anyhow::{Context, Result};
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Debug, Clone)]
pub struct CorsPolicy {
    pub allowed_origins: AllowedOrigins,
    pub allowed_methods: Vec<Method>,
    pub allowed_headers: Vec<HeaderName>,
}

impl Default for CorsPolicy {
    /// Any origin, `GET, OPTIONS`, `Content-Type`.
    fn default() -> Self {
        Self {
            allowed_origins: AllowedOrigins::Any,
            allowed_methods: vec![Method::GET, Method::OPTIONS],
            allowed_headers: vec![header::CONTENT_TYPE],
        }
    }
}

impl CorsPolicy {
    /// Default policy with origins parsed from `*` or a comma-separated list.
    pub fn with_origins(value: &str) -> Result<Self> {
        Ok(Self {
            allowed_origins: parse_origins(value)?,
            ..Self::default()
        })
    }

    pub fn layer(&self) -> CorsLayer {
        let origin = match &self.allowed_origins {
            AllowedOrigins::Any => AllowOrigin::any(),
            AllowedOrigins::List(origins) => AllowOrigin::list(origins.iter().cloned()),
        };

        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(self.allowed_methods.clone())
            .allow_headers(self.allowed_headers.clone())
    }

    /// Wraps `router` in the CORS layer. Every response, not only preflights,
    /// also advertises the allowed methods and headers.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let mut router = router.layer(self.layer());
        for (name, value) in self.advertised_headers() {
            router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
        }
        router
    }

    /// Same values the CORS layer writes on a preflight.
    fn advertised_headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let methods = comma_joined(self.allowed_methods.iter().map(Method::as_str));
        let headers = comma_joined(self.allowed_headers.iter().map(HeaderName::as_str));

        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, methods),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, headers),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }
}

fn comma_joined<'a>(items: impl Iterator<Item = &'a str>) -> Option<HeaderValue> {
    let joined = items.collect::<Vec<_>>().join(",");
    if joined.is_empty() {
        return None;
    }
    HeaderValue::from_str(&joined).ok()
}

fn parse_origins(value: &str) -> Result<AllowedOrigins> {
    let value = value.trim();
    if value.is_empty() || value.split(',').any(|o| o.trim() == "*") {
        return Ok(AllowedOrigins::Any);
    }

    let origins = value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllowedOrigins::List(origins))
}
