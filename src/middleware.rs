//! Request middleware. Every request passes through unchanged; the matcher
//! only decides which paths are considered page routes. This is a routing
//! boundary, not a security control.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::trace;

/// Leading path segments the middleware never intercepts. Prefix semantics:
/// `/apiary` is excluded just like `/api/v1`.
const EXCLUDED_PREFIXES: &[&str] = &["api", "_next/static", "_next/image", "favicon.ico"];

pub fn is_intercepted(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !EXCLUDED_PREFIXES.iter().any(|p| rest.starts_with(p))
}

pub async fn pass_through(req: Request, next: Next) -> Response {
    if is_intercepted(req.uri().path()) {
        trace!(path = %req.uri().path(), "request intercepted");
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excluded_paths() {
        for path in [
            "/api",
            "/api/v1/meals",
            "/apiary",
            "/_next/static/chunk.js",
            "/_next/image?url=x",
            "/favicon.ico",
        ] {
            assert!(!is_intercepted(path), "{path} should be excluded");
        }
    }

    #[test]
    fn page_paths_are_intercepted() {
        for path in ["/", "/dashboard", "/meals/new", "/_next/data/x.json", "/favicon.png"] {
            assert!(is_intercepted(path), "{path} should be intercepted");
        }
    }
}
