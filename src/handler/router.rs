//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for route matching,
//! method validation, and access logging.

use crate::config::{AppState, RoutesConfig};
use crate::handler::{download, form};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context for the read-only routes
pub struct RequestContext {
    pub is_head: bool,
    pub if_none_match: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Form,
    Download,
    Health,
}

impl Route {
    fn resolve(path: &str, routes: &RoutesConfig) -> Option<Self> {
        if path == "/" {
            Some(Self::Form)
        } else if path == routes.download_path {
            Some(Self::Download)
        } else if routes.health.enabled && path == routes.health.path {
            Some(Self::Health)
        } else {
            None
        }
    }

    const fn allow(self) -> &'static str {
        match self {
            Self::Form => "GET, HEAD, POST, OPTIONS",
            Self::Download | Self::Health => "GET, HEAD, OPTIONS",
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| new_access_entry(&req, peer_addr));

    let mut response = route_request(req, &state).await;

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(mut entry) = access_entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Route request based on path and method
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let path = req.uri().path().to_owned();
    let Some(route) = Route::resolve(&path, &state.config.routes) else {
        return http::build_404_response();
    };

    let method = req.method().clone();
    match (route, &method) {
        (_, &Method::OPTIONS) => {
            http::build_options_response(route.allow(), state.config.http.enable_cors)
        }
        (Route::Form, &Method::POST) => {
            if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
                return resp;
            }
            form::submit_form(req, state).await
        }
        (_, &Method::GET | &Method::HEAD) => {
            let ctx = RequestContext {
                is_head: method == Method::HEAD,
                if_none_match: header_string(&req, "if-none-match"),
            };
            match route {
                Route::Form => form::serve_form(ctx.is_head),
                Route::Download => download::serve_download(&ctx, &state.store).await,
                Route::Health => http::build_health_response("ok", ctx.is_head),
            }
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            http::build_405_response(route.allow())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn header_string<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn new_access_entry<B>(req: &Request<B>, peer_addr: Option<SocketAddr>) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        peer_addr.map_or_else(|| "-".to_string(), |a| a.ip().to_string()),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.referer = header_string(req, "referer");
    entry.user_agent = header_string(req, "user-agent");
    entry
}
