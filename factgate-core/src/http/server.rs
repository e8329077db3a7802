//! HTTP boundary for the profile service
//!
//! Thin plumbing around the access layer: one hyper task per connection,
//! one real route (`GET /me`), a JSON envelope, and the session cookie.
//! All interesting policy lives in [`FactService`].

use super::cookie::SessionCookie;
use super::error::{json_error, method_not_allowed, not_found};
use crate::config::ProfileConfig;
use crate::model::ProfileEnvelope;
use crate::service::FactService;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{body::Incoming, header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Everything a request handler needs, shared across connections.
pub struct AppState {
    pub service: FactService,
    pub profile: ProfileConfig,
    pub cookie: SessionCookie,
}

/// Hyper server exposing the profile endpoint.
pub struct ProfileServer {
    state: Arc<AppState>,
}

impl ProfileServer {
    pub fn new(service: FactService, profile: ProfileConfig) -> Self {
        let state = AppState { service, profile, cookie: SessionCookie::default() };
        Self { state: Arc::new(state) }
    }

    /// Accept loop: one spawned task per connection.
    pub async fn serve(self, addr: &str) -> anyhow::Result<()> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;

        log::info!("profile server listening on {}", addr);

        loop {
            let (stream, peer) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let state = self.state.clone();

            tokio::task::spawn(async move {
                let served = http1::Builder::new()
                    .serve_connection(
                        io,
                        service_fn(move |req| {
                            let state = state.clone();
                            async move { handle_request(req, state).await }
                        }),
                    )
                    .await;
                if let Err(err) = served {
                    log::debug!("connection from {} ended with error: {:?}", peer, err);
                }
            });
        }
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let cookie_header =
        req.headers().get(header::COOKIE).and_then(|v| v.to_str().ok()).map(str::to_string);

    Ok(respond(req.method(), req.uri().path(), cookie_header.as_deref(), &state).await)
}

/// Route and render a request. Split from the hyper glue so it can be
/// exercised directly.
async fn respond(
    method: &Method,
    path: &str,
    cookie_header: Option<&str>,
    state: &AppState,
) -> Response<Full<Bytes>> {
    let mut response = if path == "/me" {
        if *method == Method::GET {
            get_me(state).await
        } else {
            method_not_allowed("GET")
        }
    } else {
        not_found()
    };

    // Issue a session cookie to clients that do not carry one yet
    let has_session =
        cookie_header.map(|h| state.cookie.extract_from_header(h).is_some()).unwrap_or(false);
    if !has_session {
        let set_cookie = state.cookie.build_set_cookie(&state.cookie.new_session_id());
        if let Ok(value) = set_cookie.parse() {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
    }

    response
}

async fn get_me(state: &AppState) -> Response<Full<Bytes>> {
    match state.service.get_fact().await {
        Ok(fact) => {
            let envelope = ProfileEnvelope::success(state.profile.to_user(), &fact);
            let body = serde_json::to_string(&envelope)
                .unwrap_or_else(|_| r#"{"status":"error"}"#.to_string());
            Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/json")
                .body(Full::new(Bytes::from(body)))
                .unwrap()
        }
        Err(err) => {
            log::warn!("could not compose profile: {}", err);
            json_error(err.http_status(), err.code(), &err.to_string())
        }
    }
}
