//! Listener glue: HTTP router, static assets, WebSocket upgrade.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server binds one address and serves three things: the bootstrap page
//! at `/`, the browser shim at `/canvas.js`, and the binary WebSocket
//! endpoint at `/draw`. Every accepted connection becomes an independent
//! session running the user entry function; sessions share nothing.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::services::ServeDir;
use tracing::info;

use crate::context::Context;
use crate::error::ServeError;
use crate::options::Options;
use crate::session::{self, EntryFn};

const INDEX_HTML: &str = include_str!("../assets/index.html");
const CANVAS_JS: &str = include_str!("../assets/canvas.js");

#[derive(Clone)]
struct ServerState {
    options: Options,
    entry: EntryFn,
}

/// Build the router without binding: `/` and `/canvas.js` (embedded, or a
/// [`ServeDir`] when [`Options::asset_dir`] is set) plus the `/draw`
/// WebSocket endpoint. Exposed so tests and embedders can mount the canvas
/// app inside their own server.
pub fn app<F, Fut>(options: Options, entry: F) -> Router
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let entry: EntryFn = Arc::new(move |ctx| Box::pin(entry(ctx)));
    let asset_dir = options.asset_dir.clone();
    let state = ServerState { options, entry };

    let router = Router::new().route("/draw", get(handle_upgrade));
    let router = match asset_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(index)).route("/canvas.js", get(shim)),
    };
    router.with_state(state)
}

/// Serve the canvas app on `addr` until the process ends.
///
/// `entry` runs once per connected browser, with an owned [`Context`]; when
/// it returns, that session closes.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] if the address cannot be bound and
/// [`ServeError::Serve`] if the listener fails afterwards.
pub async fn serve<A, F, Fut>(addr: A, options: Options, entry: F) -> Result<(), ServeError>
where
    A: ToSocketAddrs,
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.map_err(ServeError::Bind)?;
    if let Ok(local) = listener.local_addr() {
        info!(addr = %local, "canvas server listening");
    }
    axum::serve(listener, app(options, entry))
        .await
        .map_err(ServeError::Serve)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn shim() -> Response {
    ([(header::CONTENT_TYPE, "application/javascript")], CANVAS_JS).into_response()
}

async fn handle_upgrade(State(state): State<ServerState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| session::run(socket, state.options, state.entry))
}
