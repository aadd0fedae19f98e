//! HTTP front for alias resolution.
//!
//! Every request resolves against one catalog snapshot: the outcome and the
//! document lookup for `ServeById` never straddle a refresh.

mod lifecycle;
mod response;

use super::load_router;
use crate::{
    config::RouterConfig,
    debug, log,
    route::{ResolutionOutcome, ResolveError, Resolver},
    router::Router,
    store::JsonFileStore,
};
use anyhow::{Context, Result};
use crossbeam::channel;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

use response::Reply;

/// Worker threads answering requests.
const REQUEST_THREADS: usize = 4;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Load documents, build the router, and serve until Ctrl+C.
pub fn serve(config: &RouterConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.store.documents);
    let router = Arc::new(load_router(config, &store)?);
    let stats = router.snapshot().index().stats();
    log!("store"; "{} documents, {} live aliases from {}",
        router.snapshot().len(), stats.live, store.path().display());

    let bound = bind_server(config)?;
    debug!("serve"; "bound {}", bound.addr());
    bound.run(router, config, store)
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &RouterConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the request loop (blocking).
    pub fn run(self, router: Arc<Router>, config: &RouterConfig, store: JsonFileStore) -> Result<()> {
        let watcher = lifecycle::spawn_watcher(
            Arc::clone(&router),
            store,
            config.store.watch,
            self.shutdown_rx,
        );
        run_request_loop(&self.server, &router, &config.serve.scheme)?;
        lifecycle::wait_for_shutdown(watcher);
        Ok(())
    }
}

fn run_request_loop(server: &Server, router: &Arc<Router>, scheme: &str) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let router = Arc::clone(router);
        let scheme = scheme.to_string();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &router, &scheme) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, router: &Router, scheme: &str) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let reply = match request.method() {
        Method::Get | Method::Head => {
            let host = header_value(&request, "Host").unwrap_or_default();
            let origin = request_origin(scheme, &host);
            answer(router, request.url(), &origin)
        }
        _ => Reply::method_not_allowed(),
    };

    debug!("serve"; "{} {} -> {}", request.method(), request.url(), reply.status);
    response::send_reply(request, reply)
}

/// Origin of a request as seen by the client.
fn request_origin(scheme: &str, host: &str) -> String {
    if host.is_empty() {
        String::new()
    } else {
        format!("{scheme}://{host}")
    }
}

/// Map a resolution against the current snapshot to a reply.
fn answer(router: &Router, url: &str, origin: &str) -> Reply {
    let catalog = router.snapshot();
    let outcome = Resolver::new(catalog.index(), router.policy()).resolve(url, origin);

    match outcome {
        Ok(ResolutionOutcome::ServeDirect { document_id, key }) => {
            Reply::document(&document_id, Some(&key))
        }
        Ok(ResolutionOutcome::ServeById { document_id }) => {
            if catalog.document(&document_id).is_some() {
                Reply::document(&document_id, None)
            } else {
                Reply::not_found()
            }
        }
        Ok(ResolutionOutcome::RedirectToCanonical { location }) => Reply::redirect(&location),
        Ok(ResolutionOutcome::NotFound) => Reply::not_found(),
        Err(err @ ResolveError::MalformedOrigin(_)) => Reply::bad_request(&err.to_string()),
    }
}

fn header_value(request: &Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.to_string())
}
