//! Server lifecycle management.

use crate::{core::register_server, log, router::Router, store::JsonFileStore, watch::DocumentWatcher};
use anyhow::Result;
use crossbeam::channel::{Receiver, Sender};
use std::{
    net::SocketAddr,
    sync::Arc,
    thread::{self, JoinHandle},
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler set up in main() unblocks the server
/// and stops the watcher.
pub fn register_server_for_shutdown(server: Arc<Server>, shutdown_tx: Sender<()>) {
    register_server(server, shutdown_tx);
}

/// Spawn the document watcher thread.
pub fn spawn_watcher(
    router: Arc<Router>,
    store: JsonFileStore,
    watch_enabled: bool,
    shutdown_rx: Receiver<()>,
) -> Option<JoinHandle<()>> {
    if !watch_enabled {
        return None;
    }

    // Start watching before the thread spawns so no write is missed
    let watcher = match DocumentWatcher::new(store.path()) {
        Ok(watcher) => watcher,
        Err(e) => {
            log!("watch"; "disabled: {:#}", e);
            return None;
        }
    };
    log!("watch"; "{}", store.path().display());

    Some(thread::spawn(move || {
        watcher.run(&router, &store, &shutdown_rx);
    }))
}

/// Wait for the watcher to shutdown gracefully (max 2 seconds).
pub fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(std::time::Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_bind_with_retry_skips_taken_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, addr) = bind_with_retry(localhost, 0).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();
        assert_eq!(addr.port(), 0);

        let (_second, addr) = bind_with_retry(localhost, taken).unwrap();
        assert_ne!(addr.port(), taken);
    }

    #[test]
    fn test_spawn_watcher_disabled() {
        let (_tx, rx) = crossbeam::channel::unbounded();
        let router = Arc::new(Router::new(Default::default()));
        let handle = spawn_watcher(router, JsonFileStore::new("documents.json"), false, rx);
        assert!(handle.is_none());
    }
}
