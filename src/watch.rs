//! Document file watcher.
//!
//! Watches the directory holding the document file (editors and deploy
//! scripts often replace the file by rename), debounces bursts of events and
//! rebuilds the router from the full document set. A failed reload is
//! logged and the previous snapshot stays in service.
//!
//! ```text
//! notify → Debouncer (pure timing) → reload → Router::refresh
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{
    debug, log,
    logger::{status_error, status_success},
    router::{RefreshStats, Router},
    store::DocumentSource,
    utils::plural_s,
};

const DEBOUNCE_MS: u64 = 300;

/// Pure debouncer: only handles timing and event filtering.
struct Debouncer {
    /// File name that triggers a reload
    target: OsString,
    last_event: Option<Instant>,
}

impl Debouncer {
    fn new(target: OsString) -> Self {
        Self {
            target,
            last_event: None,
        }
    }

    /// Record `event` if it touches the document file.
    fn add_event(&mut self, event: &notify::Event) {
        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // mtime/chmod noise
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => {}
            _ => return,
        }

        let touches_target = event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(self.target.as_os_str()));
        if touches_target {
            debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);
            self.last_event = Some(Instant::now());
        }
    }

    /// `true` once the debounce window after the last event has passed.
    fn take_if_ready(&mut self) -> bool {
        match self.last_event {
            Some(last) if last.elapsed() >= Duration::from_millis(DEBOUNCE_MS) => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }

    /// Precise sleep duration until next possible ready time.
    fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };
        Duration::from_millis(DEBOUNCE_MS)
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}

/// Watches one document file and refreshes a router when it changes.
pub struct DocumentWatcher {
    notify_rx: Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    _watcher: RecommendedWatcher,
    debouncer: Debouncer,
}

impl DocumentWatcher {
    /// Start watching immediately; events buffer until [`run`](Self::run).
    pub fn new(documents: &Path) -> Result<Self> {
        let file_name = documents
            .file_name()
            .with_context(|| format!("{} is not a file path", documents.display()))?
            .to_os_string();
        let dir = match documents.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (notify_tx, notify_rx) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })
        .context("Failed to create file watcher")?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        debug!("watch"; "watching {}", documents.display());

        Ok(Self {
            notify_rx,
            _watcher: watcher,
            debouncer: Debouncer::new(file_name),
        })
    }

    /// Event loop; returns when `shutdown_rx` fires or the watcher dies.
    pub fn run(mut self, router: &Router, source: &dyn DocumentSource, shutdown_rx: &Receiver<()>) {
        loop {
            channel::select! {
                recv(self.notify_rx) -> msg => match msg {
                    Ok(Ok(event)) => self.debouncer.add_event(&event),
                    Ok(Err(e)) => log!("watch"; "notify error: {}", e),
                    Err(_) => break,
                },
                recv(shutdown_rx) -> _ => break,
                default(self.debouncer.sleep_duration()) => {
                    if self.debouncer.take_if_ready() {
                        report(reload(router, source));
                    }
                }
            }
        }
    }
}

/// Load the complete document set and swap in a fresh catalog.
pub fn reload(router: &Router, source: &dyn DocumentSource) -> Result<RefreshStats> {
    let documents = source.load()?;
    let stats = router
        .refresh(documents)
        .with_context(|| format!("Failed to index {}", source.describe()))?;
    Ok(stats)
}

fn report(result: Result<RefreshStats>) {
    match result {
        Ok(stats) => status_success(&format!(
            "reloaded {} document{}, {} live alias{}, {} expired",
            stats.documents,
            plural_s(stats.documents),
            stats.index.live,
            if stats.index.live == 1 { "" } else { "es" },
            stats.index.expired,
        )),
        Err(e) => status_error("reload failed, keeping previous index", &format!("{e:#}")),
    }
}
