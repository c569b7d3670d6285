//! File watcher — monitors one file for changes via notify (inotify on
//! Linux) and feeds freshly decoded images into the shared slot.
//!
//! notify::RecommendedWatcher runs its callback on an internal thread; the
//! callback forwards matching notifications over an mpsc channel that the
//! reload thread blocks on.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};
use eframe::egui;
use log::{error, info, trace};
#[cfg(target_os = "linux")]
use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::decode::{decode_image, DecodePolicy};
use crate::slot::ImageSlot;

/// True for events that mean the file has complete new content.
///
/// inotify emits Modify(Data) on every write() while the file is still
/// open; decoding on those can catch a half-written file. CloseWrite
/// fires once the writer is done; Create and Name cover atomic-rename
/// saves.
#[cfg(target_os = "linux")]
pub fn is_reload_event(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Access(AccessKind::Close(AccessMode::Write))
            | EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Name(_))
    )
}

/// Other backends (FSEvents, kqueue, Windows) do not report close-write,
/// so any modify or create event has to count.
#[cfg(not(target_os = "linux"))]
pub fn is_reload_event(kind: &EventKind) -> bool {
    kind.is_modify() || kind.is_create()
}

pub struct FileWatcher {
    rx: Receiver<()>,
    _watcher: RecommendedWatcher, // Drop stops watching
}

impl FileWatcher {
    /// Establish a watch for the given file.
    ///
    /// Linux inotify loses the watch on rename (atomic save), so we watch
    /// the parent directory (NonRecursive) and filter events by path.
    pub fn new(path: &Path) -> Result<Self> {
        let canonical = path.canonicalize()?;
        let target = canonical.clone();
        let (tx, rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    let matches = event.paths.iter().any(|p| p == &target);
                    if matches && is_reload_event(&event.kind) {
                        let _ = tx.send(());
                    } else {
                        trace!("ignoring event {:?} for {:?}", event.kind, event.paths);
                    }
                }
            },
            notify::Config::default(),
        )?;
        let parent = canonical
            .parent()
            .ok_or_else(|| anyhow!("cannot watch filesystem root"))?;
        watcher.watch(parent, RecursiveMode::NonRecursive)?;

        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// Block until the watched file changes. Err means the watch backend
    /// has shut down.
    pub fn wait(&self) -> Result<()> {
        self.rx
            .recv()
            .map_err(|_| anyhow!("watch notification channel closed"))
    }

    /// Discard queued notifications so a burst of writes decodes once.
    pub fn drain(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// What a single wake of the reload thread decided to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Published,
    KeptLast,
    Abort,
}

/// Decode the current file content and apply the decode-failure policy.
/// The caller maps Abort to process termination.
pub fn reload_once(path: &Path, slot: &ImageSlot, policy: DecodePolicy) -> ReloadOutcome {
    match decode_image(path) {
        Ok(image) => {
            info!(
                "reloaded {} ({}x{})",
                path.display(),
                image.width,
                image.height
            );
            slot.publish(image);
            ReloadOutcome::Published
        }
        Err(err) => match policy {
            DecodePolicy::Fatal => {
                error!("failed to decode {}: {err:#}", path.display());
                ReloadOutcome::Abort
            }
            DecodePolicy::KeepLast => {
                error!(
                    "failed to decode {}, keeping previous image: {err:#}",
                    path.display()
                );
                ReloadOutcome::KeptLast
            }
        },
    }
}

/// Spawn the reload thread: wait for a change, drain coalesced
/// notifications, decode the latest file content, publish, wake the
/// renderer. Runs for the rest of the process lifetime.
pub fn spawn_reload_thread(
    watcher: FileWatcher,
    path: PathBuf,
    slot: Arc<ImageSlot>,
    policy: DecodePolicy,
    ctx: egui::Context,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while watcher.wait().is_ok() {
            watcher.drain();
            match reload_once(&path, &slot, policy) {
                ReloadOutcome::Published => ctx.request_repaint(),
                ReloadOutcome::KeptLast => {}
                ReloadOutcome::Abort => std::process::exit(1),
            }
        }
    })
}
