// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for live re-scoring.
//!
//! Watches a source file and re-derives the composition from the complete
//! current text on every change. Rapid consecutive edits are debounced;
//! each rebuild supersedes the previous one (last-write-wins), so there is
//! nothing to cancel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::debug;

use crate::analysis::Composition;

/// Events emitted by the score watcher
#[derive(Debug, Clone)]
pub enum ScoreEvent {
    /// The source changed and a fresh composition was derived
    Rebuilt(Box<Composition>),
    /// The source changed but could not be read
    Error(String),
    /// The watched file was deleted
    FileDeleted(PathBuf),
}

/// Rebuild a composition from the file at `path`
pub fn rebuild_from_path(path: &Path) -> Result<Composition> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read source file {:?}: {}", path, e))?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    Ok(Composition::build(&text, filename))
}

/// Source file watcher with debouncing
pub struct ScoreWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<ScoreEvent>,
    watched_path: PathBuf,
}

impl ScoreWatcher {
    /// Create a watcher for a single source file.
    ///
    /// Modifications are debounced and coalesced; create events are
    /// treated as modifications because editors commonly save by
    /// replacing the file.
    ///
    /// # Arguments
    /// * `path` - Source file to watch
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx): (Sender<ScoreEvent>, Receiver<ScoreEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        // Watch the containing directory so file-replacing saves are seen
        let watch_root = watched_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| watched_path.clone());

        watcher
            .watch(&watch_root, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watch_root, e))?;

        let source_path = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let mut pending = false;

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => {
                        if !event.paths.iter().any(|p| p.ends_with(
                            source_path.file_name().unwrap_or_default(),
                        )) {
                            continue;
                        }
                        match event.kind {
                            EventKind::Modify(_) | EventKind::Create(_) => {
                                pending = true;
                                last_event_time = Some(Instant::now());
                            }
                            EventKind::Remove(_) => {
                                pending = false;
                                last_event_time = None;
                                let _ =
                                    event_tx.send(ScoreEvent::FileDeleted(source_path.clone()));
                            }
                            _ => {}
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if let Some(last_time) = last_event_time {
                            if pending && last_time.elapsed() >= debounce_duration {
                                pending = false;
                                last_event_time = None;
                                debug!(path = ?source_path, "source changed, rebuilding");
                                match rebuild_from_path(&source_path) {
                                    Ok(composition) => {
                                        let _ = event_tx
                                            .send(ScoreEvent::Rebuilt(Box::new(composition)));
                                    }
                                    Err(e) => {
                                        let _ = event_tx.send(ScoreEvent::Error(e.to_string()));
                                    }
                                }
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped, exit thread
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next score event (non-blocking)
    pub fn try_recv(&self) -> Option<ScoreEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending score events
    pub fn recv_all(&self) -> Vec<ScoreEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Block until the next score event is received
    pub fn recv(&self) -> Option<ScoreEvent> {
        self.event_receiver.recv().ok()
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_rebuild_from_path() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("demo.py");
        fs::write(&file_path, "def run():\n    return 1\n").unwrap();

        let composition = rebuild_from_path(&file_path).unwrap();
        assert_eq!(composition.len(), 2);
        assert_eq!(composition.key_signature, "G");
    }

    #[test]
    fn test_rebuild_from_missing_path_errors() {
        let dir = tempdir().unwrap();
        let result = rebuild_from_path(&dir.path().join("gone.js"));
        assert!(result.is_err());
    }

    #[test]
    fn test_watcher_creation() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("watched.js");
        fs::write(&file_path, "let x = 1;\n").unwrap();

        let watcher = ScoreWatcher::new(&file_path, Some(100));
        assert!(watcher.is_ok());
        assert_eq!(watcher.unwrap().watched_path(), file_path.as_path());
    }

    #[test]
    fn test_watcher_rebuilds_on_change() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("change.js");
        fs::write(&file_path, "let x = 1;\n").unwrap();

        let watcher = ScoreWatcher::new(&file_path, Some(100)).unwrap();

        std::thread::sleep(Duration::from_millis(50));

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&file_path)
            .unwrap();
        file.write_all(b"let x = 1;\nlet y = 2;\n").unwrap();
        file.flush().unwrap();
        drop(file);

        // Wait for debounce + processing
        std::thread::sleep(Duration::from_millis(400));

        let events = watcher.recv_all();
        let rebuilt = events.iter().find(|e| matches!(e, ScoreEvent::Rebuilt(_)));

        if let Some(ScoreEvent::Rebuilt(composition)) = rebuilt {
            assert_eq!(composition.len(), 2);
        }
        // Note: The event may not always fire in CI environments due to timing
        // So we don't assert that we definitely got the event
    }
}
