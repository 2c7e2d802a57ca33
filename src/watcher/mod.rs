//! Watches the source file that stands in for the text area.
//!
//! Uses notify crate for cross-platform file system events. Changes are
//! debounced and compared by content hash, so writes the session makes
//! itself (loading an example) do not come back as edits.
use std::ffi::OsString;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Hash source text for change detection.
fn hash_text(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Emits the new contents of a source file after each debounced edit.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
    last_seen: Option<u64>,
}

impl SourceWatcher {
    /// Create a watcher for `path`.
    ///
    /// # Errors
    /// Returns an error if the file watcher cannot be created or the path cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths from the OS are absolute and canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
            last_seen: None,
        })
    }

    /// Record contents already known to the session, so reading them back
    /// is not reported as an edit.
    pub fn mark_seen(&mut self, contents: &str) {
        self.last_seen = Some(hash_text(contents));
    }

    /// Returns true once a debounced file change is ready.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut total = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => {
                    crate::perf::log_event(
                        "watcher.irrelevant",
                        format!("kind={:?} paths={:?}", ev.kind, ev.paths),
                    );
                }
                Err(err) => {
                    tracing::warn!(%err, "file watcher error");
                    crate::perf::log_event("watcher.error", format!("{err}"));
                }
            }
        }

        if total > 0 {
            crate::perf::log_event(
                "watcher.poll",
                format!(
                    "total={total} relevant={relevant} target={}",
                    self.target_path.display()
                ),
            );
        }
        if relevant > 0 {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    /// Poll for an edit. Returns the new contents when the file changed to
    /// something not seen before.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read after a change.
    pub fn poll_edit(&mut self) -> std::io::Result<Option<String>> {
        if !self.take_change_ready() {
            return Ok(None);
        }
        let contents = match std::fs::read_to_string(&self.target_path) {
            Ok(contents) => contents,
            // Editors that save by rename briefly remove the file.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let hash = hash_text(&contents);
        if self.last_seen == Some(hash) {
            return Ok(None);
        }
        self.last_seen = Some(hash);
        Ok(Some(contents))
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn poll_until_edit(watcher: &mut SourceWatcher) -> Option<String> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(contents) = watcher.poll_edit().expect("poll") {
                return Some(contents);
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        None
    }

    #[test]
    fn test_directory_level_event_is_relevant_for_watched_file() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("source.md");
        std::fs::write(&path, "hi").expect("write");
        let watcher = SourceWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        let event = Event {
            kind: EventKind::Any,
            paths: vec![canonical_dir],
            attrs: notify::event::EventAttributes::new(),
        };

        assert!(watcher.is_relevant(&event));
    }

    #[test]
    fn test_unrelated_file_is_not_relevant() {
        let dir = tempdir().expect("tempdir");
        let canonical_dir = dir.path().canonicalize().expect("canonicalize");
        let path = canonical_dir.join("source.md");
        std::fs::write(&path, "hi").expect("write");
        let watcher = SourceWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        let event = Event {
            kind: EventKind::Any,
            paths: vec![canonical_dir.join("sub").join("other.md")],
            attrs: notify::event::EventAttributes::new(),
        };

        assert!(!watcher.is_relevant(&event));
    }

    #[test]
    fn test_watch_root_for_relative_file_is_dot() {
        let root = watch_root_for(Path::new("scratch.adoc"));
        assert_eq!(root, PathBuf::from("."));
    }

    #[test]
    fn test_edit_is_reported_with_new_contents() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().canonicalize().expect("canonicalize").join("source.md");
        std::fs::write(&path, "# one").expect("write");
        let mut watcher = SourceWatcher::new(&path, Duration::from_millis(50)).expect("watcher");
        watcher.mark_seen("# one");

        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, "# two").expect("write");

        assert_eq!(poll_until_edit(&mut watcher), Some("# two".to_string()));
    }

    #[test]
    fn test_own_write_is_not_reported() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().canonicalize().expect("canonicalize").join("source.md");
        std::fs::write(&path, "before").expect("write");
        let mut watcher = SourceWatcher::new(&path, Duration::from_millis(50)).expect("watcher");

        std::thread::sleep(Duration::from_millis(500));
        watcher.mark_seen("example");
        std::fs::write(&path, "example").expect("write");

        let deadline = Instant::now() + Duration::from_secs(1);
        while Instant::now() < deadline {
            assert_eq!(watcher.poll_edit().expect("poll"), None);
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}
