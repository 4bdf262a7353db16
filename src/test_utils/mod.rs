//! Test utilities for template-digest
//!
//! Helpers for logging in tests and for laying out template trees on disk.
//!
//! # Example
//!
//! ```rust,no_run
//! use template_digest::test_utils::TemplateTree;
//!
//! let tree = TemplateTree::new().unwrap();
//! tree.write("topics/show.html.erb", "<%= render @topic %>").unwrap();
//! tree.write("topics/_topic.html.erb", "<h1>topic</h1>").unwrap();
//! assert!(tree.path().join("topics/show.html.erb").exists());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::digest::DigestLogger;
use crate::source::FileSystemSource;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. `level` wins over `RUST_LOG`; with neither,
/// logging stays off.
///
/// ```bash
/// RUST_LOG=template_digest=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// A temporary template root, removed on drop.
pub struct TemplateTree {
    dir: TempDir,
}

impl TemplateTree {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// A [`FileSystemSource`] over this tree with the `erb` handler.
    pub fn source(&self) -> FileSystemSource {
        FileSystemSource::new(self.dir.path(), vec!["erb".to_string()])
    }
}

/// What a [`RecordingLogger`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    Info(String),
    Error(String),
}

/// A [`DigestLogger`] that keeps every message.
#[derive(Debug, Default, Clone)]
pub struct RecordingLogger {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                LogLine::Info(message) => Some(message),
                LogLine::Error(_) => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                LogLine::Error(message) => Some(message),
                LogLine::Info(_) => None,
            })
            .collect()
    }

    fn push(&self, line: LogLine) {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).push(line);
    }
}

impl DigestLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(LogLine::Info(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(LogLine::Error(message.to_string()));
    }
}
