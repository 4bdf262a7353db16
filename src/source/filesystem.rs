//! Directory-backed template store.
//!
//! Templates live under a root directory as `<name>.<format>` or
//! `<name>.<format>.<handler>` files, e.g. `topics/show.html.erb`. Partials use an
//! underscore-prefixed leaf: the partial `topics/topic` is `topics/_topic.html.erb`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{Source, SourceProvider, candidate_names, partial_name};
use crate::core::{DigestError, TemplateRef};
use crate::utils::{normalize_path_for_storage, validate_template_name};

/// Template store reading from a directory tree.
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    root: PathBuf,
    handlers: Vec<String>,
}

impl FileSystemSource {
    /// Create a store rooted at `root`, trying each handler extension after the format.
    pub fn new(root: impl Into<PathBuf>, handlers: Vec<String>) -> Self {
        Self {
            root: root.into(),
            handlers,
        }
    }

    /// The template root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File names tried for a stored name in one format, most specific last.
    fn file_candidates(&self, stored: &str, format: &str) -> Vec<PathBuf> {
        let base = self.root.join(stored);
        let mut candidates = vec![base.with_file_name(file_name(&base, format, None))];
        for handler in &self.handlers {
            candidates.push(base.with_file_name(file_name(&base, format, Some(handler))));
        }
        candidates
    }

    /// Enumerate the templates under the root.
    ///
    /// Files are mapped back to `(name, format)` pairs: `topics/show.html.erb`
    /// becomes `topics/show` in format `html`. Partials keep their underscore in the
    /// returned name and are skipped unless `include_partials` is set. The result
    /// is sorted by cache key.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::Io`] if the directory tree cannot be walked.
    pub fn templates(&self, include_partials: bool) -> Result<Vec<TemplateRef>, DigestError> {
        let mut templates = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| DigestError::Io {
                operation: "walk template directory".to_string(),
                path: self.root.display().to_string(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let relative = normalize_path_for_storage(relative);
            let (dir, file) = relative.rsplit_once('/').unwrap_or(("", relative.as_str()));

            let mut parts = file.split('.');
            let (Some(leaf), Some(format)) = (parts.next(), parts.next()) else {
                tracing::debug!("Skipping file without a format extension: {relative}");
                continue;
            };
            if leaf.is_empty() || (leaf.starts_with('_') && !include_partials) {
                continue;
            }

            let name = if dir.is_empty() { leaf.to_string() } else { format!("{dir}/{leaf}") };
            templates.push(TemplateRef::new(name, format));
        }

        templates.sort_by_key(TemplateRef::cache_key);
        templates.dedup();
        Ok(templates)
    }
}

fn file_name(base: &Path, format: &str, handler: Option<&String>) -> String {
    let leaf = base.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    match handler {
        Some(handler) => format!("{leaf}.{format}.{handler}"),
        None => format!("{leaf}.{format}"),
    }
}

impl SourceProvider for FileSystemSource {
    fn find(
        &self,
        name: &str,
        prefixes: &[String],
        partial: bool,
        formats: &[String],
    ) -> Result<Source, DigestError> {
        validate_template_name(name)?;

        for candidate in candidate_names(name, prefixes) {
            let stored = if partial { partial_name(&candidate) } else { candidate };

            for format in formats {
                for path in self.file_candidates(&stored, format) {
                    match std::fs::read_to_string(&path) {
                        Ok(text) => {
                            tracing::trace!("Found template at {}", path.display());
                            return Ok(Source::new(normalize_path_for_storage(&path), text));
                        }
                        Err(e) if e.kind() == ErrorKind::NotFound => {}
                        // A directory named like the template file is not a template
                        Err(_) if path.is_dir() => {}
                        Err(e) => {
                            return Err(DigestError::Io {
                                operation: "read template".to_string(),
                                path: path.display().to_string(),
                                source: e,
                            });
                        }
                    }
                }
            }
        }

        Err(DigestError::not_found(name, formats.join(","), partial))
    }
}
