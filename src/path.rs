use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use canonical_path::CanonicalPathBuf;
use regex::Regex;

lazy_static! {
    static ref REMOTE_PREFIX: Regex = Regex::new(r"^https?://").unwrap();
    static ref EXTENSION: Regex = Regex::new(r"\.([A-Za-z0-9_\-]+)$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Local,
    Remote,
}

/// A resource is either a local file or something fetched over HTTP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourcePath {
    Local(PathBuf),
    Remote(String),
}

impl ResourcePath {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourcePath::Local(_) => ResourceKind::Local,
            ResourcePath::Remote(_) => ResourceKind::Remote,
        }
    }
}

impl From<&str> for ResourcePath {
    fn from(raw: &str) -> Self {
        match classify(raw) {
            ResourceKind::Remote => ResourcePath::Remote(raw.to_owned()),
            ResourceKind::Local => ResourcePath::Local(PathBuf::from(raw)),
        }
    }
}

impl From<PathBuf> for ResourcePath {
    fn from(path: PathBuf) -> Self {
        ResourcePath::Local(path)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourcePath::Local(path) => write!(f, "{}", path.display()),
            ResourcePath::Remote(url) => f.write_str(url),
        }
    }
}

pub fn classify(path: &str) -> ResourceKind {
    if REMOTE_PREFIX.is_match(path) {
        ResourceKind::Remote
    } else {
        ResourceKind::Local
    }
}

/// Find `name` next to `anchor` or in one of its ancestor directories.
///
/// The search starts in the directory holding `anchor` and moves one level
/// up until a candidate exists or the root has been checked. Names with a
/// leading separator are treated as relative to whichever ancestor turns
/// out to be the document root. Remote names are returned untouched.
pub fn locate<P: AsRef<Path>>(anchor: P, name: &str) -> Option<ResourcePath> {
    if classify(name) == ResourceKind::Remote {
        return Some(ResourcePath::Remote(name.to_owned()));
    }

    let relative = strip_root(name);
    let mut current = non_empty_parent(anchor.as_ref());
    while let Some(dir) = current {
        let candidate = dir.join(relative);
        if candidate.exists() {
            match CanonicalPathBuf::canonicalize(&candidate) {
                Ok(found) => {
                    log::debug!(
                        "located {} at {}",
                        name,
                        found.as_path().display()
                    );
                    return Some(ResourcePath::Local(found.into_path_buf()));
                }
                Err(e) => {
                    log::debug!(
                        "skipping {}: {}",
                        candidate.display(),
                        e
                    );
                }
            }
        }
        current = non_empty_parent(dir);
    }

    log::debug!(
        "{} not found above {}",
        name,
        anchor.as_ref().display()
    );
    None
}

/// Resolve `name` against `parent`, or against its directory when `parent`
/// is a file. Returns `None` when `parent` does not exist.
pub fn resolve_relative<P: AsRef<Path>>(parent: P, name: &str) -> Option<PathBuf> {
    let parent = parent.as_ref();
    let metadata = fs::metadata(parent).ok()?;
    let base = if metadata.is_file() {
        non_empty_parent(parent).unwrap_or_else(|| Path::new("."))
    } else {
        parent
    };

    let base = CanonicalPathBuf::canonicalize(base).ok()?;
    let joined = base.as_path().join(strip_root(name));
    match CanonicalPathBuf::canonicalize(&joined) {
        Ok(resolved) => Some(resolved.into_path_buf()),
        Err(_) => Some(normalize_lexically(&joined)),
    }
}

/// Lower-cased trailing extension, or an empty string.
pub fn extension(path: &str) -> String {
    EXTENSION
        .captures(path)
        .and_then(|captures| captures.get(1))
        .map(|ext| ext.as_str().to_lowercase())
        .unwrap_or_default()
}

fn strip_root(name: &str) -> &str {
    name.trim_start_matches(std::path::is_separator)
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Fold `.` and `..` without touching the file system. Only used for
/// targets that do not exist yet, so symlinks cannot be resolved anyway.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
