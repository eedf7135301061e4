//! File lookup across ordered search roots.
//!
//! Template resolution never touches the filesystem directly; it goes
//! through the [`FileLookup`] trait, which answers two questions:
//!
//! - "does this relative path exist as a file anywhere?" — first matching
//!   root wins ([`FileLookup::find_file`])
//! - "which roots contain this relative directory?" — every matching root
//!   contributes ([`FileLookup::find_directories`])
//!
//! [`SearchPaths`] is the shipped implementation: an ordered list of root
//! directories layered over each other, the way an application, its plugins,
//! and its themes each ship their own template tree. Roots are allowed to be
//! absent (an overlay root without templates is normal); they simply never
//! match.
//!
//! File content is read on demand through [`ResolvedFile::read`], so edits
//! to a template are picked up on the next operation without any cache
//! invalidation step.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::TemplateError;

/// Handle to a template source file produced by a lookup.
///
/// The handle only stores the path; [`read`](Self::read) and
/// [`modified`](Self::modified) hit the filesystem on each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    absolute_path: PathBuf,
}

impl ResolvedFile {
    /// Creates a handle for an absolute path.
    pub fn new(absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
        }
    }

    /// The absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.absolute_path
    }

    /// Reads the current content of the file.
    pub fn read(&self) -> Result<String, TemplateError> {
        std::fs::read_to_string(&self.absolute_path).map_err(|source| TemplateError::Io {
            path: self.absolute_path.clone(),
            source,
        })
    }

    /// The file's last modification time.
    pub fn modified(&self) -> Result<SystemTime, TemplateError> {
        let metadata =
            std::fs::metadata(&self.absolute_path).map_err(|source| TemplateError::Io {
                path: self.absolute_path.clone(),
                source,
            })?;
        metadata.modified().map_err(|source| TemplateError::Io {
            path: self.absolute_path.clone(),
            source,
        })
    }
}

/// A directory found by [`FileLookup::find_directories`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryHandle {
    path: PathBuf,
}

impl DirectoryHandle {
    /// Creates a handle for an absolute directory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The absolute path of the directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists the direct entries of the directory (not recursive).
    pub fn entries(&self) -> Result<Vec<FileEntry>, TemplateError> {
        let read = std::fs::read_dir(&self.path).map_err(|source| TemplateError::Io {
            path: self.path.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read {
            let entry = entry.map_err(|source| TemplateError::Io {
                path: self.path.clone(),
                source,
            })?;
            let path = entry.path();
            let is_dir = path.is_dir();
            entries.push(FileEntry { path, is_dir });
        }
        Ok(entries)
    }
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    is_dir: bool,
}

impl FileEntry {
    /// The absolute path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.is_dir
    }

    /// The entry's extension, without the dot.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|ext| ext.to_str())
    }

    /// The entry's file name.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Resolves relative paths against a configured set of search roots.
///
/// Implementations must be safe to share across operations; all state is
/// configuration, never per-request.
pub trait FileLookup: Send + Sync {
    /// Resolves `relative` to a file, or `None` when no root contains it.
    ///
    /// Roots are consulted in configuration order; the first hit wins.
    fn find_file(&self, relative: &str) -> Option<ResolvedFile>;

    /// Every root that contains `relative` as a directory, in
    /// configuration order. Empty when none do.
    fn find_directories(&self, relative: &str) -> Vec<DirectoryHandle>;
}

/// Ordered filesystem search roots.
///
/// ```rust,ignore
/// let lookup = SearchPaths::new(["./app/views", "./vendor/views"]);
/// // app templates shadow vendor templates with the same relative path
/// let file = lookup.find_file("pages/home.tpl");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchPaths {
    roots: Vec<PathBuf>,
}

impl SearchPaths {
    /// Creates a lookup over `roots`, earliest root highest priority.
    ///
    /// Roots are not validated; a root that does not exist never matches.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a root with the lowest priority.
    pub fn add_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    /// The configured roots, in priority order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl FileLookup for SearchPaths {
    fn find_file(&self, relative: &str) -> Option<ResolvedFile> {
        for root in &self.roots {
            let candidate = root.join(relative);
            if candidate.is_file() {
                return Some(ResolvedFile::new(candidate));
            }
        }
        None
    }

    fn find_directories(&self, relative: &str) -> Vec<DirectoryHandle> {
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .filter(|path| path.is_dir())
            .map(DirectoryHandle::new)
            .collect()
    }
}
