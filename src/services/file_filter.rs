//! Expansion of input file arguments into concrete model paths.
//!
//! An argument is either an exact path or a filter with `*`/`?` wildcards in its file
//! name. Filters with wildcards search the directory recursively, exact names only
//! look at the top level. After glob matching, candidates are filtered on extension:
//! a requested extension containing `*` accepts everything, otherwise only candidates
//! whose extension has the same length as the requested one are kept.
//!
//! ```ignore
//! use cgf_converter::services::FileFilter;
//!
//! let filter = FileFilter::new();
//! let models = filter.expand("Objects/ships/*.cgf")?;
//! ```

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern, PatternError};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum FileFilterError {
    #[error("Failed to list directory {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("Invalid file filter {filter}: {source}")]
    Pattern {
        filter: String,
        #[source]
        source: PatternError,
    },
}

/// Source of directory contents for filter expansion.
pub trait DirectoryListing {
    /// True if `path` names an existing regular file
    fn is_file(&self, path: &Utf8Path) -> bool;

    /// Regular files below `dir`, descending into subdirectories when `recursive`
    /// is set. A directory that does not exist yields an empty list.
    fn list_files(
        &self,
        dir: &Utf8Path,
        recursive: bool,
    ) -> Result<Vec<Utf8PathBuf>, FileFilterError>;
}

/// [`DirectoryListing`] backed by the real filesystem.
///
/// Entries of each directory are visited in name order so expansion is reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsListing;

impl DirectoryListing for FsListing {
    fn is_file(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }

    fn list_files(
        &self,
        dir: &Utf8Path,
        recursive: bool,
    ) -> Result<Vec<Utf8PathBuf>, FileFilterError> {
        if !dir.is_dir() {
            tracing::debug!("Filter directory does not exist: {}", dir);
            return Ok(Vec::new());
        }

        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| FileFilterError::Io {
                path: e
                    .path()
                    .and_then(Utf8Path::from_path)
                    .unwrap_or(dir)
                    .to_path_buf(),
                source: io::Error::from(e),
            })?;

            if !entry.path().is_file() {
                continue;
            }

            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => files.push(path),
                Err(path) => tracing::warn!("Skipping non UTF-8 path: {}", path.display()),
            }
        }

        Ok(files)
    }
}

/// A filter string split into the parts used for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParts {
    pub directory: Utf8PathBuf,
    pub file_name: String,
    /// Extension including the leading dot, empty when there is none
    pub extension: String,
}

impl FilterParts {
    pub fn split(filter: &str) -> Option<Self> {
        let path = Utf8Path::new(filter);
        let file_name = path.file_name()?.to_string();
        let directory = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|| Utf8PathBuf::from("."));
        let extension = extension_of(&file_name).to_string();

        Some(Self {
            directory,
            file_name,
            extension,
        })
    }

    /// Wildcards in the file name switch the search to all subdirectories
    pub fn is_recursive(&self) -> bool {
        self.file_name.contains(['*', '?'])
    }

    pub fn has_flexible_extension(&self) -> bool {
        self.extension.contains('*')
    }

    /// Extension check applied after glob matching. Compares lengths, not text.
    pub fn accepts_extension(&self, candidate_name: &str) -> bool {
        self.has_flexible_extension()
            || extension_of(candidate_name).chars().count() == self.extension.chars().count()
    }
}

/// File name glob supporting `*` (any run of characters) and `?` (one character).
///
/// Every other character is literal, `[` included. Matching ignores case on Windows
/// and is exact elsewhere.
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: Pattern,
}

impl NamePattern {
    pub fn new(glob: &str) -> Result<Self, PatternError> {
        let mut escaped = String::with_capacity(glob.len());
        let mut literal = [0u8; 4];

        for c in glob.chars() {
            match c {
                '*' | '?' => escaped.push(c),
                c => escaped.push_str(&Pattern::escape(c.encode_utf8(&mut literal))),
            }
        }

        Ok(Self {
            pattern: Pattern::new(&escaped)?,
        })
    }

    pub fn is_match(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: !cfg!(windows),
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(name, options)
    }
}

/// Resolves input file arguments against a [`DirectoryListing`].
#[derive(Debug, Clone, Default)]
pub struct FileFilter<L = FsListing> {
    listing: L,
}

impl FileFilter<FsListing> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: DirectoryListing> FileFilter<L> {
    pub fn with_listing(listing: L) -> Self {
        Self { listing }
    }

    /// Expand `filter` into absolute file paths.
    ///
    /// An existing file short-circuits to itself. Otherwise the file name is matched
    /// as a glob. Missing directories and filters without matches produce an empty
    /// list; listing failures on existing directories are returned as errors.
    pub fn expand(&self, filter: &str) -> Result<Vec<Utf8PathBuf>, FileFilterError> {
        let exact = Utf8Path::new(filter);
        if self.listing.is_file(exact) {
            return Ok(vec![absolute(exact)?]);
        }

        let Some(parts) = FilterParts::split(filter) else {
            tracing::debug!("Filter has no file name component: {}", filter);
            return Ok(Vec::new());
        };

        let pattern =
            NamePattern::new(&parts.file_name).map_err(|source| FileFilterError::Pattern {
                filter: filter.to_string(),
                source,
            })?;
        let directory = absolute(&parts.directory)?;
        let candidates = self.listing.list_files(&directory, parts.is_recursive())?;

        let matches: Vec<Utf8PathBuf> = candidates
            .into_iter()
            .filter(|candidate| {
                candidate
                    .file_name()
                    .is_some_and(|name| pattern.is_match(name) && parts.accepts_extension(name))
            })
            .collect();

        tracing::debug!(
            "Filter {} matched {} file(s) in {}",
            filter,
            matches.len(),
            directory
        );

        Ok(matches)
    }
}

/// Absolute, lexically normalized form of `path` relative to the current directory.
///
/// `.` components are dropped and `..` removes the preceding component. Symlinks are
/// not resolved and nothing beyond the current directory is read.
pub fn absolute(path: &Utf8Path) -> Result<Utf8PathBuf, FileFilterError> {
    let io_error = |source| FileFilterError::Io {
        path: path.to_path_buf(),
        source,
    };

    let absolute = if path.as_str().is_empty() || path.as_str() == "." {
        std::env::current_dir().map_err(io_error)?
    } else {
        std::path::absolute(Path::new(path.as_str())).map_err(io_error)?
    };
    let absolute = Utf8PathBuf::from_path_buf(absolute).map_err(FileFilterError::NonUtf8Path)?;

    let mut normalized = Utf8PathBuf::new();
    for component in absolute.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_str()),
        }
    }

    Ok(normalized)
}

/// Extension of a file name including the dot. A trailing dot counts as no extension.
fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) if index + 1 < name.len() => &name[index..],
        _ => "",
    }
}
