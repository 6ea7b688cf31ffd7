//! Services used while resolving the command line.
//!
//! - [`FileFilter`]: expands an input argument (exact path or `*`/`?` filter) into
//!   absolute model paths. Directory contents come from a [`DirectoryListing`], which
//!   is [`FsListing`] in production and an in-memory listing in tests.

pub mod file_filter;

pub use file_filter::{DirectoryListing, FileFilter, FileFilterError, FilterParts, FsListing, NamePattern};
