//! Storage layer for SiteState
//!
//! This crate implements the storage areas behind the two namespaces:
//! - MemoryArea: BTreeMap-based area with RwLock (transient namespace)
//! - FileArea: JSON-file area with atomic rewrite and a directory lock
//!   (persistent namespace)
//! - KeyLocks: per-key mutexes for read-modify-write sequences
//! - testing: areas that fail on purpose

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entries;
pub mod file;
pub mod locks;
pub mod memory;
pub mod testing;

pub use file::FileArea;
pub use locks::KeyLocks;
pub use memory::MemoryArea;
