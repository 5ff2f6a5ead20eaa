//! Shared infrastructure utilities for notesmith.
//!
//! - **`atomic_write`**: Crash-safe file persistence (temp + rename), used for
//!   both the configuration file and refined documents.

pub mod atomic_write;

pub use atomic_write::{
    AtomicWriteOptions, FileSyncPolicy, ParentDirSyncPolicy, PersistMode,
    atomic_write_with_options,
};
