//! Persistent key-value backends.
//!
//! The snapshot store only needs atomic single-key `get`/`set`/`remove`, the same
//! contract browser local storage offers. Two implementations ship with the crate:
//!
//! - [`InMemoryBackend`] for tests, simulations and hosts that persist elsewhere.
//! - [`FileBackend`], one file per key in a directory, for native hosts.

mod file;
mod in_memory;
mod store;

pub use file::FileBackend;
pub use in_memory::InMemoryBackend;
pub use store::KeyValueBackend;
