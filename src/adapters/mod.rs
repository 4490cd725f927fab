// Adapters layer: concrete implementations of the domain ports.

pub mod geocoder;
pub mod storage;

pub use geocoder::{HttpReverseGeocoder, NoopGeocoder};
pub use storage::{FileStore, MemoryStore};
