use crate::utils::error::Result;
use async_trait::async_trait;

/// Local key-value store (a preferences file on disk, or memory in tests).
///
/// Accessed from a single thread; each `put_*` replaces one key as a whole.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&mut self, key: &str, value: &str) -> Result<()>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn put_bool(&mut self, key: &str, value: bool) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    /// `Ok(None)` when the provider knows no address for the point.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}
