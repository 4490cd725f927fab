pub mod book;
pub mod repository;
pub mod selection;

pub use crate::domain::model::{Recommendation, Station, ThresholdMode, Thresholds};
pub use crate::domain::ports::{KeyValueStore, ReverseGeocoder};
pub use crate::utils::error::Result;
