pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command, Toggle};

pub use crate::adapters::{FileStore, HttpReverseGeocoder, MemoryStore, NoopGeocoder};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::book::{Notice, StationBook, StationDraft, StationView};
pub use crate::core::repository::StationRepository;
pub use crate::core::selection::{pick_location, MapSelection, SelectedLocation};
pub use crate::domain::model::{
    Recommendation, Station, ThresholdMode, Thresholds, DEFAULT_THRESHOLD_PERCENT,
    STRICT_THRESHOLD_PERCENT,
};
pub use crate::domain::services::{compute_ratio_percent, ratio_multiplier, recommendation_text};
pub use crate::utils::error::{FuelError, Result};
