use crate::core::repository::{sort_most_recent_first, StationRepository};
use crate::core::selection::{MapSelection, SelectedLocation};
use crate::domain::model::{Recommendation, Station, ThresholdMode, Thresholds};
use crate::domain::ports::KeyValueStore;
use crate::domain::services::ratio_multiplier;
use crate::utils::error::{FuelError, Result};
use crate::utils::validation::parse_price;
use chrono::{Local, TimeZone};

/// 表單上的原始輸入（尚未解析）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationDraft {
    pub name: String,
    pub alcohol_text: String,
    pub gas_text: String,
}

impl StationDraft {
    pub fn new(name: &str, alcohol_text: &str, gas_text: &str) -> Self {
        Self {
            name: name.to_string(),
            alcohol_text: alcohol_text.to_string(),
            gas_text: gas_text.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved { name: Option<String> },
    Removed { name: Option<String> },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Saved { name } => format!("Saved comparison: {}", display_name(name)),
            Notice::Removed { name } => format!("Removed: {}", display_name(name)),
        }
    }
}

fn display_name(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("Unnamed station")
}

/// One row of the history list, everything precomputed for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StationView {
    pub id: String,
    pub name: String,
    pub alcohol_price: f64,
    pub gas_price: f64,
    pub ratio_percent: f64,
    pub multiplier: f64,
    pub threshold_used: i64,
    pub recommendation: Recommendation,
    pub date: Option<String>,
    pub address: Option<String>,
}

impl StationView {
    pub fn from_station(station: &Station) -> Self {
        let ratio_percent = station.ratio_percent();
        Self {
            id: station.id.clone(),
            name: display_name(&station.name).to_string(),
            alcohol_price: station.alcohol_price,
            gas_price: station.gas_price,
            ratio_percent,
            multiplier: ratio_multiplier(ratio_percent),
            threshold_used: station.threshold_used as i64,
            recommendation: station.recommendation(),
            date: format_timestamp(station.timestamp),
            address: station.address.clone(),
        }
    }
}

fn format_timestamp(millis: i64) -> Option<String> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Form + history state for one session, backed by a repository.
///
/// The collection is loaded once at construction and written back in full after every
/// add or delete.
pub struct StationBook<S: KeyValueStore> {
    repository: StationRepository<S>,
    stations: Vec<Station>,
    mode: ThresholdMode,
    thresholds: Thresholds,
    selection: Option<SelectedLocation>,
}

impl<S: KeyValueStore> StationBook<S> {
    pub fn open(store: S) -> Self {
        Self::with_thresholds(store, Thresholds::default())
    }

    pub fn with_thresholds(store: S, thresholds: Thresholds) -> Self {
        let repository = StationRepository::new(store);
        let stations = repository.load_collection();
        let mode = repository.load_threshold_mode();

        tracing::debug!(
            "Opened station book: {} stations, mode {:?}",
            stations.len(),
            mode
        );

        Self {
            repository,
            stations,
            mode,
            thresholds,
            selection: None,
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn views(&self) -> Vec<StationView> {
        self.stations.iter().map(StationView::from_station).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn threshold_mode(&self) -> ThresholdMode {
        self.mode
    }

    pub fn threshold_percent(&self) -> f64 {
        self.thresholds.percent_for(self.mode)
    }

    /// 只影響之後新增的紀錄
    pub fn set_strict_threshold(&mut self, strict: bool) -> Result<()> {
        self.mode = ThresholdMode::from_flag(strict);
        self.repository.save_threshold_mode(self.mode)?;
        tracing::info!("Threshold set to {}%", self.threshold_percent());
        Ok(())
    }

    pub fn selection(&self) -> Option<&SelectedLocation> {
        self.selection.as_ref()
    }

    /// Cancelled keeps whatever was selected before.
    pub fn apply_selection(&mut self, selection: MapSelection) {
        if let MapSelection::Selected(location) = selection {
            tracing::debug!("Location selected: {}", location.describe());
            self.selection = Some(location);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// 解析表單並新增一筆紀錄；價格不是數字時不建立任何資料
    pub fn save(&mut self, draft: StationDraft) -> Result<Notice> {
        let alcohol_price = parse_price("ethanol", &draft.alcohol_text)?;
        let gas_price = parse_price("gasoline", &draft.gas_text)?;

        let (latitude, longitude, address) = match self.selection.clone() {
            Some(location) => (
                Some(location.latitude),
                Some(location.longitude),
                location.address,
            ),
            None => (None, None, None),
        };

        let station = Station::new(alcohol_price, gas_price, self.threshold_percent())
            .with_name(Some(draft.name))
            .with_location(latitude, longitude, address);

        tracing::info!(
            "Saving station {} (ratio {:.2}%, threshold {}%)",
            station.id,
            station.ratio_percent(),
            station.threshold_used
        );

        let name = station.name.clone();
        let mut updated = self.stations.clone();
        updated.push(station);
        sort_most_recent_first(&mut updated);
        self.repository.save_collection(&updated)?;

        self.stations = updated;
        self.selection = None;
        Ok(Notice::Saved { name })
    }

    /// Load a station back into the form and drop the original. Saving the draft again
    /// creates a new record with a new id, timestamp and the current threshold.
    pub fn edit(&mut self, id: &str) -> Result<StationDraft> {
        let station = self
            .find(id)
            .cloned()
            .ok_or_else(|| FuelError::StationNotFound { id: id.to_string() })?;

        self.selection = match (station.latitude, station.longitude) {
            (Some(latitude), Some(longitude)) => Some(SelectedLocation {
                latitude,
                longitude,
                address: station.address.clone(),
            }),
            _ => None,
        };

        self.remove(id)?;

        Ok(StationDraft {
            name: station.name.unwrap_or_default(),
            alcohol_text: station.alcohol_price.to_string(),
            gas_text: station.gas_price.to_string(),
        })
    }

    /// `Ok(None)` when nothing matched; the store is left untouched in that case.
    pub fn delete(&mut self, id: &str) -> Result<Option<Notice>> {
        let name = match self.find(id) {
            Some(station) => station.name.clone(),
            None => return Ok(None),
        };

        self.remove(id)?;
        Ok(Some(Notice::Removed { name }))
    }

    fn remove(&mut self, id: &str) -> Result<()> {
        let Some(index) = self.stations.iter().position(|s| s.id == id) else {
            return Ok(());
        };

        let mut updated = self.stations.clone();
        updated.remove(index);
        self.repository.save_collection(&updated)?;
        self.stations = updated;

        tracing::info!("Removed station {}", id);
        Ok(())
    }

    pub fn into_store(self) -> S {
        self.repository.into_store()
    }
}
