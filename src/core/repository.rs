use crate::domain::model::{Station, ThresholdMode};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;

pub const KEY_STATIONS: &str = "stations_json";
pub const KEY_THRESHOLD_CHECKED: &str = "threshold_checked";

/// Most recent first. Stable, so equal timestamps keep their order.
pub fn sort_most_recent_first(stations: &mut [Station]) {
    stations.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

pub struct StationRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StationRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// 讀取全部紀錄；資料損壞時記錄警告並回傳空清單
    pub fn load_collection(&self) -> Vec<Station> {
        let Some(json) = self.store.get_string(KEY_STATIONS) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<Station>>(&json) {
            Ok(mut stations) => {
                sort_most_recent_first(&mut stations);
                tracing::debug!("Loaded {} stations", stations.len());
                stations
            }
            Err(e) => {
                tracing::warn!("⚠️ Stored stations are malformed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// 整批覆寫（單一 key）
    pub fn save_collection(&mut self, stations: &[Station]) -> Result<()> {
        let json = serde_json::to_string(stations)?;
        self.store.put_string(KEY_STATIONS, &json)?;
        tracing::debug!("Saved {} stations", stations.len());
        Ok(())
    }

    pub fn load_threshold_flag(&self) -> bool {
        self.store.get_bool(KEY_THRESHOLD_CHECKED).unwrap_or(false)
    }

    pub fn save_threshold_flag(&mut self, checked: bool) -> Result<()> {
        self.store.put_bool(KEY_THRESHOLD_CHECKED, checked)
    }

    pub fn load_threshold_mode(&self) -> ThresholdMode {
        ThresholdMode::from_flag(self.load_threshold_flag())
    }

    pub fn save_threshold_mode(&mut self, mode: ThresholdMode) -> Result<()> {
        self.save_threshold_flag(mode.as_flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    fn station_at(id: &str, timestamp: i64) -> Station {
        let mut station = Station::new(3.5, 5.0, 70.0);
        station.id = id.to_string();
        station.timestamp = timestamp;
        station
    }

    #[test]
    fn test_empty_store_loads_empty_collection() {
        let repo = StationRepository::new(MemoryStore::new());
        assert!(repo.load_collection().is_empty());
        assert!(!repo.load_threshold_flag());
        assert_eq!(repo.load_threshold_mode(), ThresholdMode::Default);
    }

    #[test]
    fn test_malformed_collection_loads_empty() {
        let mut store = MemoryStore::new();
        store.put_string(KEY_STATIONS, "[{\"id\": 12").unwrap();
        let repo = StationRepository::new(store);
        assert!(repo.load_collection().is_empty());
    }

    #[test]
    fn test_load_sorts_most_recent_first() {
        let mut repo = StationRepository::new(MemoryStore::new());
        repo.save_collection(&[
            station_at("t1", 1_000),
            station_at("t3", 3_000),
            station_at("t2", 2_000),
        ])
        .unwrap();

        let ids: Vec<String> = repo.load_collection().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_old_records_without_threshold_load_with_default() {
        let mut store = MemoryStore::new();
        store
            .put_string(
                KEY_STATIONS,
                r#"[{"id":"a","alcoholPrice":3.5,"gasPrice":5.0,"latitude":null,"longitude":null,"timestamp":5}]"#,
            )
            .unwrap();

        let repo = StationRepository::new(store);
        let stations = repo.load_collection();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].threshold_used, 70.0);
    }

    #[test]
    fn test_threshold_flag_round_trip() {
        let mut repo = StationRepository::new(MemoryStore::new());
        repo.save_threshold_mode(ThresholdMode::Strict).unwrap();
        assert!(repo.load_threshold_flag());
        repo.save_threshold_flag(false).unwrap();
        assert_eq!(repo.load_threshold_mode(), ThresholdMode::Default);
    }
}
