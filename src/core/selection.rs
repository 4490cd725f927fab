use crate::domain::ports::ReverseGeocoder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
}

impl SelectedLocation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }

    /// 有地址就顯示地址，否則顯示座標（小數 6 位）
    pub fn describe(&self) -> String {
        match &self.address {
            Some(address) => address.clone(),
            None => format!("{:.6}, {:.6}", self.latitude, self.longitude),
        }
    }
}

/// What the map picker hands back to the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapSelection {
    Selected(SelectedLocation),
    Cancelled,
}

impl MapSelection {
    pub fn into_location(self) -> Option<SelectedLocation> {
        match self {
            MapSelection::Selected(location) => Some(location),
            MapSelection::Cancelled => None,
        }
    }
}

/// Confirm action of the picker. One reverse-geocoding attempt; any failure just leaves
/// the address empty.
pub async fn pick_location<G: ReverseGeocoder + ?Sized>(
    geocoder: &G,
    point: Option<(f64, f64)>,
) -> MapSelection {
    let Some((latitude, longitude)) = point else {
        return MapSelection::Cancelled;
    };

    let address = match geocoder.reverse(latitude, longitude).await {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!("⚠️ Reverse geocoding failed, keeping coordinates only: {}", e);
            None
        }
    };

    MapSelection::Selected(SelectedLocation {
        latitude,
        longitude,
        address,
    })
}
