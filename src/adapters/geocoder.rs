use crate::domain::ports::ReverseGeocoder;
use crate::utils::error::{FuelError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    #[serde(default)]
    address_lines: Vec<String>,
    error: Option<String>,
}

impl ReverseResponse {
    fn into_address(self) -> Option<String> {
        let lines: Vec<String> = self
            .address_lines
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if !lines.is_empty() {
            return Some(lines.join(", "));
        }

        self.display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
    }
}

/// Nominatim 風格的反向地理編碼 (`?format=jsonv2&lat=..&lon=..`)
pub struct HttpReverseGeocoder {
    client: Client,
    endpoint: String,
}

impl HttpReverseGeocoder {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for HttpReverseGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        tracing::debug!(
            "Reverse geocoding ({}, {}) via {}",
            latitude,
            longitude,
            self.endpoint
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
            ])
            .send()
            .await?;

        tracing::debug!("Geocoder response status: {}", response.status());

        if !response.status().is_success() {
            return Err(FuelError::GeocodingError {
                message: format!("provider returned {}", response.status()),
            });
        }

        let body: ReverseResponse = response.json().await?;
        if let Some(error) = body.error {
            // 海上或無資料的座標，provider 回 200 + error 欄位
            tracing::debug!("Geocoder has no address: {}", error);
            return Ok(None);
        }

        Ok(body.into_address())
    }
}

/// 未設定 endpoint 時使用，永遠沒有地址
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopGeocoder;

#[async_trait]
impl ReverseGeocoder for NoopGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>> {
        Ok(None)
    }
}
