use thiserror::Error;

#[derive(Error, Debug)]
pub enum FuelError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Geocoding request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid {field} price: '{value}'")]
    InvalidPrice { field: String, value: String },

    #[error("Station not found: {id}")]
    StationNotFound { id: String },

    #[error("Geocoding error: {message}")]
    GeocodingError { message: String },
}

impl FuelError {
    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            FuelError::InvalidPrice { .. } => "Invalid values: enter numeric prices".to_string(),
            FuelError::StationNotFound { id } => format!("No saved station with id {}", id),
            FuelError::IoError(_) => "Could not access the data directory".to_string(),
            FuelError::SerializationError(_) => "Stored data could not be encoded".to_string(),
            FuelError::ApiError(_) | FuelError::GeocodingError { .. } => {
                "Address lookup is unavailable".to_string()
            }
            FuelError::ConfigError { .. }
            | FuelError::ConfigValidationError { .. }
            | FuelError::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
        }
    }

    /// 是否只是輸入問題（不需要中止程式）
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            FuelError::InvalidPrice { .. } | FuelError::StationNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FuelError>;
