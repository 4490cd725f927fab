use crate::utils::error::{FuelError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 解析使用者輸入的價格；只接受 `.` 作為小數點
pub fn parse_price(field_name: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let invalid = || FuelError::InvalidPrice {
        field: field_name.to_string(),
        value: text.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    // f64::from_str 也接受 "inf"/"NaN"，這些不是價格
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(FuelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FuelError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(FuelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(FuelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FuelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 跟任何值比較都是 false，要用正向條件判斷
    if !(value >= min && value <= max) {
        return Err(FuelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    validate_range("latitude", latitude, -90.0, 90.0)?;
    validate_range("longitude", longitude, -180.0, 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("ethanol", "3.50").unwrap(), 3.5);
        assert_eq!(parse_price("ethanol", "  5 ").unwrap(), 5.0);
        assert!(parse_price("ethanol", "").is_err());
        assert!(parse_price("ethanol", "abc").is_err());
        assert!(parse_price("ethanol", "3,50").is_err());
        assert!(parse_price("ethanol", "inf").is_err());
        assert!(parse_price("ethanol", "NaN").is_err());
    }

    #[test]
    fn test_parse_price_error_names_field() {
        match parse_price("gasoline", "x") {
            Err(FuelError::InvalidPrice { field, value }) => {
                assert_eq!(field, "gasoline");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("geocoder.endpoint", "https://example.com/reverse").is_ok());
        assert!(validate_url("geocoder.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("geocoder.endpoint", "").is_err());
        assert!(validate_url("geocoder.endpoint", "invalid-url").is_err());
        assert!(validate_url("geocoder.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("thresholds.default_percent", f64::NAN, 0.0, 1000.0).is_err());
        assert!(validate_range("thresholds.default_percent", f64::INFINITY, 0.0, 1000.0).is_err());
        assert!(validate_range("thresholds.default_percent", 70.0, 0.0, 1000.0).is_ok());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(-23.55, -46.63).is_ok());
        assert!(validate_coordinates(91.0, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }
}
