use crate::domain::model::Recommendation;

/// `(alcohol / gas) * 100`. A zero gas price yields `+inf`, which always resolves to
/// gasoline downstream.
pub fn compute_ratio_percent(alcohol_price: f64, gas_price: f64) -> f64 {
    if gas_price == 0.0 {
        return f64::INFINITY;
    }
    (alcohol_price / gas_price) * 100.0
}

/// Ethanol wins ties.
pub fn recommendation_text(ratio_percent: f64, threshold_percent: f64) -> Recommendation {
    if ratio_percent <= threshold_percent {
        Recommendation::UseEthanol
    } else {
        Recommendation::UseGasoline
    }
}

pub fn ratio_multiplier(ratio_percent: f64) -> f64 {
    if ratio_percent.is_finite() {
        ratio_percent / 100.0
    } else {
        f64::INFINITY
    }
}
