//! NWS wind-chill index

/// Above this temperature (°F) the index is undefined
pub const WIND_CHILL_MAX_TEMPERATURE_F: f64 = 50.0;

/// Below this wind speed (mph) the index is undefined
pub const WIND_CHILL_MIN_WIND_MPH: f64 = 3.0;

/// Wind chill in °F for ambient `temperature_f` and `wind_mph`
///
/// Returns the ambient temperature unchanged outside the formula's
/// envelope (`temperature_f > 50` or `wind_mph < 3`).
pub fn calculate_wind_chill(temperature_f: f64, wind_mph: f64) -> f64 {
    if temperature_f > WIND_CHILL_MAX_TEMPERATURE_F || wind_mph < WIND_CHILL_MIN_WIND_MPH {
        return temperature_f;
    }
    let v = wind_mph.powf(0.16);
    35.74 + 0.6215 * temperature_f - 35.75 * v + 0.4275 * temperature_f * v
}
