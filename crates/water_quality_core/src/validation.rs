//! 物理範囲チェック（オプトイン）
//!
//! 読み取り関数は値を制限しないため、範囲外の値を検出したい呼び出し側が
//! 明示的に使用します。値そのものは変更しません。

use crate::error::{Quantity, SensorError, SensorResult};
use crate::temperature::DEVICE_DISCONNECTED_C;

pub const PH_MIN: f32 = 0.0;
pub const PH_MAX: f32 = 14.0;

/// DS18B20の測定範囲（℃）
pub const TEMPERATURE_MIN_C: f32 = -55.0;
pub const TEMPERATURE_MAX_C: f32 = 125.0;

fn out_of_range(quantity: Quantity, value: f32) -> SensorError {
    SensorError::OutOfPhysicalRange { quantity, value }
}

pub fn check_ph(ph: f32) -> SensorResult<f32> {
    if (PH_MIN..=PH_MAX).contains(&ph) {
        Ok(ph)
    } else {
        Err(out_of_range(Quantity::Ph, ph))
    }
}

pub fn check_tds(tds_ppm: f32) -> SensorResult<f32> {
    if tds_ppm.is_finite() && tds_ppm >= 0.0 {
        Ok(tds_ppm)
    } else {
        Err(out_of_range(Quantity::Tds, tds_ppm))
    }
}

pub fn check_temperature(celsius: f32) -> SensorResult<f32> {
    let in_range = (TEMPERATURE_MIN_C..=TEMPERATURE_MAX_C).contains(&celsius);
    if celsius == DEVICE_DISCONNECTED_C || !in_range {
        Err(out_of_range(Quantity::Temperature, celsius))
    } else {
        Ok(celsius)
    }
}
