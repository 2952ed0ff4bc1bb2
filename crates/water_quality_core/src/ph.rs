//! pHセンサー
//! 中性点（pH 7）を基準とした線形校正で電圧をpHに変換します

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::adc::{AnalogInput, Channel};
use crate::error::SensorResult;
use crate::sampler::AnalogSampler;

/// pH 7.0 の時のプローブ電圧（V）
pub const DEFAULT_V7: f32 = 2.55;

/// 1 pH あたりの電圧変化（V）
pub const DEFAULT_SLOPE: f32 = 0.18;

const NEUTRAL_PH: f64 = 7.0;

/// 校正点（緩衝液での測定値）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalPoint {
    /// 測定電圧（V）
    pub voltage: f32,
    /// 緩衝液のpH
    pub ph: f32,
}

impl CalPoint {
    pub fn new(voltage: f32, ph: f32) -> Self {
        Self { voltage, ph }
    }
}

/// 校正値の計算エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalibrationError {
    #[error("2つの校正点の電圧が同じです: {0}V")]
    CoincidentVoltages(f32),
    #[error("2つの校正点のpHが同じです: {0}")]
    CoincidentPh(f32),
    #[error("校正点に無効な値が含まれています")]
    NonFinite,
}

/// pH校正定数
///
/// 構築時に固定され、実行中に変更されることはありません。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhCalibration {
    /// pH 7.0 の時の電圧（V）
    pub v7: f32,
    /// 1 pH あたりの電圧（V）。電圧が高いほどpHは低くなる
    pub slope: f32,
}

impl Default for PhCalibration {
    fn default() -> Self {
        Self::new(DEFAULT_V7, DEFAULT_SLOPE)
    }
}

impl PhCalibration {
    pub const fn new(v7: f32, slope: f32) -> Self {
        Self { v7, slope }
    }

    /// 2つの緩衝液での測定値から校正定数を求める
    ///
    /// # Examples
    /// ```
    /// use water_quality_core::ph::{CalPoint, PhCalibration};
    ///
    /// let cal = PhCalibration::from_two_points(
    ///     CalPoint::new(2.55, 7.0),
    ///     CalPoint::new(3.09, 4.0),
    /// ).unwrap();
    /// assert!((cal.v7 - 2.55).abs() < 1e-5);
    /// assert!((cal.slope - 0.18).abs() < 1e-5);
    /// ```
    pub fn from_two_points(a: CalPoint, b: CalPoint) -> Result<Self, CalibrationError> {
        let values = [a.voltage, a.ph, b.voltage, b.ph];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CalibrationError::NonFinite);
        }
        if a.voltage == b.voltage {
            return Err(CalibrationError::CoincidentVoltages(a.voltage));
        }
        if a.ph == b.ph {
            return Err(CalibrationError::CoincidentPh(a.ph));
        }

        // pH = 7 + (v7 - V) / slope  =>  V = v7 - (pH - 7) * slope
        let slope = (a.voltage - b.voltage) / (b.ph - a.ph);
        let v7 = a.voltage + (a.ph - NEUTRAL_PH as f32) * slope;
        Ok(Self { v7, slope })
    }

    /// 電圧（V）からpHを計算
    ///
    /// 0-14 の範囲への制限は行いません。`slope` が 0 の場合は無限大になります。
    pub fn ph_from_voltage(&self, voltage: f32) -> f32 {
        (NEUTRAL_PH + f64::from((self.v7 - voltage) / self.slope)) as f32
    }
}

/// pHプローブ読み取り
pub struct PhSensor<A, D> {
    sampler: AnalogSampler<A, D>,
    calibration: PhCalibration,
}

impl<A: AnalogInput, D: DelayNs> PhSensor<A, D> {
    pub fn new(adc: A, delay: D, channel: Channel, calibration: PhCalibration) -> Self {
        Self {
            sampler: AnalogSampler::new(adc, delay, channel),
            calibration,
        }
    }

    /// ADCチャンネルを初期化（読み取り前に一度だけ呼ぶ）
    pub fn begin(&mut self) -> SensorResult<()> {
        self.sampler.begin()
    }

    /// 平均プローブ電圧（V）を取得。校正作業用
    pub fn read_voltage(&mut self) -> SensorResult<f32> {
        self.sampler.read_voltage()
    }

    /// pHを測定（約200msブロック）
    pub fn read_ph(&mut self) -> SensorResult<f32> {
        let voltage = self.sampler.read_voltage()?;
        let ph = self.calibration.ph_from_voltage(voltage);
        debug!("pH測定: 電圧={:.4}V pH={:.3}", voltage, ph);
        Ok(ph)
    }

    pub fn calibration(&self) -> PhCalibration {
        self.calibration
    }

    pub fn channel(&self) -> Channel {
        self.sampler.channel()
    }
}
