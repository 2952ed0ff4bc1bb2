//! TDS（総溶解固形分）センサー
//! センサーメーカーの参照カーブ（3次多項式）で電圧をppmに変換します

use log::{debug, info};

use crate::adc::{code_to_voltage, AnalogInput, Attenuation, Channel, RESOLUTION_BITS};
use crate::error::{SensorError, SensorResult};

const COEFF_CUBIC: f64 = 133.42;
const COEFF_QUADRATIC: f64 = 255.86;
const COEFF_LINEAR: f64 = 857.39;

/// 校正係数のデフォルト値（補正なし）
pub const DEFAULT_CALIBRATION_FACTOR: f32 = 1.0;

/// TDS校正定数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdsCalibration {
    /// 現場校正用の倍率（単位なし）
    pub calibration_factor: f32,
}

impl Default for TdsCalibration {
    fn default() -> Self {
        Self::new(DEFAULT_CALIBRATION_FACTOR)
    }
}

impl TdsCalibration {
    pub const fn new(calibration_factor: f32) -> Self {
        Self { calibration_factor }
    }
}

/// 電圧（V）からTDS濃度（ppm）を計算
///
/// 多項式は倍精度で評価し、負の値は 0.0 に丸めます。
///
/// # Examples
/// ```
/// use water_quality_core::tds::tds_from_voltage;
///
/// assert_eq!(tds_from_voltage(0.0, 1.0), 0.0);
/// assert!(tds_from_voltage(1.0, 1.0) > 0.0);
/// ```
pub fn tds_from_voltage(voltage: f32, calibration_factor: f32) -> f32 {
    let v = f64::from(voltage);
    let tds = ((COEFF_CUBIC * v.powi(3) - COEFF_QUADRATIC * v.powi(2) + COEFF_LINEAR * v)
        * f64::from(calibration_factor)) as f32;

    if tds < 0.0 {
        0.0
    } else {
        tds
    }
}

/// TDSプローブ読み取り
///
/// pHと異なりオーバーサンプリングは行わず、1サンプルのみで計算します。
pub struct TdsSensor<A> {
    adc: A,
    channel: Channel,
    calibration: TdsCalibration,
    initialized: bool,
}

impl<A: AnalogInput> TdsSensor<A> {
    pub fn new(adc: A, channel: Channel, calibration: TdsCalibration) -> Self {
        Self {
            adc,
            channel,
            calibration,
            initialized: false,
        }
    }

    /// ADCチャンネルを初期化（読み取り前に一度だけ呼ぶ）
    pub fn begin(&mut self) -> SensorResult<()> {
        if self.initialized {
            debug!("TDSセンサー {} は初期化済みです", self.channel);
            return Ok(());
        }

        self.adc
            .configure_channel(self.channel, RESOLUTION_BITS, Attenuation::Db11)?;
        self.initialized = true;
        info!(
            "✓ TDSセンサーを初期化しました ({}, 校正係数: {:.3})",
            self.channel, self.calibration.calibration_factor
        );
        Ok(())
    }

    /// TDS濃度（ppm）を測定
    pub fn read_tds(&mut self) -> SensorResult<f32> {
        if !self.initialized {
            return Err(SensorError::NotInitialized {
                sensor: "TdsSensor",
            });
        }

        let code = self.adc.sample_raw(self.channel)?;
        let voltage = code_to_voltage(f32::from(code));
        let tds = tds_from_voltage(voltage, self.calibration.calibration_factor);
        debug!(
            "TDS測定: ADC={} 電圧={:.4}V TDS={:.1}ppm",
            code, voltage, tds
        );
        Ok(tds)
    }

    pub fn calibration(&self) -> TdsCalibration {
        self.calibration
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}
