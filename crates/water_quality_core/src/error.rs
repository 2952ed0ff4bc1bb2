use core::fmt;

use crate::adc::AdcError;
use crate::temperature::ThermometerError;

/// 測定対象の物理量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Ph,
    Tds,
    Temperature,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Ph => write!(f, "pH"),
            Quantity::Tds => write!(f, "TDS"),
            Quantity::Temperature => write!(f, "温度"),
        }
    }
}

/// センサー読み取り時のエラー
///
/// 正常系の計算結果には影響しません。ハードウェア障害のみを通知します。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error(transparent)]
    Adc(#[from] AdcError),
    #[error(transparent)]
    Thermometer(#[from] ThermometerError),
    #[error("{sensor} は begin() の前に読み取られました")]
    NotInitialized { sensor: &'static str },
    #[error("{quantity} が物理範囲外です: {value}")]
    OutOfPhysicalRange { quantity: Quantity, value: f32 },
}

pub type SensorResult<T> = Result<T, SensorError>;
