//! ADCチャンネル抽象化
//! ハードウェア非依存のトレイトと電圧変換を提供

use core::fmt;

/// ADC基準電圧（V）
pub const REFERENCE_VOLTAGE: f64 = 3.3;

/// 12bit ADC のフルスケールコード
pub const MAX_CODE: u16 = 4095;

/// 設定するADC分解能（bit）
pub const RESOLUTION_BITS: u8 = 12;

/// アナログ入力ライン（GPIO番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(u8);

impl Channel {
    pub const fn new(gpio: u8) -> Self {
        Self(gpio)
    }

    pub const fn gpio(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// アナログフロントエンドの減衰設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attenuation {
    Db0,
    Db2_5,
    Db6,
    /// 0-3.3V 付近までを測定可能にする設定
    #[default]
    Db11,
}

/// ADCアクセス時のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdcError {
    #[error("チャンネル {0} はこのADCでは使用できません")]
    InvalidChannel(Channel),
    #[error("分解能 {0}bit はサポートされていません")]
    UnsupportedResolution(u8),
    #[error("ADC読み取りエラー ({channel}): {reason}")]
    ReadFailed { channel: Channel, reason: String },
}

/// ADCハードウェアのトレイト
///
/// 実機用（ESP-IDF）とテスト用（Mock）の実装を切り替えるための境界です。
pub trait AnalogInput {
    /// チャンネルの分解能と減衰を設定する（初期化時に一度だけ呼ばれる）
    fn configure_channel(
        &mut self,
        channel: Channel,
        resolution_bits: u8,
        attenuation: Attenuation,
    ) -> Result<(), AdcError>;

    /// 生のADCコードを1回読み取る（`0..=2^resolution_bits - 1`）
    fn sample_raw(&mut self, channel: Channel) -> Result<u16, AdcError>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn configure_channel(
        &mut self,
        channel: Channel,
        resolution_bits: u8,
        attenuation: Attenuation,
    ) -> Result<(), AdcError> {
        T::configure_channel(self, channel, resolution_bits, attenuation)
    }

    fn sample_raw(&mut self, channel: Channel) -> Result<u16, AdcError> {
        T::sample_raw(self, channel)
    }
}

/// ADCコード（平均値を含む）を電圧（V）に変換
///
/// 乗算は倍精度で行い、結果を `f32` に丸めます。
///
/// # Examples
/// ```
/// use water_quality_core::adc::code_to_voltage;
///
/// assert_eq!(code_to_voltage(0.0), 0.0);
/// assert!((code_to_voltage(4095.0) - 3.3).abs() < 1e-6);
/// ```
pub fn code_to_voltage(code: f32) -> f32 {
    (f64::from(code) * (REFERENCE_VOLTAGE / f64::from(MAX_CODE))) as f32
}
