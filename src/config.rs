use water_quality_core::{Channel, PhCalibration, TdsCalibration};

/// アプリケーション設定
///
/// この構造体はビルド時に`cfg.toml`ファイルから読み込まれた設定を保持します。
#[toml_cfg::toml_config]
pub struct Config {
    // pHプローブ（ADC1）
    #[default(4)]
    ph_adc_pin: u8,

    // TDSプローブ（ADC1）
    #[default(5)]
    tds_adc_pin: u8,

    // DS18B20（4.7kΩプルアップ）
    #[default(6)]
    temp_data_pin: u8,

    #[default(7)]
    temp_power_pin: u8,

    #[default(2.55)] // pH 7.0 の時の電圧（V）
    ph_v7: f32,

    #[default(0.18)] // 1 pH あたりの電圧（V）
    ph_slope: f32,

    #[default(1.0)]
    tds_calibration_factor: f32,

    #[default(5000)]
    measurement_interval_ms: u32,
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ph_slope の値が無効です (0以外の有限値): {0}")]
    InvalidPhSlope(f32),
    #[error("ph_v7 の値が無効です (0.0-3.3V): {0}")]
    InvalidPhV7(f32),
    #[error("tds_calibration_factor の値が無効です (正の有限値): {0}")]
    InvalidTdsCalibrationFactor(f32),
    #[error("GPIO{0} が複数のセンサーに割り当てられています")]
    DuplicatePin(u8),
    #[error("measurement_interval_ms は1以上である必要があります")]
    InvalidMeasurementInterval,
}

/// アプリケーション設定を表す構造体
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// pHプローブのADCチャンネル
    pub ph_channel: Channel,

    /// TDSプローブのADCチャンネル
    pub tds_channel: Channel,

    /// DS18B20 データピン
    pub temp_data_pin: i32,

    /// DS18B20 電源制御ピン
    pub temp_power_pin: i32,

    pub ph_calibration: PhCalibration,

    pub tds_calibration: TdsCalibration,

    /// 測定間隔（ミリ秒）
    pub measurement_interval_ms: u32,
}

impl AppConfig {
    /// 設定ファイルから設定をロードします
    pub fn load() -> Result<Self, ConfigError> {
        // toml_cfg によって生成された定数
        Self::from_config(&CONFIG)
    }

    /// 生の設定値を検証して変換します
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if !config.ph_slope.is_finite() || config.ph_slope == 0.0 {
            return Err(ConfigError::InvalidPhSlope(config.ph_slope));
        }

        if !(0.0..=3.3).contains(&config.ph_v7) {
            return Err(ConfigError::InvalidPhV7(config.ph_v7));
        }

        if !config.tds_calibration_factor.is_finite() || config.tds_calibration_factor <= 0.0 {
            return Err(ConfigError::InvalidTdsCalibrationFactor(
                config.tds_calibration_factor,
            ));
        }

        let pins = [
            config.ph_adc_pin,
            config.tds_adc_pin,
            config.temp_data_pin,
            config.temp_power_pin,
        ];
        for (i, pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }

        if config.measurement_interval_ms == 0 {
            return Err(ConfigError::InvalidMeasurementInterval);
        }

        Ok(Self {
            ph_channel: Channel::new(config.ph_adc_pin),
            tds_channel: Channel::new(config.tds_adc_pin),
            temp_data_pin: i32::from(config.temp_data_pin),
            temp_power_pin: i32::from(config.temp_power_pin),
            ph_calibration: PhCalibration::new(config.ph_v7, config.ph_slope),
            tds_calibration: TdsCalibration::new(config.tds_calibration_factor),
            measurement_interval_ms: config.measurement_interval_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            ph_adc_pin: 4,
            tds_adc_pin: 5,
            temp_data_pin: 6,
            temp_power_pin: 7,
            ph_v7: 2.55,
            ph_slope: 0.18,
            tds_calibration_factor: 1.0,
            measurement_interval_ms: 5000,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = AppConfig::from_config(&base_config()).unwrap();
        assert_eq!(config.ph_channel, Channel::new(4));
        assert_eq!(config.tds_channel, Channel::new(5));
        assert_eq!(config.temp_data_pin, 6);
        assert_eq!(config.temp_power_pin, 7);
        assert_eq!(config.ph_calibration, PhCalibration::default());
        assert_eq!(config.tds_calibration, TdsCalibration::default());
    }

    #[test]
    fn test_zero_slope_is_rejected() {
        let mut raw = base_config();
        raw.ph_slope = 0.0;
        assert_eq!(
            AppConfig::from_config(&raw),
            Err(ConfigError::InvalidPhSlope(0.0))
        );
    }

    #[test]
    fn test_negative_slope_is_accepted() {
        // 極性が逆のプローブ
        let mut raw = base_config();
        raw.ph_slope = -0.18;
        assert!(AppConfig::from_config(&raw).is_ok());
    }

    #[test]
    fn test_v7_outside_adc_range() {
        let mut raw = base_config();
        raw.ph_v7 = 3.5;
        assert_eq!(
            AppConfig::from_config(&raw),
            Err(ConfigError::InvalidPhV7(3.5))
        );
    }

    #[test]
    fn test_non_positive_calibration_factor() {
        let mut raw = base_config();
        raw.tds_calibration_factor = 0.0;
        assert!(matches!(
            AppConfig::from_config(&raw),
            Err(ConfigError::InvalidTdsCalibrationFactor(_))
        ));

        raw.tds_calibration_factor = f32::NAN;
        assert!(matches!(
            AppConfig::from_config(&raw),
            Err(ConfigError::InvalidTdsCalibrationFactor(_))
        ));
    }

    #[test]
    fn test_duplicate_pin() {
        let mut raw = base_config();
        raw.temp_power_pin = 4;
        assert_eq!(
            AppConfig::from_config(&raw),
            Err(ConfigError::DuplicatePin(4))
        );
    }

    #[test]
    fn test_zero_interval() {
        let mut raw = base_config();
        raw.measurement_interval_ms = 0;
        assert_eq!(
            AppConfig::from_config(&raw),
            Err(ConfigError::InvalidMeasurementInterval)
        );
    }
}
