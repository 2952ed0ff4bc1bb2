//! 1-Wire温度センサー（DS18B20）のラッパー
//! 変換ロジックは持たず、外部ドライバーの値をそのまま返します

use log::{debug, info};

use crate::error::{SensorError, SensorResult};

/// ドライバーが未接続デバイスに対して返す温度（℃）
pub const DEVICE_DISCONNECTED_C: f32 = -127.0;

/// 1-Wire温度センサードライバーのエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThermometerError {
    #[error("1-Wireバスエラー: {0}")]
    Bus(String),
    #[error("温度変換エラー: {0}")]
    Conversion(String),
    #[error("デバイス {0} が見つかりません")]
    NoDevice(usize),
}

/// 1-Wire温度センサードライバーのトレイト
pub trait OneWireThermometer {
    /// バスを初期化する
    fn init_bus(&mut self) -> Result<(), ThermometerError>;

    /// バス上の全デバイスに温度変換を要求する
    fn request_conversion(&mut self) -> Result<(), ThermometerError>;

    /// 指定インデックスのデバイスの温度（℃）を取得する
    fn celsius(&mut self, device_index: usize) -> Result<f32, ThermometerError>;
}

/// 水温センサー
pub struct TempSensor<T> {
    bus: T,
    initialized: bool,
}

impl<T: OneWireThermometer> TempSensor<T> {
    pub fn new(bus: T) -> Self {
        Self {
            bus,
            initialized: false,
        }
    }

    pub fn begin(&mut self) -> SensorResult<()> {
        if self.initialized {
            return Ok(());
        }
        self.bus.init_bus()?;
        self.initialized = true;
        info!("✓ 1-Wire温度センサーを初期化しました");
        Ok(())
    }

    /// 先頭デバイスの温度（℃）を測定
    ///
    /// 未接続時のドライバー値（-127℃）もそのまま返します。
    pub fn read_temperature(&mut self) -> SensorResult<f32> {
        if !self.initialized {
            return Err(SensorError::NotInitialized {
                sensor: "TempSensor",
            });
        }

        self.bus.request_conversion()?;
        let celsius = self.bus.celsius(0)?;
        debug!("🌡️ 温度測定: {:.2}°C", celsius);
        Ok(celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockThermometer;

    #[test]
    fn test_reads_first_device() {
        let bus = MockThermometer::new();
        bus.set_temperatures(&[21.5, 30.0]);
        let mut sensor = TempSensor::new(bus.clone());
        sensor.begin().unwrap();

        assert_eq!(sensor.read_temperature().unwrap(), 21.5);
        assert!(bus.is_bus_initialized());
        assert_eq!(bus.get_conversion_requests(), 1);
    }

    #[test]
    fn test_disconnected_value_passes_through() {
        let bus = MockThermometer::new();
        bus.set_temperatures(&[DEVICE_DISCONNECTED_C]);
        let mut sensor = TempSensor::new(bus);
        sensor.begin().unwrap();

        assert_eq!(sensor.read_temperature().unwrap(), -127.0);
    }

    #[test]
    fn test_no_device_on_bus() {
        let mut sensor = TempSensor::new(MockThermometer::new());
        sensor.begin().unwrap();

        assert_eq!(
            sensor.read_temperature(),
            Err(SensorError::Thermometer(ThermometerError::NoDevice(0)))
        );
    }

    #[test]
    fn test_bus_error_on_begin() {
        let bus = MockThermometer::new();
        bus.set_bus_error(true);
        let mut sensor = TempSensor::new(bus);

        assert!(matches!(
            sensor.begin(),
            Err(SensorError::Thermometer(ThermometerError::Bus(_)))
        ));
        assert!(matches!(
            sensor.read_temperature(),
            Err(SensorError::NotInitialized { .. })
        ));
    }
}
