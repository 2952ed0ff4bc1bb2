use esp_idf_svc::hal::{peripheral::Peripheral, rmt::RmtChannel};
use log::{error, info, warn};
use simple_ds18b20_temp_sensor::TempSensor as Ds18b20Driver;
use water_quality_core::{OneWireThermometer, ThermometerError};

/// DS18B20（RMTベース1-Wire）ドライバーのアダプタ
///
/// ドライバーは変換要求と読み取りを1回の呼び出しで行うため、
/// `request_conversion` で読み取った値を `celsius` で返します。
/// バス上のデバイスは1台のみ扱います。
pub struct EspDs18b20<R> {
    rmt_channel: Option<R>,
    driver: Option<Ds18b20Driver>,
    power_pin: i32,
    data_pin: i32,
    last_celsius: Option<f32>,
}

impl<R> EspDs18b20<R> {
    /// # 配線例
    /// ```text
    /// DS18B20 Temperature Sensor:
    /// - VCC  -> power_pin (Power control)
    /// - GND  -> GND
    /// - Data -> data_pin (with 4.7kΩ pull-up to 3.3V)
    /// ```
    pub fn new(power_pin: i32, data_pin: i32, rmt_channel: R) -> Self {
        Self {
            rmt_channel: Some(rmt_channel),
            driver: None,
            power_pin,
            data_pin,
            last_celsius: None,
        }
    }
}

impl<C, R> OneWireThermometer for EspDs18b20<R>
where
    C: RmtChannel,
    R: Peripheral<P = C> + 'static,
{
    fn init_bus(&mut self) -> Result<(), ThermometerError> {
        let rmt_channel = self
            .rmt_channel
            .take()
            .ok_or_else(|| ThermometerError::Bus("1-Wireバスは初期化済みです".to_string()))?;

        info!(
            "温度センサーを初期化中... (Power: GPIO{}, Data: GPIO{})",
            self.power_pin, self.data_pin
        );
        match Ds18b20Driver::new(self.power_pin, self.data_pin, rmt_channel) {
            Ok(driver) => {
                info!("✓ DS18B20温度センサーの初期化に成功");
                self.driver = Some(driver);
                Ok(())
            }
            Err(e) => {
                error!("DS18B20温度センサーの初期化に失敗: {:?}", e);
                Err(ThermometerError::Bus(format!("{:?}", e)))
            }
        }
    }

    fn request_conversion(&mut self) -> Result<(), ThermometerError> {
        let driver = self
            .driver
            .as_mut()
            .ok_or_else(|| ThermometerError::Bus("1-Wireバスが未初期化です".to_string()))?;

        match driver.read_temperature() {
            Ok(celsius) => {
                self.last_celsius = Some(celsius);
                Ok(())
            }
            Err(e) => {
                warn!("温度センサー読み取りエラー: {:?}", e);
                self.last_celsius = None;
                Err(ThermometerError::Conversion(format!("{:?}", e)))
            }
        }
    }

    fn celsius(&mut self, device_index: usize) -> Result<f32, ThermometerError> {
        match (device_index, self.last_celsius) {
            (0, Some(celsius)) => Ok(celsius),
            _ => Err(ThermometerError::NoDevice(device_index)),
        }
    }
}
