use std::rc::Rc;

use anyhow::anyhow;
use esp_idf_svc::hal::{adc::oneshot::AdcDriver, delay::FreeRtos, peripherals::Peripherals};
use log::{error, info, warn};

use water_quality_monitor::hardware::{EspAdcInput, EspDs18b20};
use water_quality_monitor::sensors::validation::{check_ph, check_tds, check_temperature};
use water_quality_monitor::sensors::{PhSensor, TdsSensor, TempSensor};
use water_quality_monitor::{AppConfig, VERSION};

/// アプリケーションのメインエントリーポイント
fn main() -> anyhow::Result<()> {
    // ESP-IDFの基本初期化
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    info!("水質モニター v{} を起動します", VERSION);

    // 設定ファイル読み込み
    let app_config = AppConfig::load().map_err(|e| {
        error!("設定ファイルの読み込みに失敗しました: {}", e);
        anyhow!("設定ファイルの読み込みエラー: {}", e)
    })?;

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    // pH / TDS は ADC1 を共有（GPIO4 / GPIO5 固定配線）
    let adc1 = Rc::new(AdcDriver::new(peripherals.adc1)?);
    let ph_input = EspAdcInput::new(adc1.clone(), pins.gpio4);
    let tds_input = EspAdcInput::new(adc1, pins.gpio5);
    if ph_input.channel() != app_config.ph_channel || tds_input.channel() != app_config.tds_channel {
        return Err(anyhow!(
            "cfg.toml のADCピン (pH: {}, TDS: {}) と配線 (pH: {}, TDS: {}) が一致しません",
            app_config.ph_channel,
            app_config.tds_channel,
            ph_input.channel(),
            tds_input.channel()
        ));
    }

    let mut ph_sensor = PhSensor::new(
        ph_input,
        FreeRtos,
        app_config.ph_channel,
        app_config.ph_calibration,
    );
    let mut tds_sensor = TdsSensor::new(tds_input, app_config.tds_channel, app_config.tds_calibration);
    let mut temp_sensor = TempSensor::new(EspDs18b20::new(
        app_config.temp_power_pin,
        app_config.temp_data_pin,
        peripherals.rmt.channel0,
    ));

    ph_sensor.begin()?;
    tds_sensor.begin()?;
    if let Err(e) = temp_sensor.begin() {
        // 水温が無くても pH / TDS の測定は続ける
        warn!("温度センサーなしで動作します: {}", e);
    }

    info!("=== 測定ループを開始します ({}ms間隔) ===", app_config.measurement_interval_ms);
    loop {
        match ph_sensor.read_ph() {
            Ok(ph) => {
                info!("pH: {:.2}", ph);
                if let Err(e) = check_ph(ph) {
                    warn!("pH測定警告: {}", e);
                }
            }
            Err(e) => warn!("pH読み取りエラー: {}", e),
        }

        match tds_sensor.read_tds() {
            Ok(tds) => {
                info!("🌊 TDS: {:.1}ppm", tds);
                if let Err(e) = check_tds(tds) {
                    warn!("TDS測定警告: {}", e);
                }
            }
            Err(e) => warn!("TDS読み取りエラー: {}", e),
        }

        match temp_sensor.read_temperature() {
            Ok(celsius) => {
                info!("🌡️ 水温: {:.1}°C", celsius);
                if let Err(e) = check_temperature(celsius) {
                    warn!("温度測定警告: {}", e);
                }
            }
            Err(e) => warn!("温度読み取りエラー: {}", e),
        }

        FreeRtos::delay_ms(app_config.measurement_interval_ms);
    }
}
