//! センサーパイプライン統合テスト
//!
//! Mock ADC / Mock遅延 / Mock 1-Wire を使用して、生信号から物理量までの
//! 変換フロー全体を検証します。

use water_quality_core::adc::{AdcError, Attenuation, Channel};
use water_quality_core::mock::{MockAnalogInput, MockDelay, MockThermometer};
use water_quality_core::validation::{check_ph, check_temperature};
use water_quality_core::{
    PhCalibration, PhSensor, SensorError, TdsCalibration, TdsSensor, TempSensor,
};

const PH_CHANNEL: Channel = Channel::new(4);
const TDS_CHANNEL: Channel = Channel::new(5);

fn ph_sensor(codes: &[u16]) -> (PhSensor<MockAnalogInput, MockDelay>, MockAnalogInput, MockDelay) {
    let adc = MockAnalogInput::new();
    adc.queue_codes(codes);
    let delay = MockDelay::new();
    let sensor = PhSensor::new(adc.clone(), delay.clone(), PH_CHANNEL, PhCalibration::default());
    (sensor, adc, delay)
}

#[test]
fn test_ph_end_to_end_mid_scale() {
    // 平均コード 2048 → 約1.6504V → pH 約11.998
    let (mut sensor, _, delay) = ph_sensor(&[2048; 20]);
    sensor.begin().unwrap();

    let ph = sensor.read_ph().unwrap();
    assert!((ph - 11.9978).abs() < 1e-3, "pH = {}", ph);
    assert_eq!(delay.total_ms(), 200);
}

#[test]
fn test_ph_voltage_matches_average_formula() {
    let codes: Vec<u16> = vec![
        0, 4095, 1200, 1300, 2222, 3333, 17, 900, 2500, 2501, 1024, 2048, 3071, 40, 4000, 123,
        456, 789, 1011, 1213,
    ];
    let sum: u32 = codes.iter().map(|&c| u32::from(c)).sum();
    let (mut sensor, _, _) = ph_sensor(&codes);
    sensor.begin().unwrap();

    let voltage = sensor.read_voltage().unwrap();
    let expected = (sum as f64 / 20.0) * (3.3 / 4095.0);
    assert!((f64::from(voltage) - expected).abs() < 1e-6);
}

#[test]
fn test_ph_is_seven_at_reference_voltage() {
    let cal = PhCalibration::default();
    assert_eq!(cal.ph_from_voltage(cal.v7), 7.0);
}

#[test]
fn test_ph_consecutive_reads_consume_twenty_samples_each() {
    let (mut sensor, adc, delay) = ph_sensor(&[]);
    adc.set_idle_code(3000);
    sensor.begin().unwrap();

    let first = sensor.read_ph().unwrap();
    let second = sensor.read_ph().unwrap();
    assert_eq!(first, second);
    assert_eq!(adc.get_sample_count(), 40);
    assert_eq!(delay.get_delays_ms().len(), 40);
}

#[test]
fn test_ph_out_of_range_is_reported_only_by_validation() {
    // 0V → pH 約21.2（制限されない）
    let (mut sensor, _, _) = ph_sensor(&[0; 20]);
    sensor.begin().unwrap();

    let ph = sensor.read_ph().unwrap();
    assert!(ph > 14.0);
    assert!(matches!(
        check_ph(ph),
        Err(SensorError::OutOfPhysicalRange { .. })
    ));
}

#[test]
fn test_ph_invalid_channel() {
    let adc = MockAnalogInput::new();
    adc.restrict_to(&[TDS_CHANNEL]);
    let mut sensor = PhSensor::new(adc, MockDelay::new(), PH_CHANNEL, PhCalibration::default());

    assert_eq!(
        sensor.begin(),
        Err(SensorError::Adc(AdcError::InvalidChannel(PH_CHANNEL)))
    );
}

#[test]
fn test_tds_end_to_end_reference_code() {
    let adc = MockAnalogInput::new();
    adc.queue_codes(&[1000]);
    let mut sensor = TdsSensor::new(adc.clone(), TDS_CHANNEL, TdsCalibration::default());
    sensor.begin().unwrap();

    let tds = sensor.read_tds().unwrap();
    assert!((tds - 594.60).abs() < 0.01, "TDS = {}", tds);
    assert_eq!(
        adc.get_configured(),
        vec![(TDS_CHANNEL, 12, Attenuation::Db11)]
    );
}

#[test]
fn test_tds_zero_code() {
    let adc = MockAnalogInput::new();
    adc.queue_codes(&[0]);
    let mut sensor = TdsSensor::new(adc, TDS_CHANNEL, TdsCalibration::default());
    sensor.begin().unwrap();

    assert_eq!(sensor.read_tds().unwrap(), 0.0);
}

#[test]
fn test_tds_read_error() {
    let adc = MockAnalogInput::new();
    let mut sensor = TdsSensor::new(adc.clone(), TDS_CHANNEL, TdsCalibration::default());
    sensor.begin().unwrap();
    adc.set_read_error(true);

    assert!(matches!(
        sensor.read_tds(),
        Err(SensorError::Adc(AdcError::ReadFailed { channel, .. })) if channel == TDS_CHANNEL
    ));
}

#[test]
fn test_sensors_share_nothing() {
    // pH と TDS は別々のADCインスタンスを所有する
    let ph_adc = MockAnalogInput::new();
    ph_adc.set_idle_code(2048);
    let tds_adc = MockAnalogInput::new();
    tds_adc.set_idle_code(1000);

    let mut ph = PhSensor::new(ph_adc.clone(), MockDelay::new(), PH_CHANNEL, PhCalibration::default());
    let mut tds = TdsSensor::new(tds_adc.clone(), TDS_CHANNEL, TdsCalibration::default());
    ph.begin().unwrap();
    tds.begin().unwrap();

    ph.read_ph().unwrap();
    tds.read_tds().unwrap();

    assert_eq!(ph_adc.get_sample_count(), 20);
    assert_eq!(tds_adc.get_sample_count(), 1);
}

#[test]
fn test_temperature_end_to_end() {
    let bus = MockThermometer::new();
    bus.set_temperatures(&[24.3125]);
    let mut sensor = TempSensor::new(bus);
    sensor.begin().unwrap();

    let celsius = sensor.read_temperature().unwrap();
    assert_eq!(celsius, 24.3125);
    assert_eq!(check_temperature(celsius), Ok(24.3125));
}
