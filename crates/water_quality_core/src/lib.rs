/*!
 * # Water Quality Core
 *
 * 水質モニタリング用センサー（pH / TDS / 水温）の変換ロジック
 *
 * ハードウェアへのアクセスは `AnalogInput` / `OneWireThermometer` / `DelayNs`
 * トレイト経由で注入されるため、ホスト上でテスト可能です。
 *
 * ## モジュール構成
 * - `adc`: ADCチャンネル抽象化と電圧変換
 * - `sampler`: 20回オーバーサンプリングによる平均電圧取得
 * - `ph`: pHセンサー（線形2点校正）
 * - `tds`: TDSセンサー（3次多項式校正）
 * - `temperature`: 1-Wire温度センサーのラッパー
 * - `validation`: 物理範囲チェック（オプトイン）
 * - `mock`: テスト用のハードウェアモック
 */

pub mod adc;
pub mod error;
pub mod mock;
pub mod ph;
pub mod sampler;
pub mod tds;
pub mod temperature;
pub mod validation;

pub use adc::{code_to_voltage, AdcError, AnalogInput, Attenuation, Channel};
pub use error::{Quantity, SensorError, SensorResult};
pub use ph::{CalPoint, CalibrationError, PhCalibration, PhSensor};
pub use sampler::AnalogSampler;
pub use tds::{tds_from_voltage, TdsCalibration, TdsSensor};
pub use temperature::{OneWireThermometer, TempSensor, ThermometerError};
