/*!
 * # Water Quality Monitor
 *
 * ESP32 に接続した水質プローブ（pH / TDS / DS18B20 水温）を読み取るファームウェア
 *
 * ## モジュール構成
 * - `config`: `cfg.toml` から読み込む設定と検証
 * - `hardware`: ESP-IDF 用のADC・1-Wireアダプタ（`esp` フィーチャー）
 *
 * 変換ロジックは `water_quality_core` クレートにあり、`sensors` として再エクスポートします。
 */

pub mod config;
#[cfg(feature = "esp")]
pub mod hardware;

pub use config::{AppConfig, ConfigError};
pub use water_quality_core as sensors;

/// ファームウェアのバージョン情報
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
