/// ESP-IDF ハードウェアアダプタ
pub mod adc_input;
pub mod ds18b20;

pub use adc_input::EspAdcInput;
pub use ds18b20::EspDs18b20;
