//! テスト用のハードウェアモック
//!
//! 実機を使わずにADC・遅延・1-Wire温度センサーをシミュレートします。
//! クローンは状態を共有するため、センサーに所有権を渡した後も検証できます。

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;

use crate::adc::{AdcError, AnalogInput, Attenuation, Channel};
use crate::temperature::{OneWireThermometer, ThermometerError};

/// ADCのモック実装
#[derive(Debug, Clone, Default)]
pub struct MockAnalogInput {
    /// 読み取り用のADCコードキュー（先頭から取り出される）
    pub code_queue: Arc<Mutex<VecDeque<u16>>>,
    /// キューが空の時に返すコード
    pub idle_code: Arc<Mutex<u16>>,
    /// configure_channel の呼び出し記録
    pub configured: Arc<Mutex<Vec<(Channel, u8, Attenuation)>>>,
    /// sample_raw が成功した回数
    pub sample_count: Arc<Mutex<usize>>,
    /// 使用可能なチャンネル（None の場合は全て許可）
    pub allowed_channels: Arc<Mutex<Option<Vec<Channel>>>>,
    pub simulate_read_error: Arc<Mutex<bool>>,
}

impl MockAnalogInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: 読み取り用コードをキューに追加
    pub fn queue_codes(&self, codes: &[u16]) {
        self.code_queue.lock().unwrap().extend(codes.iter().copied());
    }

    /// テスト用: キューが空の時に返すコードを設定
    pub fn set_idle_code(&self, code: u16) {
        *self.idle_code.lock().unwrap() = code;
    }

    /// テスト用: 指定したチャンネル以外を拒否する
    pub fn restrict_to(&self, channels: &[Channel]) {
        *self.allowed_channels.lock().unwrap() = Some(channels.to_vec());
    }

    /// テスト用: 読み取りエラーをシミュレート
    pub fn set_read_error(&self, enable: bool) {
        *self.simulate_read_error.lock().unwrap() = enable;
    }

    pub fn get_configured(&self) -> Vec<(Channel, u8, Attenuation)> {
        self.configured.lock().unwrap().clone()
    }

    pub fn get_sample_count(&self) -> usize {
        *self.sample_count.lock().unwrap()
    }

    fn check_channel(&self, channel: Channel) -> Result<(), AdcError> {
        match self.allowed_channels.lock().unwrap().as_ref() {
            Some(allowed) if !allowed.contains(&channel) => Err(AdcError::InvalidChannel(channel)),
            _ => Ok(()),
        }
    }
}

impl AnalogInput for MockAnalogInput {
    fn configure_channel(
        &mut self,
        channel: Channel,
        resolution_bits: u8,
        attenuation: Attenuation,
    ) -> Result<(), AdcError> {
        self.check_channel(channel)?;
        self.configured
            .lock()
            .unwrap()
            .push((channel, resolution_bits, attenuation));
        Ok(())
    }

    fn sample_raw(&mut self, channel: Channel) -> Result<u16, AdcError> {
        self.check_channel(channel)?;
        if *self.simulate_read_error.lock().unwrap() {
            return Err(AdcError::ReadFailed {
                channel,
                reason: "Simulated read error".to_string(),
            });
        }

        let code = self
            .code_queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(*self.idle_code.lock().unwrap());
        *self.sample_count.lock().unwrap() += 1;
        Ok(code)
    }
}

/// 遅延のモック実装（実際には待たずに記録のみ行う）
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    pub delays_ms: Arc<Mutex<Vec<u32>>>,
    pub total_ns: Arc<Mutex<u64>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: delay_ms で要求された待ち時間の一覧
    pub fn get_delays_ms(&self) -> Vec<u32> {
        self.delays_ms.lock().unwrap().clone()
    }

    /// テスト用: 要求された待ち時間の合計（ミリ秒）
    pub fn total_ms(&self) -> u64 {
        *self.total_ns.lock().unwrap() / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.lock().unwrap() += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.lock().unwrap().push(ms);
        *self.total_ns.lock().unwrap() += u64::from(ms) * 1_000_000;
    }
}

/// 1-Wire温度センサーのモック実装
#[derive(Debug, Clone, Default)]
pub struct MockThermometer {
    /// デバイスインデックス順の温度（℃）
    pub temperatures: Arc<Mutex<Vec<f32>>>,
    pub bus_initialized: Arc<Mutex<bool>>,
    pub conversion_requests: Arc<Mutex<usize>>,
    pub simulate_bus_error: Arc<Mutex<bool>>,
}

impl MockThermometer {
    pub fn new() -> Self {
        Self::default()
    }

    /// テスト用: バス上のデバイスの温度を設定
    pub fn set_temperatures(&self, temperatures: &[f32]) {
        *self.temperatures.lock().unwrap() = temperatures.to_vec();
    }

    /// テスト用: バスエラーをシミュレート
    pub fn set_bus_error(&self, enable: bool) {
        *self.simulate_bus_error.lock().unwrap() = enable;
    }

    pub fn is_bus_initialized(&self) -> bool {
        *self.bus_initialized.lock().unwrap()
    }

    pub fn get_conversion_requests(&self) -> usize {
        *self.conversion_requests.lock().unwrap()
    }
}

impl OneWireThermometer for MockThermometer {
    fn init_bus(&mut self) -> Result<(), ThermometerError> {
        if *self.simulate_bus_error.lock().unwrap() {
            return Err(ThermometerError::Bus("Simulated bus error".to_string()));
        }
        *self.bus_initialized.lock().unwrap() = true;
        Ok(())
    }

    fn request_conversion(&mut self) -> Result<(), ThermometerError> {
        if *self.simulate_bus_error.lock().unwrap() {
            return Err(ThermometerError::Conversion(
                "Simulated conversion error".to_string(),
            ));
        }
        *self.conversion_requests.lock().unwrap() += 1;
        Ok(())
    }

    fn celsius(&mut self, device_index: usize) -> Result<f32, ThermometerError> {
        self.temperatures
            .lock()
            .unwrap()
            .get(device_index)
            .copied()
            .ok_or(ThermometerError::NoDevice(device_index))
    }
}
