use embedded_hal::delay::DelayNs;
use log::{debug, info};

use crate::adc::{code_to_voltage, AnalogInput, Attenuation, Channel, RESOLUTION_BITS};
use crate::error::{SensorError, SensorResult};

/// 1回の電圧取得で読み取るサンプル数
pub const SAMPLE_COUNT: u32 = 20;

/// サンプル間の待ち時間（ミリ秒）
pub const SAMPLE_INTERVAL_MS: u32 = 10;

/// オーバーサンプリングによるアナログ電圧取得
///
/// 1チャンネルを所有し、20サンプルを10ms間隔で読み取って平均電圧を返します。
/// アナログノイズ低減のためのオーバーサンプリングで、間隔とサンプル数は
/// プローブの校正値と一致させる必要があります。
pub struct AnalogSampler<A, D> {
    adc: A,
    delay: D,
    channel: Channel,
    initialized: bool,
}

impl<A: AnalogInput, D: DelayNs> AnalogSampler<A, D> {
    pub fn new(adc: A, delay: D, channel: Channel) -> Self {
        Self {
            adc,
            delay,
            channel,
            initialized: false,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// ADCチャンネルを12bit / 11dB に設定する
    ///
    /// 2回目以降の呼び出しは何もしません。
    pub fn begin(&mut self) -> SensorResult<()> {
        if self.initialized {
            debug!("{} は初期化済みです", self.channel);
            return Ok(());
        }

        self.adc
            .configure_channel(self.channel, RESOLUTION_BITS, Attenuation::Db11)?;
        self.initialized = true;
        info!(
            "✓ ADCチャンネル {} を初期化しました ({}bit, 11dB)",
            self.channel, RESOLUTION_BITS
        );
        Ok(())
    }

    /// 平均電圧（V）を取得
    ///
    /// 呼び出し元スレッドを約200msブロックします。
    pub fn read_voltage(&mut self) -> SensorResult<f32> {
        if !self.initialized {
            return Err(SensorError::NotInitialized {
                sensor: "AnalogSampler",
            });
        }

        let mut sum: i64 = 0;
        for _ in 0..SAMPLE_COUNT {
            sum += i64::from(self.adc.sample_raw(self.channel)?);
            self.delay.delay_ms(SAMPLE_INTERVAL_MS);
        }

        let average = (sum as f64 / f64::from(SAMPLE_COUNT)) as f32;
        let voltage = code_to_voltage(average);
        debug!(
            "{}: 合計={} 平均コード={:.2} 電圧={:.4}V",
            self.channel, sum, average, voltage
        );
        Ok(voltage)
    }

    /// 所有しているハードウェアを返す
    pub fn release(self) -> (A, D) {
        (self.adc, self.delay)
    }
}
