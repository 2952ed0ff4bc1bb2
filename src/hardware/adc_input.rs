use std::rc::Rc;

use esp_idf_svc::hal::{
    adc::{
        attenuation,
        oneshot::{
            config::{AdcChannelConfig, Calibration},
            AdcChannelDriver, AdcDriver,
        },
    },
    gpio::{ADCPin, Pin},
    sys::adc_atten_t,
};
use log::{error, info};
use water_quality_core::{AdcError, AnalogInput, Attenuation, Channel};

/// ESP-IDF oneshot ADC による1チャンネル分のアナログ入力
///
/// pH と TDS は同じ ADC1 を使うため、`AdcDriver` は `Rc` で共有します。
/// 生コードが必要なため、電圧キャリブレーションは無効にしています。
pub struct EspAdcInput<'d, P: ADCPin> {
    driver: Rc<AdcDriver<'d, P::Adc>>,
    pin: Option<P>,
    channel_driver: Option<AdcChannelDriver<'d, P, Rc<AdcDriver<'d, P::Adc>>>>,
    channel: Channel,
}

impl<'d, P: ADCPin + 'd> EspAdcInput<'d, P> {
    pub fn new(driver: Rc<AdcDriver<'d, P::Adc>>, pin: P) -> Self {
        let channel = Channel::new(pin.pin() as u8);
        Self {
            driver,
            pin: Some(pin),
            channel_driver: None,
            channel,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    fn to_esp_attenuation(attenuation: Attenuation) -> adc_atten_t {
        match attenuation {
            Attenuation::Db0 => attenuation::NONE,
            Attenuation::Db2_5 => attenuation::DB_2_5,
            Attenuation::Db6 => attenuation::DB_6,
            Attenuation::Db11 => attenuation::DB_11,
        }
    }

    fn check_channel(&self, channel: Channel) -> Result<(), AdcError> {
        if channel == self.channel {
            Ok(())
        } else {
            Err(AdcError::InvalidChannel(channel))
        }
    }
}

impl<'d, P: ADCPin + 'd> AnalogInput for EspAdcInput<'d, P> {
    fn configure_channel(
        &mut self,
        channel: Channel,
        resolution_bits: u8,
        attenuation: Attenuation,
    ) -> Result<(), AdcError> {
        self.check_channel(channel)?;
        // oneshot ドライバーのデフォルト分解能は12bit
        if resolution_bits != 12 {
            return Err(AdcError::UnsupportedResolution(resolution_bits));
        }

        let pin = self.pin.take().ok_or_else(|| AdcError::ReadFailed {
            channel,
            reason: "チャンネルは設定済みです".to_string(),
        })?;
        let config = AdcChannelConfig {
            attenuation: Self::to_esp_attenuation(attenuation),
            calibration: Calibration::None,
            ..Default::default()
        };

        let driver = AdcChannelDriver::new(self.driver.clone(), pin, &config).map_err(|e| {
            error!("ADCチャンネル {} の初期化に失敗: {:?}", channel, e);
            AdcError::ReadFailed {
                channel,
                reason: format!("{}", e),
            }
        })?;
        self.channel_driver = Some(driver);
        info!("ADCチャンネル {} を設定しました ({:?})", channel, attenuation);
        Ok(())
    }

    fn sample_raw(&mut self, channel: Channel) -> Result<u16, AdcError> {
        self.check_channel(channel)?;
        let driver = self
            .channel_driver
            .as_mut()
            .ok_or_else(|| AdcError::ReadFailed {
                channel,
                reason: "チャンネルが未設定です".to_string(),
            })?;

        driver.read_raw().map_err(|e| AdcError::ReadFailed {
            channel,
            reason: format!("{}", e),
        })
    }
}
